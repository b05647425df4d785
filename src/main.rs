//! dayline command-line interface.
//!
//! Usage:
//!   dayline layout --tasks tasks.json --date 2026-10-18
//!   dayline stats --date 2026-10-18
//!   dayline check --start 9am --end 10:30
//!   dayline priority set "Deep work" 13:00 15:00
//!   dayline config set-width 1200
//!
//! Logs go to stderr; set RUST_LOG=dayline=debug to see packing decisions.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use dayline::config::{ClockFormat, Config};
use dayline::export::{export_day, DayReport};
use dayline::layout::{conflicts, is_slot_available, validate_items, Collision, DayStats};
use dayline::schedule::{day_items, format_duration, parse_user_time, PriorityEvent, ScheduleItem, TaskStore, TimeInterval};

/// Lay out a day of scheduled tasks as a timeline
#[derive(Parser, Debug)]
#[command(name = "dayline", version)]
#[command(about = "Pack a day's tasks into non-overlapping timeline rows")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print or write the packed layout for a day
    Layout {
        #[command(flatten)]
        day: DayArgs,

        /// Container width in pixels (overrides config)
        #[arg(long)]
        width: Option<f64>,

        /// What blocks are compared on when sharing a row (overrides config)
        #[arg(long, value_enum)]
        collision: Option<CollisionArg>,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Scheduled/free hours and completion rate for a day
    Stats {
        #[command(flatten)]
        day: DayArgs,
    },

    /// Check whether a time slot is free, and list existing conflicts
    Check {
        #[command(flatten)]
        day: DayArgs,

        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,
    },

    /// Manage the day's priority event
    Priority {
        #[command(subcommand)]
        action: PriorityAction,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
struct DayArgs {
    /// Task list JSON (defaults to the cached task file)
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Day to lay out, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Priority event JSON (defaults to the saved priority event)
    #[arg(long)]
    priority: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum PriorityAction {
    Set {
        title: String,
        start: String,
        end: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetWidth { px: f64 },
    SetMinWidth { px: f64 },
    SetCollision {
        #[arg(value_enum)]
        collision: CollisionArg,
    },
    SetClock {
        #[arg(value_enum)]
        clock: ClockArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CollisionArg {
    Time,
    Pixels,
}

impl From<CollisionArg> for Collision {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Time => Collision::Time,
            CollisionArg::Pixels => Collision::Pixels,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ClockArg {
    #[value(name = "24h")]
    Hour24,
    #[value(name = "12h")]
    Hour12,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Layout { day, width, collision, out: report_path } => {
            if let Some(width) = width {
                config.container_width_px = width;
            }
            if let Some(collision) = collision {
                config.collision = collision.into();
            }
            run_layout(&config, &day, report_path.as_deref(), &mut out)
        }
        Command::Stats { day } => run_stats(&config, &day, &mut out),
        Command::Check { day, start, end } => run_check(&config, &day, &start, &end, &mut out),
        Command::Priority { action } => run_priority(&priority_path()?, action, &mut out),
        Command::Config { action } => run_config(config, &config_path, action, &mut out),
    }
}

/// Store, priority event, and date resolved from command-line arguments
struct DayInput {
    store: TaskStore,
    priority: Option<PriorityEvent>,
    date: NaiveDate,
}

impl DayInput {
    fn load(config: &Config, args: &DayArgs) -> Result<Self> {
        let tasks_path = match &args.tasks {
            Some(path) => path.clone(),
            None => config.tasks_path()?,
        };
        let priority_path = match &args.priority {
            Some(path) => path.clone(),
            None => priority_path()?,
        };
        Ok(Self {
            store: TaskStore::load(&tasks_path)?,
            priority: PriorityEvent::load(&priority_path)?,
            date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}

fn priority_path() -> Result<PathBuf> {
    Config::data_path("priority.json")
}

fn run_layout(config: &Config, args: &DayArgs, report_path: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let input = DayInput::load(config, args)?;
    let items = day_items(&input.store, input.priority.as_ref(), input.date);
    let report = DayReport::for_items(input.date, &items, config)?;

    if !report.rejected.is_empty() {
        warn!(count = report.rejected.len(), "some items were not laid out");
    }

    match report_path {
        Some(path) => {
            export_day(&report, path)?;
            info!(path = %path.display(), blocks = report.blocks.len(), rows = report.rows, "wrote layout");
        }
        None => writeln!(out, "{}", report.to_json()?)?,
    }
    Ok(())
}

fn run_stats(config: &Config, args: &DayArgs, out: &mut impl Write) -> Result<()> {
    let input = DayInput::load(config, args)?;
    let items = day_items(&input.store, input.priority.as_ref(), input.date);
    let stats = DayStats::compute(&validate_items(&items).slots);

    writeln!(out, "Date:            {}", input.date.format("%Y-%m-%d"))?;
    writeln!(out, "Items:           {}", stats.total_items)?;
    writeln!(out, "Scheduled:       {} ({:.1}h)", format_duration(stats.scheduled_minutes), stats.scheduled_hours)?;
    writeln!(out, "Free:            {:.1}h", stats.free_hours)?;
    writeln!(out, "Completion rate: {}%", stats.completion_rate)?;
    Ok(())
}

fn run_check(config: &Config, args: &DayArgs, start: &str, end: &str, out: &mut impl Write) -> Result<()> {
    let start = parse_user_time(start).with_context(|| format!("Invalid start time: {start}"))?;
    let end = parse_user_time(end).with_context(|| format!("Invalid end time: {end}"))?;
    let candidate = TimeInterval::parse(&start, &end)?;

    let input = DayInput::load(config, args)?;
    let items = day_items(&input.store, input.priority.as_ref(), input.date);
    let validated = validate_items(&items);

    if is_slot_available(&validated.slots, &candidate) {
        writeln!(out, "{}-{} is free", candidate.start_label(), candidate.end_label())?;
    } else {
        writeln!(out, "{}-{} overlaps:", candidate.start_label(), candidate.end_label())?;
        for slot in validated.slots.iter().filter(|s| s.interval.overlaps(&candidate)) {
            writeln!(out, "  {} {}-{}", slot.item.label(), slot.item.start_time(), slot.item.end_time())?;
        }
    }

    let existing = conflicts(&validated.slots);
    if !existing.is_empty() {
        writeln!(out, "Existing conflicts:")?;
        for (a, b) in existing {
            writeln!(out, "  {} <-> {}", items[a].label(), items[b].label())?;
        }
    }
    Ok(())
}

fn run_priority(path: &Path, action: PriorityAction, out: &mut impl Write) -> Result<()> {
    match action {
        PriorityAction::Set { title, start, end, date } => {
            let start = parse_user_time(&start).with_context(|| format!("Invalid start time: {start}"))?;
            let end = parse_user_time(&end).with_context(|| format!("Invalid end time: {end}"))?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let event = PriorityEvent::new(&title, &start, &end, date)?;
            event.save(path)?;
            info!(title = %event.title, "priority event set");
        }
        PriorityAction::Show => match PriorityEvent::load(path)? {
            Some(event) => writeln!(out, "{} {}-{} on {}", event.title, event.start_time, event.end_time, event.date)?,
            None => writeln!(out, "No priority event")?,
        },
        PriorityAction::Clear => {
            PriorityEvent::clear(path)?;
            info!("priority event cleared");
        }
    }
    Ok(())
}

fn run_config(mut config: Config, path: &Path, action: ConfigAction, out: &mut impl Write) -> Result<()> {
    match action {
        ConfigAction::Show => {
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            return Ok(());
        }
        ConfigAction::SetWidth { px } => {
            if !(px > 0.0) {
                bail!("Container width must be positive");
            }
            config.container_width_px = px;
        }
        ConfigAction::SetMinWidth { px } => {
            if !(px >= 0.0) {
                bail!("Minimum width cannot be negative");
            }
            config.min_width_px = px;
        }
        ConfigAction::SetCollision { collision } => config.collision = collision.into(),
        ConfigAction::SetClock { clock } => {
            config.clock_format = match clock {
                ClockArg::Hour24 => ClockFormat::Hour24,
                ClockArg::Hour12 => ClockFormat::Hour12,
            }
        }
    }
    config.save_to(path)?;
    info!(path = %path.display(), "config saved");
    Ok(())
}
