use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::time::{parse_clock, TimeInterval};
use crate::config::TimeFormat;

/// Anything with a start and end time of day that can be placed on the timeline.
///
/// Times are raw "HH:MM" strings as they arrive from the task store; they are
/// checked once by [`crate::layout::validate_items`] before packing.
pub trait ScheduleItem {
    fn item_id(&self) -> &str;
    fn label(&self) -> &str;
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;

    /// Whether this item counts as done in day statistics
    fn is_completed(&self) -> bool {
        false
    }

    /// Block kind reported to renderers
    fn kind(&self) -> &'static str {
        "task"
    }

    fn interval(&self) -> Result<TimeInterval, ScheduleError> {
        TimeInterval::parse(self.start_time(), self.end_time())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A task as served by `/api/tasks` and stored in `tasks.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub description: String,
    pub start_time: String,  // "HH:MM"
    pub end_time: String,    // "HH:MM", earlier than start for tasks running past midnight
    pub date: NaiveDate,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl ScheduleItem for Task {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.description
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }

    fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

pub const PRIORITY_EVENT_ID: &str = "priority-event";

/// The single highlighted event for a day. Unlike tasks it may not run past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityEvent {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
}

impl PriorityEvent {
    pub fn new(title: &str, start_time: &str, end_time: &str, date: NaiveDate) -> Result<Self, ScheduleError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ScheduleError::EmptyTitle);
        }

        let start = parse_clock(start_time)?;
        let end = parse_clock(end_time)?;
        if start >= end {
            return Err(ScheduleError::EndBeforeStart {
                start: start_time.to_string(),
                end: end_time.to_string(),
            });
        }

        Ok(Self {
            id: PRIORITY_EVENT_ID.to_string(),
            title: title.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            date,
            kind: "priority".to_string(),
        })
    }
}

impl ScheduleItem for PriorityEvent {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }

    fn kind(&self) -> &'static str {
        "priority"
    }
}

/// One entry of a day's timeline: either the priority event or a stored task
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayItem<'a> {
    Priority(&'a PriorityEvent),
    Task(&'a Task),
}

impl ScheduleItem for DayItem<'_> {
    fn item_id(&self) -> &str {
        match self {
            DayItem::Priority(e) => e.item_id(),
            DayItem::Task(t) => t.item_id(),
        }
    }

    fn label(&self) -> &str {
        match self {
            DayItem::Priority(e) => e.label(),
            DayItem::Task(t) => t.label(),
        }
    }

    fn start_time(&self) -> &str {
        match self {
            DayItem::Priority(e) => e.start_time(),
            DayItem::Task(t) => t.start_time(),
        }
    }

    fn end_time(&self) -> &str {
        match self {
            DayItem::Priority(e) => e.end_time(),
            DayItem::Task(t) => t.end_time(),
        }
    }

    fn is_completed(&self) -> bool {
        match self {
            DayItem::Priority(e) => e.is_completed(),
            DayItem::Task(t) => t.is_completed(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            DayItem::Priority(e) => e.kind(),
            DayItem::Task(t) => t.kind(),
        }
    }
}

/// Format minutes as "Xh Ym"
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 && mins > 0 {
        format!("{}h {}m", hours, mins)
    } else if hours > 0 {
        format!("{}h", hours)
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        "0m".to_string()
    }
}

/// Format minutes based on user's preferred time format
pub fn format_duration_with_format(minutes: u32, time_format: TimeFormat) -> String {
    match time_format {
        TimeFormat::HoursMinutes => format_duration(minutes),
        TimeFormat::Decimal => {
            let hours = minutes as f32 / 60.0;
            if minutes == 0 {
                "0h".to_string()
            } else if minutes % 60 == 0 {
                format!("{}h", minutes / 60)
            } else {
                // Two decimals, then trim trailing zeros
                let s = format!("{:.2}", hours);
                let trimmed = s.trim_end_matches('0').trim_end_matches('.');
                format!("{}h", trimmed)
            }
        }
    }
}
