use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::layout::{validate_items, DayLayout, DayStats, LayoutItem, Rejection, TimelinePacker};
use crate::schedule::{format_clock_time, format_duration_with_format, ScheduleItem};

#[derive(Debug, Serialize)]
pub struct DayReport {
    pub date: String,
    pub exported_at: String,
    pub pixels_per_hour: f64,
    pub rows: usize,
    pub stats: DayStats,
    pub blocks: Vec<ExportBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedItem>,
}

#[derive(Debug, Serialize)]
pub struct ExportBlock {
    pub id: String,
    pub label: String,
    pub kind: &'static str,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub multi_day: bool,
    pub left_px: f64,
    pub width_px: f64,
    pub top_px: f64,
    pub row: usize,
}

#[derive(Debug, Serialize)]
pub struct RejectedItem {
    pub index: usize,
    pub id: String,
    pub reason: String,
}

impl From<&Rejection> for RejectedItem {
    fn from(rejection: &Rejection) -> Self {
        Self {
            index: rejection.index,
            id: rejection.item_id.clone(),
            reason: rejection.error.to_string(),
        }
    }
}

impl ExportBlock {
    fn from_layout<T: ScheduleItem>(block: &LayoutItem<'_, T>, config: &Config) -> Self {
        let start = format_clock_time(block.item.start_time(), config.clock_format);
        let end = format_clock_time(block.item.end_time(), config.clock_format);
        // The block stops at midnight; the label still shows the real end
        let end = if block.interval.crosses_midnight {
            format!("{} (next day)", end)
        } else {
            end
        };

        Self {
            id: block.item.item_id().to_string(),
            label: block.item.label().to_string(),
            kind: block.item.kind(),
            start,
            end,
            duration: format_duration_with_format(block.interval.duration_minutes() as u32, config.time_format),
            multi_day: block.interval.crosses_midnight,
            left_px: block.left_px,
            width_px: block.width_px,
            top_px: block.top_px(config.base_offset_px, config.row_height_px),
            row: block.row,
        }
    }
}

impl DayReport {
    pub fn build<T: ScheduleItem>(date: NaiveDate, layout: &DayLayout<'_, T>, stats: DayStats, config: &Config) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            exported_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            pixels_per_hour: config.pixels_per_hour(),
            rows: layout.rows,
            stats,
            blocks: layout.blocks.iter().map(|b| ExportBlock::from_layout(b, config)).collect(),
            rejected: layout.rejected.iter().map(RejectedItem::from).collect(),
        }
    }

    /// Validate, pack and summarize a day's items in a single pass
    pub fn for_items<T: ScheduleItem>(date: NaiveDate, items: &[T], config: &Config) -> Result<Self> {
        let packer = TimelinePacker::new(config.layout_params())?;
        let validated = validate_items(items);
        let stats = DayStats::compute(&validated.slots);
        let layout = packer.pack_validated(validated);
        Ok(Self::build(date, &layout, stats, config))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize day report")
    }
}

/// Write a day's layout report as pretty JSON
pub fn export_day(report: &DayReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, report.to_json()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
