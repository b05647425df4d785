//! Local task cache: the `/api/tasks` payload saved as a JSON array, plus the
//! per-day priority event.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::types::{DayItem, PriorityEvent, Task, TaskStatus};

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Load tasks from a JSON file. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no task file, starting empty");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read task file {}", path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse task file {}", path.display()))?;

        info!(count = tasks.len(), path = %path.display(), "loaded tasks");
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks on `date`, ordered by start time
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.date == date).collect();
        tasks.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        tasks
    }

    /// Tasks with `status`, ordered by date then start time
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| t.status == status).collect();
        tasks.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
        tasks
    }
}

/// Build the timeline items for `date`: the priority event first when it
/// belongs to that day, then the day's tasks in start order.
pub fn day_items<'a>(
    store: &'a TaskStore,
    priority_event: Option<&'a PriorityEvent>,
    date: NaiveDate,
) -> Vec<DayItem<'a>> {
    let mut items = Vec::new();
    if let Some(event) = priority_event.filter(|e| e.date == date) {
        items.push(DayItem::Priority(event));
    }
    items.extend(store.tasks_for_date(date).into_iter().map(DayItem::Task));
    items
}

impl PriorityEvent {
    /// Load the saved priority event, if any
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .context("Failed to read priority event file")?;
        let event = serde_json::from_str(&contents)
            .context("Failed to parse priority event file")?;
        Ok(Some(event))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).context("Failed to write priority event file")?;
        Ok(())
    }

    /// Remove the saved priority event. Clearing an absent event is not an error.
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).context("Failed to remove priority event file")?;
        }
        Ok(())
    }
}
