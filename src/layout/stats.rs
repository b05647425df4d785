use serde::Serialize;

use super::packer::Slot;
use crate::schedule::{ScheduleItem, TimeInterval, MINUTES_PER_DAY};

/// Summary numbers shown above a day's timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStats {
    pub total_items: usize,
    pub completed_items: usize,
    /// Sum of effective durations; items running past midnight count up to 24:00
    pub scheduled_minutes: u32,
    pub scheduled_hours: f64,
    pub free_hours: f64,
    /// Whole percent of items completed, 0 when the day is empty
    pub completion_rate: u32,
}

impl DayStats {
    pub fn compute<T: ScheduleItem>(slots: &[Slot<'_, T>]) -> Self {
        let total_items = slots.len();
        let completed_items = slots.iter().filter(|s| s.item.is_completed()).count();
        let scheduled_minutes: u32 = slots
            .iter()
            .map(|s| s.interval.duration_minutes() as u32)
            .sum();

        let scheduled_hours = round_tenth(scheduled_minutes as f64 / 60.0);
        let day_hours = (MINUTES_PER_DAY / 60) as f64;
        let free_hours = round_tenth((day_hours - scheduled_hours).max(0.0));
        let completion_rate = if total_items > 0 {
            (completed_items as f64 / total_items as f64 * 100.0).round() as u32
        } else {
            0
        };

        Self {
            total_items,
            completed_items,
            scheduled_minutes,
            scheduled_hours,
            free_hours,
            completion_rate,
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// True when `candidate` overlaps none of the day's slots
pub fn is_slot_available<T>(slots: &[Slot<'_, T>], candidate: &TimeInterval) -> bool {
    !slots.iter().any(|s| s.interval.overlaps(candidate))
}

/// Every pair of overlapping slots, as input indices with the earlier index first
pub fn conflicts<T>(slots: &[Slot<'_, T>]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            if a.interval.overlaps(&b.interval) {
                pairs.push((a.index.min(b.index), a.index.max(b.index)));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::validate_items;
    use crate::schedule::{Priority, Task, TaskStatus};
    use chrono::NaiveDate;

    fn task(start: &str, end: &str, status: TaskStatus) -> Task {
        Task {
            id: format!("{start}-{end}"),
            description: "t".to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            status,
            priority: Priority::Medium,
            duration: None,
        }
    }

    #[test]
    fn empty_day() {
        let tasks: Vec<Task> = Vec::new();
        let stats = DayStats::compute(&validate_items(&tasks).slots);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.scheduled_hours, 0.0);
        assert_eq!(stats.free_hours, 24.0);
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn counts_hours_and_completion() {
        let tasks = vec![
            task("09:00", "10:30", TaskStatus::Completed),
            task("13:00", "14:00", TaskStatus::Pending),
            task("23:00", "01:00", TaskStatus::InProgress),
        ];
        let stats = DayStats::compute(&validate_items(&tasks).slots);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.completed_items, 1);
        assert_eq!(stats.scheduled_minutes, 90 + 60 + 60);
        assert_eq!(stats.scheduled_hours, 3.5);
        assert_eq!(stats.free_hours, 20.5);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn free_hours_never_negative() {
        let tasks = vec![
            task("00:00", "23:59", TaskStatus::Pending),
            task("01:00", "23:00", TaskStatus::Pending),
        ];
        let stats = DayStats::compute(&validate_items(&tasks).slots);
        assert_eq!(stats.free_hours, 0.0);
    }

    #[test]
    fn slot_availability_uses_half_open_test() {
        let tasks = vec![task("09:00", "10:00", TaskStatus::Pending)];
        let validated = validate_items(&tasks);
        let after = TimeInterval::parse("10:00", "11:00").unwrap();
        let inside = TimeInterval::parse("09:30", "09:45").unwrap();
        assert!(is_slot_available(&validated.slots, &after));
        assert!(!is_slot_available(&validated.slots, &inside));
    }

    #[test]
    fn reports_conflicting_pairs() {
        let tasks = vec![
            task("09:00", "11:00", TaskStatus::Pending),
            task("12:00", "13:00", TaskStatus::Pending),
            task("10:00", "12:30", TaskStatus::Pending),
        ];
        let validated = validate_items(&tasks);
        assert_eq!(conflicts(&validated.slots), [(0, 2), (1, 2)]);
    }
}
