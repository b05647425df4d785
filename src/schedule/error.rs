use thiserror::Error;

/// Errors raised while validating schedule data at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid time format: {value:?} (expected HH:MM)")]
    InvalidTimeFormat { value: String },

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Start and end are both {time}; an item needs a non-zero duration")]
    ZeroDuration { time: String },

    #[error("End time {end} must be after start time {start}")]
    EndBeforeStart { start: String, end: String },
}
