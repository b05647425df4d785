mod error;
mod store;
mod time;
mod types;

pub use error::ScheduleError;
pub use store::{day_items, TaskStore};
pub use time::{format_clock_time, format_minutes, parse_clock, parse_user_time, TimeInterval, MINUTES_PER_DAY};
pub use types::*;
