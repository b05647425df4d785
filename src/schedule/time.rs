//! Clock-time parsing and formatting for "HH:MM" schedule strings

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ScheduleError;
use crate::config::ClockFormat;

/// Minutes in one calendar day; also the clamp target for items that run past midnight
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Parse a strict "HH:MM" 24-hour string into minutes since midnight.
///
/// Both fields must be exactly two ASCII digits, hour in 0..=23, minute in 0..=59.
pub fn parse_clock(value: &str) -> Result<u16, ScheduleError> {
    let invalid = || ScheduleError::InvalidTimeFormat {
        value: value.to_string(),
    };

    let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
    if hour.len() != 2 || minute.len() != 2 {
        return Err(invalid());
    }
    if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hour: u16 = hour.parse().map_err(|_| invalid())?;
    let minute: u16 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(hour * 60 + minute)
}

/// Format minutes since midnight as "HH:MM". 1440 renders as "24:00".
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format a 24-hour "HH:MM" string for display in the user's clock format
pub fn format_clock_time(time_24: &str, clock_format: ClockFormat) -> String {
    match clock_format {
        ClockFormat::Hour24 => time_24.to_string(),
        ClockFormat::Hour12 => {
            let Some((hour, min)) = time_24.split_once(':') else {
                return time_24.to_string();
            };
            let (Ok(hour), Ok(min)) = (hour.parse::<u32>(), min.parse::<u32>()) else {
                return time_24.to_string();
            };
            let (h12, ampm) = match hour {
                0 | 24 => (12, "am"),
                1..=11 => (hour, "am"),
                12 => (12, "pm"),
                _ => (hour - 12, "pm"),
            };
            format!("{}:{:02}{}", h12, min, ampm)
        }
    }
}

/// Parse a user-entered time ("9:00am", "14:30", "2pm", "9") to "HH:MM".
///
/// Lenient counterpart to [`parse_clock`] for interactive input; the result
/// always satisfies the strict grammar.
pub fn parse_user_time(input: &str) -> Option<String> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    // am/pm suffix, with or without the trailing "m"
    let (time_part, meridiem) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, Some(true))
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, Some(false))
    } else if let Some(rest) = input.strip_suffix('p') {
        (rest, Some(true))
    } else if let Some(rest) = input.strip_suffix('a') {
        (rest, Some(false))
    } else {
        (input.as_str(), None)
    };

    let time_part = time_part.trim();
    let (hour, minute) = match time_part.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_part.parse::<u32>().ok()?, 0),
    };

    let hour_24 = match meridiem {
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(true) if hour < 12 => hour + 12,
        Some(false) if hour == 12 => 0,
        _ => hour,
    };

    if hour_24 > 23 || minute > 59 {
        debug!(input = %input, "rejected user time");
        return None;
    }

    Some(format!("{:02}:{:02}", hour_24, minute))
}

/// Half-open span of minutes since midnight within one calendar day.
///
/// Items whose end is earlier than their start run past midnight; only the
/// part up to 24:00 belongs to this day, so `end_minutes` is clamped to
/// [`MINUTES_PER_DAY`] and `crosses_midnight` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start_minutes: u16,
    pub end_minutes: u16,
    pub crosses_midnight: bool,
}

impl TimeInterval {
    /// Build an interval from minute offsets, clamping midnight-crossing ends.
    /// `start_minutes` must be below [`MINUTES_PER_DAY`].
    pub fn from_minutes(start_minutes: u16, end_minutes: u16) -> Self {
        debug_assert!(start_minutes < MINUTES_PER_DAY);
        if end_minutes < start_minutes {
            Self {
                start_minutes,
                end_minutes: MINUTES_PER_DAY,
                crosses_midnight: true,
            }
        } else {
            Self {
                start_minutes,
                end_minutes: end_minutes.min(MINUTES_PER_DAY),
                crosses_midnight: false,
            }
        }
    }

    /// Parse a pair of "HH:MM" strings. Equal start and end is rejected:
    /// it would be neither a same-day span nor a full day.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        let start_minutes = parse_clock(start)?;
        let end_minutes = parse_clock(end)?;
        if start_minutes == end_minutes {
            return Err(ScheduleError::ZeroDuration {
                time: start.to_string(),
            });
        }
        Ok(Self::from_minutes(start_minutes, end_minutes))
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end_minutes - self.start_minutes
    }

    /// Half-open overlap: touching intervals do not overlap
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        !(self.end_minutes <= other.start_minutes || self.start_minutes >= other.end_minutes)
    }

    pub fn start_label(&self) -> String {
        format_minutes(self.start_minutes)
    }

    pub fn end_label(&self) -> String {
        format_minutes(self.end_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_clock_accepts_valid_times() {
        assert_eq!(parse_clock("00:00"), Ok(0));
        assert_eq!(parse_clock("09:30"), Ok(570));
        assert_eq!(parse_clock("23:59"), Ok(1439));
    }

    #[test]
    fn parse_clock_rejects_malformed_input() {
        for bad in ["", "9:00", "09:0", "24:00", "12:60", "ab:cd", "09-00", "09:00:00", "+9:00", " 9:00"] {
            assert_eq!(
                parse_clock(bad),
                Err(ScheduleError::InvalidTimeFormat { value: bad.to_string() }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn interval_clamps_midnight_crossing() {
        let interval = TimeInterval::parse("22:00", "02:00").unwrap();
        assert_eq!(interval.start_minutes, 1320);
        assert_eq!(interval.end_minutes, MINUTES_PER_DAY);
        assert!(interval.crosses_midnight);
        assert_eq!(interval.duration_minutes(), 120);
        assert_eq!(interval.end_label(), "24:00");
    }

    #[test]
    fn zero_length_interval_is_rejected() {
        assert_eq!(
            TimeInterval::parse("10:00", "10:00"),
            Err(ScheduleError::ZeroDuration { time: "10:00".to_string() })
        );
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        let a = TimeInterval::parse("09:00", "10:00").unwrap();
        let b = TimeInterval::parse("10:00", "11:00").unwrap();
        let c = TimeInterval::parse("09:30", "10:30").unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn user_time_variants() {
        assert_eq!(parse_user_time("9"), Some("09:00".to_string()));
        assert_eq!(parse_user_time("2pm"), Some("14:00".to_string()));
        assert_eq!(parse_user_time("9:30am"), Some("09:30".to_string()));
        assert_eq!(parse_user_time("12am"), Some("00:00".to_string()));
        assert_eq!(parse_user_time("12:15p"), Some("12:15".to_string()));
        assert_eq!(parse_user_time(" 14:30 "), Some("14:30".to_string()));
        assert_eq!(parse_user_time("25:00"), None);
        assert_eq!(parse_user_time("13pm"), None);
        assert_eq!(parse_user_time("noon"), None);
    }

    #[test]
    fn twelve_hour_display() {
        assert_eq!(format_clock_time("00:05", ClockFormat::Hour12), "12:05am");
        assert_eq!(format_clock_time("12:00", ClockFormat::Hour12), "12:00pm");
        assert_eq!(format_clock_time("14:30", ClockFormat::Hour12), "2:30pm");
        assert_eq!(format_clock_time("24:00", ClockFormat::Hour12), "12:00am");
        assert_eq!(format_clock_time("14:30", ClockFormat::Hour24), "14:30");
    }
}
