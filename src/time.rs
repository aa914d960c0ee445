//! Wall-clock arithmetic: `HH:MM` parsing, minute offsets and `Xh YYm` formatting.

use crate::errors::{TrackerError, TrackerResult};
use chrono::{NaiveTime, Timelike};

/// Time of day at minute precision. There is no date or timezone attached.
pub type ClockTime = NaiveTime;

/// Parses a form or storage value. The empty string means "unset".
///
/// Browsers may submit `HH:MM:SS` for time inputs; seconds are dropped.
pub fn parse_clock(value: &str) -> TrackerResult<Option<ClockTime>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .and_then(|time| time.with_second(0))
        .and_then(|time| time.with_nanosecond(0))
        .map(Some)
        .ok_or_else(|| TrackerError::InvalidTime(value.to_string()))
}

pub fn format_clock(time: ClockTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn to_minutes(time: ClockTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Worked minutes between two endpoints; an unset endpoint contributes nothing.
pub fn duration(entry: Option<ClockTime>, exit: Option<ClockTime>) -> i64 {
    match (entry, exit) {
        (Some(entry), Some(exit)) => to_minutes(exit) - to_minutes(entry),
        _ => 0,
    }
}

pub fn format_minutes(minutes: i64) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> ClockTime {
        parse_clock(value).unwrap().unwrap()
    }

    #[test]
    fn parses_padded_and_with_seconds() {
        assert_eq!(to_minutes(at("09:30")), 570);
        assert_eq!(to_minutes(at("23:59")), 1439);
        assert_eq!(format_clock(at("07:05:42")), "07:05");
        assert_eq!(parse_clock("  ").unwrap(), None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_clock("25:00"), Err(TrackerError::InvalidTime(_))));
        assert!(matches!(parse_clock("nine"), Err(TrackerError::InvalidTime(_))));
        assert!(matches!(parse_clock("12:60"), Err(TrackerError::InvalidTime(_))));
    }

    #[test]
    fn duration_is_zero_for_open_intervals() {
        assert_eq!(duration(None, None), 0);
        assert_eq!(duration(Some(at("08:00")), None), 0);
        assert_eq!(duration(None, Some(at("08:00"))), 0);
    }

    #[test]
    fn duration_matches_minute_difference() {
        let pairs = [("00:00", "00:00"), ("08:15", "12:45"), ("09:00", "17:00"), ("00:00", "23:59")];
        for (entry, exit) in pairs {
            let minutes = duration(Some(at(entry)), Some(at(exit)));
            assert_eq!(minutes, to_minutes(at(exit)) - to_minutes(at(entry)));
            assert!(minutes >= 0);
        }
        assert_eq!(duration(Some(at("09:00")), Some(at("17:00"))), 480);
    }

    #[test]
    fn formats_hours_and_padded_minutes() {
        assert_eq!(format_minutes(0), "0h 00m");
        assert_eq!(format_minutes(125), "2h 05m");
        assert_eq!(format_minutes(480), "8h 00m");
        assert_eq!(format_minutes(2400), "40h 00m");
    }
}
