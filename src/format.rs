use crate::domain::Millis;
use chrono::{Local, NaiveDateTime, TimeZone};

/// Format a duration in milliseconds as a clock-style string.
/// "1:02:05" with hours, "4:09" with minutes only, "0:42" under a minute.
pub fn format_duration(ms: Millis) -> String {
    let total_seconds = (ms / 1000).max(0);
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}:{:02}", minutes, seconds)
    } else {
        format!("0:{:02}", seconds)
    }
}

/// Render an epoch-millisecond timestamp in local time, minute precision
pub fn format_stamp(ms: Millis) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "invalid time".to_string(),
    }
}

/// Render a timestamp with seconds, the format the session form pre-fills
/// so edits round-trip without losing precision
pub fn format_stamp_precise(ms: Millis) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "invalid time".to_string(),
    }
}

/// Render only the time-of-day part of a timestamp
pub fn format_time_of_day(ms: Millis) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Wall clock with seconds for the header bar
pub fn format_clock(ms: Millis) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Parse a local timestamp typed into the session form.
/// Accepts "2024-03-01 09:15:30" and the minute-precision "2024-03-01 09:15".
pub fn parse_stamp(input: &str) -> Option<Millis> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_seconds_only() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(999), "0:00");
        assert_eq!(format_duration(5_000), "0:05");
        assert_eq!(format_duration(59_000), "0:59");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(60_000), "1:00");
        assert_eq!(format_duration(65_000), "1:05");
        assert_eq!(format_duration(249_000), "4:09");
        assert_eq!(format_duration(3_599_000), "59:59");
    }

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(3_600_000), "1:00:00");
        assert_eq!(format_duration(3_725_000), "1:02:05");
        assert_eq!(format_duration(36_000_000), "10:00:00");
    }

    #[test]
    fn test_format_duration_negative_clamps() {
        assert_eq!(format_duration(-1), "0:00");
        assert_eq!(format_duration(-3_600_000), "0:00");
    }

    #[test]
    fn test_parse_stamp_round_trip() {
        // Round-trip through the local zone so the test is timezone-neutral
        let now = Local::now().timestamp_millis();
        let minute = now - now % 60_000;
        let parsed = parse_stamp(&format_stamp(minute)).unwrap();
        assert_eq!(parsed, minute);
    }

    #[test]
    fn test_precise_stamp_round_trips_seconds() {
        let now = Local::now().timestamp_millis();
        let second = now - now % 1_000;
        let parsed = parse_stamp(&format_stamp_precise(second)).unwrap();
        assert_eq!(parsed, second);
    }

    #[test]
    fn test_parse_stamp_with_seconds() {
        let parsed = parse_stamp("2024-03-01 09:15:30").unwrap();
        let reparsed = parse_stamp("2024-03-01 09:15").unwrap();
        assert_eq!(parsed - reparsed, 30_000);
    }

    #[test]
    fn test_parse_stamp_invalid() {
        assert_eq!(parse_stamp(""), None);
        assert_eq!(parse_stamp("yesterday"), None);
        assert_eq!(parse_stamp("2024-13-40 99:99"), None);
    }
}
