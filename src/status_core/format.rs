//! Display formatting for snapshot fields
//!
//! The snapshot carries pre-formatted strings; these helpers define the exact
//! shapes the presentation layer relies on.

use chrono::{DateTime, Utc};

/// Thousands-separated count, e.g. 1234567 -> "1,234,567"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One-decimal percentage, e.g. 25.0 -> "25.0%"
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Two-decimal percentage used for uptime, e.g. 100.0 -> "100.00%"
pub fn format_uptime_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Largest two non-zero units among hours/minutes/seconds
///
/// "2h 5m", "5m 30s", or "45s"; zero seconds still render as "0s".
pub fn format_duration(total_secs: i64) -> String {
    let (minutes, seconds) = (total_secs / 60, total_secs % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// HH:MM wall-clock stamp for the "last updated" field
pub fn format_clock(now: DateTime<Utc>) -> String {
    now.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_count_groups() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(25.0), "25.0%");
        assert_eq!(format_percent(33.333), "33.3%");
        assert_eq!(format_uptime_percent(100.0), "100.00%");
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(330), "5m 30s");
        assert_eq!(format_duration(600), "10m 0s");
        assert_eq!(format_duration(7_500), "2h 5m");
        // Seconds drop once hours appear
        assert_eq!(format_duration(3_661), "1h 1m");
    }

    #[test]
    fn test_format_clock() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 59).unwrap();
        assert_eq!(format_clock(now), "09:05");
    }
}
