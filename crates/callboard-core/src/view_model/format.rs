//! Display formatting shared by every view model

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// `part` as a percentage of `whole`; 0 when `whole` is 0
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}

/// One decimal place, e.g. "75.0%"
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value)
}

/// `minutes:seconds` with zero-padded seconds ("2:05")
///
/// Absent durations render as "N/A". A zero duration means the call never
/// connected and renders the same way.
pub fn format_duration(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) if s > 0 => format!("{}:{:02}", s / 60, s % 60),
        _ => "N/A".to_string(),
    }
}

/// Average durations in seconds as sent by the backend ("42.5s")
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0s".to_string();
    }
    let rounded = (seconds * 100.0).round() / 100.0;
    format!("{}s", rounded)
}

pub fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "N/A".to_string(),
    }
}

/// `value` or the placeholder for missing text fields
pub(crate) fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Visual class of a call status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Success,
    Warning,
    Danger,
    Info,
}

impl StatusBadge {
    pub fn for_status(status: Option<&str>) -> Self {
        match status {
            Some("completed") => Self::Success,
            Some("in_progress") => Self::Warning,
            Some("failed") => Self::Danger,
            _ => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_percentage_zero_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(format_percentage(percentage(0, 0)), "0.0%");
    }

    #[test]
    fn test_percentage_one_decimal() {
        assert_eq!(format_percentage(percentage(3, 4)), "75.0%");
        assert_eq!(format_percentage(percentage(1, 3)), "33.3%");
        assert_eq!(format_percentage(percentage(2, 3)), "66.7%");
        assert_eq!(format_percentage(f64::NAN), "0.0%");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(125)), "2:05");
        assert_eq!(format_duration(Some(59)), "0:59");
        assert_eq!(format_duration(Some(600)), "10:00");
        assert_eq!(format_duration(None), "N/A");
        assert_eq!(format_duration(Some(0)), "N/A");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(42.0), "42s");
        assert_eq!(format_seconds(42.5), "42.5s");
        assert_eq!(format_seconds(10.333333), "10.33s");
        assert_eq!(format_seconds(0.0), "0s");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_timestamp(Some(ts)), "2024-03-01 09:05:00");
        assert_eq!(format_timestamp(None), "N/A");
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(StatusBadge::for_status(Some("completed")), StatusBadge::Success);
        assert_eq!(StatusBadge::for_status(Some("in_progress")), StatusBadge::Warning);
        assert_eq!(StatusBadge::for_status(Some("failed")), StatusBadge::Danger);
        assert_eq!(StatusBadge::for_status(Some("ringing")), StatusBadge::Info);
        assert_eq!(StatusBadge::for_status(None), StatusBadge::Info);
        assert_eq!(StatusBadge::Danger.to_string(), "danger");
    }
}
