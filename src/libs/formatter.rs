//! Display formatting for hours, durations and clock times.
//!
//! ```rust
//! use timesheet::libs::formatter::{format_duration, format_hours};
//! use chrono::Duration;
//!
//! assert_eq!(format_hours(8.5), "8.50");
//! assert_eq!(format_duration(&(Duration::hours(2) + Duration::minutes(30))), "02:30");
//! ```

use chrono::{Duration, NaiveDateTime};

/// Decimal hours with two places, as shown in every report table.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// `HH:MM`; negative durations show as `00:00`.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

pub fn format_clock(time: &NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hours_use_two_decimals() {
        assert_eq!(format_hours(8.5), "8.50");
        assert_eq!(format_hours(0.0), "0.00");
        assert_eq!(format_hours(0.01), "0.01");
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        assert_eq!(format_duration(&Duration::minutes(-45)), "00:00");
        assert_eq!(format_duration(&Duration::minutes(605)), "10:05");
    }

    #[test]
    fn test_clock_drops_seconds() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(9, 15, 42).unwrap();
        assert_eq!(format_clock(&time), "09:15");
    }
}
