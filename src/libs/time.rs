//! Parsing and snapping of user-entered dates and times.

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Rounds `time` down to the previous multiple of `increment_minutes`,
/// dropping seconds. An increment of zero leaves the time unchanged.
///
/// ```rust
/// use timesheet::libs::time::snap_to_increment;
/// use chrono::NaiveDate;
///
/// let t = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(10, 52, 31).unwrap();
/// assert_eq!(snap_to_increment(t, 15).format("%H:%M:%S").to_string(), "10:45:00");
/// ```
pub fn snap_to_increment(time: NaiveDateTime, increment_minutes: u32) -> NaiveDateTime {
    if increment_minutes == 0 {
        return time;
    }

    let discard = Duration::minutes(i64::from(time.minute() % increment_minutes))
        + Duration::seconds(i64::from(time.second()))
        + Duration::nanoseconds(i64::from(time.nanosecond()));
    time - discard
}

/// Rounds `time` up to the next multiple of `increment_minutes`; times
/// already on a boundary are kept.
pub fn snap_up_to_increment(time: NaiveDateTime, increment_minutes: u32) -> NaiveDateTime {
    let down = snap_to_increment(time, increment_minutes);
    if down == time {
        down
    } else {
        down + Duration::minutes(i64::from(increment_minutes))
    }
}

/// Accepts `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDateFormat(input.to_string()))),
    }
}

/// Accepts `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| msg_error_anyhow!(Message::InvalidTimeFormat(input.to_string())))
}
