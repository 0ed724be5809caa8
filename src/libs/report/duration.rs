//! Interval to duration conversion.

use super::error::ReportError;
use chrono::NaiveDateTime;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Length of `start..end` in fractional hours.
///
/// The value is never truncated or rounded; rounding is left to report
/// emission so that sums do not accumulate rounding error.
///
/// # Errors
///
/// Returns [`ReportError::InvalidInterval`] when `end` is before `start`.
pub fn duration_hours(start: NaiveDateTime, end: NaiveDateTime) -> Result<f64, ReportError> {
    if end < start {
        return Err(ReportError::InvalidInterval { start, end });
    }
    Ok((end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR)
}

/// Rounds hours to two decimal places for display and export.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 4, 17).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_working_day() {
        assert_eq!(duration_hours(at(9, 0, 0), at(17, 30, 0)).unwrap(), 8.5);
    }

    #[test]
    fn test_fractional_hours_keep_seconds() {
        let hours = duration_hours(at(9, 0, 0), at(9, 0, 36)).unwrap();
        assert!((hours - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_length_interval() {
        assert_eq!(duration_hours(at(12, 0, 0), at(12, 0, 0)).unwrap(), 0.0);
    }

    #[test]
    fn test_reversed_interval_is_rejected() {
        let err = duration_hours(at(17, 0, 0), at(9, 0, 0)).unwrap_err();
        assert_eq!(
            err,
            ReportError::InvalidInterval {
                start: at(17, 0, 0),
                end: at(9, 0, 0),
            }
        );
    }

    #[test]
    fn test_crossing_midnight() {
        let start = at(22, 0, 0);
        let end = NaiveDate::from_ymd_opt(2024, 4, 18).unwrap().and_hms_opt(1, 15, 0).unwrap();
        assert_eq!(duration_hours(start, end).unwrap(), 3.25);
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(8.504), 8.5);
        assert_eq!(round_hours(1.0 / 3.0), 0.33);
        assert_eq!(round_hours(0.0), 0.0);
    }
}
