//! ISO-8601 week arithmetic.
//!
//! Week 1 of a year is the week that contains January 4th (equivalently, the
//! week holding the year's first Thursday). Weeks run Monday to Sunday.

use super::error::ReportError;
use chrono::{Datelike, Days, NaiveDate};

/// Short weekday labels in ISO order, used as pivot columns.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A resolved ISO week: its Monday and the seven dates it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
    pub start: NaiveDate,
    pub days: [NaiveDate; 7],
}

impl IsoWeek {
    /// The ISO week that `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        let start = date - Days::new(u64::from(date.weekday().num_days_from_monday()));
        Self {
            year: iso.year(),
            week: iso.week(),
            start,
            days: week_days(start),
        }
    }

    /// Sunday of the week.
    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// Column label (`Mon`..`Sun`) for a date inside the week.
    pub fn weekday_label(&self, date: NaiveDate) -> Option<&'static str> {
        self.days.iter().position(|d| *d == date).map(|i| WEEKDAY_LABELS[i])
    }
}

/// Number of ISO weeks in `year` (52 or 53).
///
/// December 28th always lies in the last ISO week of its year.
pub fn weeks_in_year(year: i32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, 12, 28).map(|d| d.iso_week().week())
}

/// Resolves `(year, week)` into the Monday-first dates of that ISO week.
///
/// # Errors
///
/// [`ReportError::InvalidWeek`] when `week` is outside `1..=weeks_in_year(year)`
/// or the year cannot be represented.
///
/// ```rust
/// use chrono::NaiveDate;
/// use timesheet::libs::report::calendar::resolve_iso_week;
///
/// let week = resolve_iso_week(2024, 10).unwrap();
/// assert_eq!(week.start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// ```
pub fn resolve_iso_week(year: i32, week: u32) -> Result<IsoWeek, ReportError> {
    let invalid = |max| ReportError::InvalidWeek { year, week, max };

    let max = weeks_in_year(year).ok_or_else(|| invalid(0))?;
    if week == 0 || week > max {
        return Err(invalid(max));
    }

    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).ok_or_else(|| invalid(max))?;
    let first_monday = jan4 - Days::new(u64::from(jan4.weekday().num_days_from_monday()));
    let start = first_monday
        .checked_add_days(Days::new(u64::from(week - 1) * 7))
        .ok_or_else(|| invalid(max))?;

    Ok(IsoWeek {
        year,
        week,
        start,
        days: week_days(start),
    })
}

fn week_days(monday: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [monday; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = monday + Days::new(offset as u64);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_week_ten_2024() {
        let week = resolve_iso_week(2024, 10).unwrap();
        assert_eq!(week.start, date(2024, 3, 4));
        assert_eq!(week.end(), date(2024, 3, 10));
        assert_eq!(week.days[2], date(2024, 3, 6));
    }

    #[test]
    fn test_week_one_can_start_in_previous_year() {
        // January 1st 2025 is a Wednesday, so week 1 starts on December 30th.
        let week = resolve_iso_week(2025, 1).unwrap();
        assert_eq!(week.start, date(2024, 12, 30));
    }

    #[test]
    fn test_week_one_can_start_after_new_year() {
        // January 1st 2021 is a Friday and belongs to 2020-W53.
        let week = resolve_iso_week(2021, 1).unwrap();
        assert_eq!(week.start, date(2021, 1, 4));
    }

    #[test]
    fn test_long_year_has_week_53() {
        assert_eq!(weeks_in_year(2020), Some(53));
        let week = resolve_iso_week(2020, 53).unwrap();
        assert_eq!(week.start, date(2020, 12, 28));
        assert_eq!(week.end(), date(2021, 1, 3));
    }

    #[test]
    fn test_week_53_rejected_in_short_year() {
        assert_eq!(weeks_in_year(2024), Some(52));
        assert_eq!(
            resolve_iso_week(2024, 53).unwrap_err(),
            ReportError::InvalidWeek {
                year: 2024,
                week: 53,
                max: 52
            }
        );
    }

    #[test]
    fn test_week_zero_rejected() {
        assert!(matches!(resolve_iso_week(2024, 0), Err(ReportError::InvalidWeek { week: 0, .. })));
    }

    #[test]
    fn test_days_are_consecutive_from_monday() {
        let week = resolve_iso_week(2023, 52).unwrap();
        assert_eq!(week.start.weekday(), chrono::Weekday::Mon);
        for pair in week.days.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }

    #[test]
    fn test_containing_agrees_with_resolve() {
        let week = IsoWeek::containing(date(2024, 3, 7));
        assert_eq!(week, resolve_iso_week(2024, 10).unwrap());

        let week = IsoWeek::containing(date(2021, 1, 2));
        assert_eq!((week.year, week.week), (2020, 53));
    }

    #[test]
    fn test_weekday_label() {
        let week = resolve_iso_week(2024, 10).unwrap();
        assert_eq!(week.weekday_label(date(2024, 3, 6)), Some("Wed"));
        assert_eq!(week.weekday_label(date(2024, 3, 10)), Some("Sun"));
        assert_eq!(week.weekday_label(date(2024, 3, 11)), None);
        assert!(week.contains(date(2024, 3, 4)));
        assert!(!week.contains(date(2024, 3, 3)));
    }
}
