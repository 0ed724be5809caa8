use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Failures raised by the reporting engine.
///
/// Any of these aborts the whole report: a total built from a partially
/// valid set of entries would be misleading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval { start: NaiveDateTime, end: NaiveDateTime },

    #[error("Invalid ISO week {week} for {year} (the year has {max} weeks)")]
    InvalidWeek { year: i32, week: u32, max: u32 },

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("Time entry {entry_id} ends before it starts ({start} - {end})")]
    Aggregation {
        entry_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}
