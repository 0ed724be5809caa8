//! Reporting engine.
//!
//! Turns a snapshot of time entries and their dimension records into
//! duration summaries:
//!
//! ```text
//! Snapshot ─▶ filter ─▶ duration ─▶ grouping key ─▶ sum ─▶ (pivot) ─▶ Report
//! ```
//!
//! Everything here is synchronous and side-effect free apart from tracing.
//! Durations are summed unrounded and rounded to two decimals only when the
//! report rows are emitted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timesheet::db::{db::Db, snapshot};
//! use timesheet::libs::report::ReportRequest;
//!
//! let request = ReportRequest::weekly_pivot(2024, 10)?;
//! let snapshot = snapshot::load(&Db::new()?, request.filter())?;
//! let report = request.run(&snapshot)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod calendar;
pub mod duration;
pub mod error;
pub mod grouping;
pub mod listing;
pub mod pivot;
pub mod request;
pub mod snapshot;

pub use aggregate::{aggregate, Aggregation, EntryFilter, Group};
pub use calendar::{resolve_iso_week, IsoWeek};
pub use duration::duration_hours;
pub use error::ReportError;
pub use grouping::{build_key, Dimension, Dimensions, GroupKey, Label};
pub use request::{Cell, Report, ReportKind, ReportRequest, ReportRow};
pub use snapshot::Snapshot;
