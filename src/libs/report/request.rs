//! Report requests and the rows they produce.

use super::aggregate::{aggregate, Aggregation, EntryFilter};
use super::calendar::{resolve_iso_week, IsoWeek, WEEKDAY_LABELS};
use super::duration::round_hours;
use super::error::ReportError;
use super::grouping::{Dimension, Dimensions, GroupKey};
use super::pivot::pivot;
use super::snapshot::Snapshot;
use crate::libs::records::TimeEntry;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

pub const DURATION_COLUMN: &str = "duration";
pub const TOTAL_COLUMN: &str = "Total";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    DailyByTask,
    DailyByStage,
    RangeByProject,
    WeeklyPivot,
}

impl ReportKind {
    pub fn default_dimensions(self) -> Dimensions {
        use Dimension::*;
        match self {
            ReportKind::DailyByTask => Dimensions::of(&[Client, Project, Stage, Task]),
            ReportKind::DailyByStage => Dimensions::of(&[Client, Project, Stage]),
            ReportKind::RangeByProject => Dimensions::of(&[Client, Project]),
            ReportKind::WeeklyPivot => Dimensions::of(&[Project, Stage]),
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::DailyByTask => "daily_by_task",
            ReportKind::DailyByStage => "daily_by_stage",
            ReportKind::RangeByProject => "range_by_project",
            ReportKind::WeeklyPivot => "weekly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    kind: ReportKind,
    filter: EntryFilter,
    week: Option<IsoWeek>,
    dimensions: Dimensions,
}

impl ReportRequest {
    pub fn daily_by_task(date: NaiveDate) -> Self {
        Self::plain(ReportKind::DailyByTask, EntryFilter::Date(date))
    }

    pub fn daily_by_stage(date: NaiveDate) -> Self {
        Self::plain(ReportKind::DailyByStage, EntryFilter::Date(date))
    }

    pub fn range_by_project(from: NaiveDate, to: NaiveDate) -> Result<Self, ReportError> {
        Ok(Self::plain(ReportKind::RangeByProject, EntryFilter::range(from, to)?))
    }

    pub fn weekly_pivot(year: i32, week: u32) -> Result<Self, ReportError> {
        let week = resolve_iso_week(year, week)?;
        Ok(Self {
            kind: ReportKind::WeeklyPivot,
            filter: EntryFilter::Week(week),
            week: Some(week),
            dimensions: ReportKind::WeeklyPivot.default_dimensions(),
        })
    }

    fn plain(kind: ReportKind, filter: EntryFilter) -> Self {
        Self {
            kind,
            filter,
            week: None,
            dimensions: kind.default_dimensions(),
        }
    }

    /// Replaces the default grouping dimensions. An empty set is ignored.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        if !dimensions.is_empty() {
            self.dimensions = dimensions;
        }
        self
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    pub fn title(&self) -> String {
        match (&self.filter, self.week) {
            (_, Some(week)) => format!(
                "Timesheet for {}-W{:02} ({} - {})",
                week.year,
                week.week,
                week.start.format("%Y-%m-%d"),
                week.end().format("%Y-%m-%d")
            ),
            (EntryFilter::Date(date), _) => format!("Timesheet for {}", date.format("%Y-%m-%d")),
            (EntryFilter::Range { from, to }, _) => {
                format!("Timesheet for {} - {}", from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))
            }
            _ => "Timesheet".to_string(),
        }
    }

    /// Runs the request against a snapshot.
    ///
    /// # Errors
    ///
    /// Any [`ReportError`] from aggregation; no partial report is produced.
    #[instrument(skip(self, snapshot), fields(kind = ?self.kind))]
    pub fn run(&self, snapshot: &Snapshot) -> Result<Report, ReportError> {
        let report = match self.week {
            Some(week) => {
                let weekday = |entry: &TimeEntry| week.weekday_label(entry.start.date()).unwrap_or_default().to_string();
                let aggregation = aggregate(snapshot, &self.dimensions, &self.filter, Some(&weekday))?;
                self.pivot_report(&aggregation)
            }
            None => {
                let aggregation = aggregate(snapshot, &self.dimensions, &self.filter, None)?;
                self.flat_report(&aggregation)
            }
        };
        debug!(rows = report.rows.len(), total = report.total_hours, "Report built");
        Ok(report)
    }

    fn key_cells(&self, key: &GroupKey) -> Vec<Cell> {
        self.dimensions
            .iter()
            .map(|d| Cell::Text(key.get(d).map(|l| l.to_string()).unwrap_or_default()))
            .collect()
    }

    fn key_columns(&self) -> Vec<String> {
        self.dimensions.iter().map(|d| d.column().to_string()).collect()
    }

    fn flat_report(&self, aggregation: &Aggregation) -> Report {
        let mut columns = self.key_columns();
        columns.push(DURATION_COLUMN.to_string());

        let rows = aggregation
            .groups
            .iter()
            .map(|group| {
                let mut cells = self.key_cells(&group.key);
                cells.push(Cell::Hours(round_hours(group.total)));
                ReportRow { cells }
            })
            .collect();

        self.finish(columns, rows, aggregation)
    }

    fn pivot_report(&self, aggregation: &Aggregation) -> Report {
        let mut columns = self.key_columns();
        columns.extend(WEEKDAY_LABELS.iter().map(|d| d.to_string()));
        columns.push(TOTAL_COLUMN.to_string());

        let rows = pivot(&aggregation.groups, &WEEKDAY_LABELS)
            .into_iter()
            .map(|row| {
                let mut cells = self.key_cells(&row.key);
                cells.extend(row.columns.into_iter().map(Cell::Hours));
                cells.push(Cell::Hours(row.total));
                ReportRow { cells }
            })
            .collect();

        self.finish(columns, rows, aggregation)
    }

    fn finish(&self, columns: Vec<String>, rows: Vec<ReportRow>, aggregation: &Aggregation) -> Report {
        Report {
            kind: self.kind,
            title: self.title(),
            columns,
            rows,
            total_hours: round_hours(aggregation.total),
            open_entries: aggregation.open_entries,
            dangling_entries: aggregation.dangling_entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Hours(f64),
}

impl Cell {
    pub fn as_hours(&self) -> Option<f64> {
        match self {
            Cell::Hours(h) => Some(*h),
            Cell::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Hours(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub cells: Vec<Cell>,
}

/// Output of a report: column labels plus rows of cells in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
    /// Rounded once from the unrounded grand total.
    pub total_hours: f64,
    pub open_entries: usize,
    pub dangling_entries: usize,
}

impl Report {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Value of `column` in `row`.
    pub fn value<'a>(&self, row: &'a ReportRow, column: &str) -> Option<&'a Cell> {
        self.column_index(column).and_then(|i| row.cells.get(i))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::records::{Client, Project, Stage};
    use chrono::NaiveDateTime;

    fn snapshot(entries: &[(i64, i64, &str, Option<&str>)]) -> Snapshot {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        Snapshot::new(
            entries
                .iter()
                .map(|(id, stage_id, start, end)| TimeEntry {
                    id: *id,
                    user_id: 1,
                    stage_id: *stage_id,
                    task_id: None,
                    start: at(start),
                    end: end.map(at),
                })
                .collect(),
            vec![Client { id: 1, name: "Acme".into() }],
            vec![
                Project {
                    id: 1,
                    code: "B2".into(),
                    sub_code: None,
                    name: "Tunnel".into(),
                    client_id: 1,
                },
                Project {
                    id: 2,
                    code: "A1".into(),
                    sub_code: None,
                    name: "Bridge".into(),
                    client_id: 1,
                },
            ],
            vec![
                Stage { id: 10, name: "Survey".into(), project_id: 1 },
                Stage { id: 20, name: "Design".into(), project_id: 2 },
            ],
            vec![],
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_titles_name_the_period() {
        assert_eq!(ReportRequest::daily_by_stage(date("2024-03-04")).title(), "Timesheet for 2024-03-04");
        assert_eq!(
            ReportRequest::range_by_project(date("2024-03-01"), date("2024-03-07")).unwrap().title(),
            "Timesheet for 2024-03-01 - 2024-03-07"
        );
        assert_eq!(
            ReportRequest::weekly_pivot(2024, 10).unwrap().title(),
            "Timesheet for 2024-W10 (2024-03-04 - 2024-03-10)"
        );
    }

    #[test]
    fn test_invalid_week_is_rejected_before_running() {
        assert!(matches!(ReportRequest::weekly_pivot(2024, 53), Err(ReportError::InvalidWeek { .. })));
    }

    #[test]
    fn test_flat_report_rounds_each_row_and_the_total_once() {
        // 20 min + 20 min + 20 min on one stage; 20 min on another.
        let snapshot = snapshot(&[
            (1, 10, "2024-03-04 09:00", Some("2024-03-04 09:20")),
            (2, 10, "2024-03-04 10:00", Some("2024-03-04 10:20")),
            (3, 10, "2024-03-04 11:00", Some("2024-03-04 11:20")),
            (4, 20, "2024-03-04 12:00", Some("2024-03-04 12:20")),
        ]);
        let report = ReportRequest::daily_by_stage(date("2024-03-04")).run(&snapshot).unwrap();

        assert_eq!(report.columns, ["client", "project", "stage", DURATION_COLUMN]);
        assert_eq!(report.rows.len(), 2);
        // A1 sorts before B2.
        assert_eq!(report.value(&report.rows[0], "project").and_then(Cell::as_text), Some("A1: Bridge"));
        assert_eq!(report.value(&report.rows[0], DURATION_COLUMN).and_then(Cell::as_hours), Some(0.33));
        assert_eq!(report.value(&report.rows[1], DURATION_COLUMN).and_then(Cell::as_hours), Some(1.0));
        assert_eq!(report.total_hours, 1.33);
    }

    #[test]
    fn test_weekly_report_has_weekday_columns() {
        let snapshot = snapshot(&[
            (1, 10, "2024-03-06 09:00", Some("2024-03-06 11:00")),
            (2, 20, "2024-03-10 09:00", Some("2024-03-10 09:45")),
            (3, 20, "2024-03-11 09:00", Some("2024-03-11 10:00")),
            (4, 20, "2024-03-08 09:00", None),
        ]);
        let report = ReportRequest::weekly_pivot(2024, 10).unwrap().run(&snapshot).unwrap();

        assert_eq!(report.columns, ["project", "stage", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun", TOTAL_COLUMN]);
        assert_eq!(report.rows.len(), 2);
        let bridge = &report.rows[0];
        assert_eq!(report.value(bridge, "Sun").and_then(Cell::as_hours), Some(0.75));
        assert_eq!(report.value(bridge, TOTAL_COLUMN).and_then(Cell::as_hours), Some(0.75));
        let tunnel = &report.rows[1];
        assert_eq!(report.value(tunnel, "Wed").and_then(Cell::as_hours), Some(2.0));
        assert_eq!(report.value(tunnel, "Mon").and_then(Cell::as_hours), Some(0.0));
        assert_eq!(report.total_hours, 2.75);
        assert_eq!(report.open_entries, 1);
    }

    #[test]
    fn test_dimensions_can_be_overridden() {
        let snapshot = snapshot(&[
            (1, 10, "2024-03-04 09:00", Some("2024-03-04 10:00")),
            (2, 20, "2024-03-04 10:00", Some("2024-03-04 11:00")),
        ]);
        let request = ReportRequest::daily_by_task(date("2024-03-04")).with_dimensions(Dimensions::of(&[Dimension::Client]));
        let report = request.run(&snapshot).unwrap();

        assert_eq!(report.columns, ["client", DURATION_COLUMN]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.total_hours, 2.0);
    }
}
