//! Filtering, grouping and summation of time entries.

use super::calendar::IsoWeek;
use super::duration::duration_hours;
use super::error::ReportError;
use super::grouping::{build_key, Dimensions, GroupKey};
use super::snapshot::Snapshot;
use crate::libs::records::TimeEntry;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Derives a bucket label (for example a weekday) from an entry.
pub type BucketFn<'a> = &'a dyn Fn(&TimeEntry) -> String;

/// Predicate over an entry's start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    All,
    Date(NaiveDate),
    /// Both ends inclusive.
    Range { from: NaiveDate, to: NaiveDate },
    Week(IsoWeek),
}

impl EntryFilter {
    pub fn range(from: NaiveDate, to: NaiveDate) -> Result<Self, ReportError> {
        if from > to {
            return Err(ReportError::InvalidRange { from, to });
        }
        Ok(EntryFilter::Range { from, to })
    }

    pub fn matches(&self, start: NaiveDateTime) -> bool {
        let date = start.date();
        match self {
            EntryFilter::All => true,
            EntryFilter::Date(day) => date == *day,
            EntryFilter::Range { from, to } => *from <= date && date <= *to,
            EntryFilter::Week(week) => week.contains(date),
        }
    }

    /// First and last start date the filter admits, if bounded.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            EntryFilter::All => None,
            EntryFilter::Date(day) => Some((*day, *day)),
            EntryFilter::Range { from, to } => Some((*from, *to)),
            EntryFilter::Week(week) => Some((week.start, week.end())),
        }
    }
}

/// Unrounded sums for one grouping key.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    pub buckets: BTreeMap<String, f64>,
    pub total: f64,
}

impl Group {
    pub fn bucket(&self, label: &str) -> f64 {
        self.buckets.get(label).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Sorted by key.
    pub groups: Vec<Group>,
    /// Unrounded sum over every counted entry.
    pub total: f64,
    /// Entries in the period that have no end yet; not part of any sum.
    pub open_entries: usize,
    /// Entries whose references did not resolve and were grouped as unassigned.
    pub dangling_entries: usize,
}

/// Sums the durations of every entry that passes `filter`, grouped by the
/// key built over `dimensions` and, when `bucket` is given, by bucket label.
///
/// # Errors
///
/// [`ReportError::Aggregation`] if any counted entry ends before it starts.
/// Nothing is returned in that case: one bad record invalidates the totals.
pub fn aggregate(
    snapshot: &Snapshot,
    dimensions: &Dimensions,
    filter: &EntryFilter,
    bucket: Option<BucketFn<'_>>,
) -> Result<Aggregation, ReportError> {
    let mut groups: HashMap<GroupKey, Group> = HashMap::new();
    let mut total = 0.0;
    let mut open_entries = 0;
    let mut dangling_entries = 0;

    for entry in snapshot.entries().iter().filter(|e| filter.matches(e.start)) {
        let Some(end) = entry.end else {
            debug!(entry_id = entry.id, "Skipping open entry");
            open_entries += 1;
            continue;
        };

        let hours = duration_hours(entry.start, end).map_err(|_| ReportError::Aggregation {
            entry_id: entry.id,
            start: entry.start,
            end,
        })?;

        let joined = snapshot.resolve(entry);
        if joined.is_dangling() {
            warn!(
                entry_id = entry.id,
                stage_id = entry.stage_id,
                task_id = entry.task_id,
                "Dangling reference, grouping as unassigned"
            );
            dangling_entries += 1;
        }

        let key = build_key(&joined, dimensions);
        let group = groups.entry(key.clone()).or_insert_with(|| Group {
            key,
            buckets: BTreeMap::new(),
            total: 0.0,
        });
        if let Some(bucket) = bucket {
            *group.buckets.entry(bucket(entry)).or_insert(0.0) += hours;
        }
        group.total += hours;
        total += hours;
    }

    let mut groups: Vec<Group> = groups.into_values().collect();
    groups.sort_by(|a, b| a.key.cmp(&b.key));

    Ok(Aggregation {
        groups,
        total,
        open_entries,
        dangling_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::records::{Client, Project, Stage, Task};
    use crate::libs::report::duration::round_hours;
    use crate::libs::report::grouping::{Dimension, Label};
    use chrono::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn entry(id: i64, stage_id: i64, task_id: Option<i64>, start: NaiveDateTime, minutes: Option<i64>) -> TimeEntry {
        TimeEntry {
            id,
            user_id: 1,
            stage_id,
            task_id,
            start,
            end: minutes.map(|m| start + Duration::minutes(m)),
        }
    }

    fn snapshot(entries: Vec<TimeEntry>) -> Snapshot {
        Snapshot::new(
            entries,
            vec![Client { id: 1, name: "Acme".to_string() }],
            vec![Project {
                id: 1,
                code: "P1".to_string(),
                sub_code: None,
                name: "Bridge".to_string(),
                client_id: 1,
            }],
            vec![
                Stage { id: 1, name: "Design".to_string(), project_id: 1 },
                Stage { id: 2, name: "Build".to_string(), project_id: 1 },
            ],
            vec![Task { id: 1, name: "Drawings".to_string(), project_id: Some(1), stage_id: Some(1) }],
        )
    }

    fn named(s: &str) -> Option<Label> {
        Some(Label::Named(s.to_string()))
    }

    #[test]
    fn test_groups_and_sums_by_stage() {
        let at = |h| day(17).and_hms_opt(h, 0, 0).unwrap();
        let snapshot = snapshot(vec![
            entry(1, 1, Some(1), at(9), Some(90)),
            entry(2, 2, None, at(11), Some(60)),
            entry(3, 1, Some(1), at(13), Some(30)),
        ]);
        let dims = Dimensions::of(&[Dimension::Project, Dimension::Stage]);

        let result = aggregate(&snapshot, &dims, &EntryFilter::Date(day(17)), None).unwrap();

        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].key.stage, named("Build"));
        assert_eq!(result.groups[0].total, 1.0);
        assert_eq!(result.groups[1].key.stage, named("Design"));
        assert_eq!(result.groups[1].total, 2.0);
        assert_eq!(result.total, 3.0);
    }

    fn entries_of(millis: &[i64]) -> Vec<TimeEntry> {
        let start = day(17).and_hms_opt(8, 0, 0).unwrap();
        millis
            .iter()
            .enumerate()
            .map(|(i, ms)| TimeEntry {
                id: i as i64 + 1,
                user_id: 1,
                stage_id: 1,
                task_id: None,
                start,
                end: Some(start + Duration::milliseconds(*ms)),
            })
            .collect()
    }

    #[test]
    fn test_accumulates_unrounded() {
        // 1.111h, 1.111h and 1.113h.
        let snapshot = snapshot(entries_of(&[3_999_600, 3_999_600, 4_006_800]));
        let dims = Dimensions::of(&[Dimension::Stage]);

        let result = aggregate(&snapshot, &dims, &EntryFilter::All, None).unwrap();

        assert!((result.groups[0].total - 3.335).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_happens_after_summation() {
        // Three entries of 1.114h: 3.342h in total, but 3 x 1.11 if rounded first.
        let snapshot = snapshot(entries_of(&[4_010_400, 4_010_400, 4_010_400]));
        let dims = Dimensions::of(&[Dimension::Stage]);

        let result = aggregate(&snapshot, &dims, &EntryFilter::All, None).unwrap();

        let pre_rounded: f64 = (0..3).map(|_| round_hours(1.114)).sum();
        assert_eq!(round_hours(result.groups[0].total), 3.34);
        assert_eq!(round_hours(pre_rounded), 3.33);
    }

    #[test]
    fn test_unresolved_task_is_unassigned_and_counted() {
        let at = |h| day(17).and_hms_opt(h, 0, 0).unwrap();
        let snapshot = snapshot(vec![entry(1, 1, Some(1), at(9), Some(60)), entry(2, 1, Some(42), at(10), Some(120))]);
        let dims = Dimensions::of(&[Dimension::Project, Dimension::Stage, Dimension::Task]);

        let result = aggregate(&snapshot, &dims, &EntryFilter::All, None).unwrap();

        let unassigned = result.groups.iter().find(|g| g.key.task == Some(Label::Unassigned)).unwrap();
        assert_eq!(unassigned.total, 2.0);
        assert_eq!(result.total, 3.0);
        assert_eq!(result.dangling_entries, 1);
        let summed: f64 = result.groups.iter().map(|g| g.total).sum();
        assert_eq!(summed, result.total);
    }

    #[test]
    fn test_dangling_stage_is_kept() {
        let start = day(17).and_hms_opt(9, 0, 0).unwrap();
        let snapshot = snapshot(vec![entry(1, 77, None, start, Some(45))]);
        let dims = Dimensions::of(&[Dimension::Client, Dimension::Project, Dimension::Stage]);

        let result = aggregate(&snapshot, &dims, &EntryFilter::All, None).unwrap();

        assert_eq!(result.groups.len(), 1);
        let key = &result.groups[0].key;
        assert_eq!(key.client, Some(Label::Unassigned));
        assert_eq!(key.project, Some(Label::Unassigned));
        assert_eq!(key.stage, Some(Label::Unassigned));
        assert_eq!(result.total, 0.75);
    }

    #[test]
    fn test_negative_duration_fails_whole_report() {
        let start = day(17).and_hms_opt(17, 0, 0).unwrap();
        let snapshot = snapshot(vec![entry(1, 1, None, start, Some(60)), entry(2, 1, None, start, Some(-480))]);
        let dims = Dimensions::of(&[Dimension::Stage]);

        let err = aggregate(&snapshot, &dims, &EntryFilter::All, None).unwrap_err();
        assert!(matches!(err, ReportError::Aggregation { entry_id: 2, .. }));
    }

    #[test]
    fn test_open_entries_are_counted_not_summed() {
        let at = |h| day(17).and_hms_opt(h, 0, 0).unwrap();
        let snapshot = snapshot(vec![entry(1, 1, None, at(9), Some(60)), entry(2, 1, None, at(10), None)]);
        let dims = Dimensions::of(&[Dimension::Stage]);

        let result = aggregate(&snapshot, &dims, &EntryFilter::All, None).unwrap();

        assert_eq!(result.open_entries, 1);
        assert_eq!(result.total, 1.0);
    }

    #[test]
    fn test_range_filter_is_inclusive() {
        let filter = EntryFilter::range(day(10), day(12)).unwrap();
        assert!(filter.matches(day(10).and_hms_opt(0, 0, 0).unwrap()));
        assert!(filter.matches(day(12).and_hms_opt(0, 0, 0).unwrap()));
        assert!(filter.matches(day(12).and_hms_opt(23, 59, 59).unwrap()));
        assert!(!filter.matches(day(13).and_hms_opt(0, 0, 0).unwrap()));
        assert!(!filter.matches(day(9).and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert_eq!(
            EntryFilter::range(day(12), day(10)).unwrap_err(),
            ReportError::InvalidRange { from: day(12), to: day(10) }
        );
    }

    #[test]
    fn test_buckets_split_by_label() {
        let snapshot = snapshot(vec![
            entry(1, 1, None, day(15).and_hms_opt(9, 0, 0).unwrap(), Some(60)),
            entry(2, 1, None, day(17).and_hms_opt(9, 0, 0).unwrap(), Some(120)),
        ]);
        let dims = Dimensions::of(&[Dimension::Stage]);
        let by_day = |e: &TimeEntry| e.start.format("%a").to_string();

        let result = aggregate(&snapshot, &dims, &EntryFilter::All, Some(&by_day)).unwrap();

        let group = &result.groups[0];
        assert_eq!(group.bucket("Mon"), 1.0);
        assert_eq!(group.bucket("Wed"), 2.0);
        assert_eq!(group.bucket("Fri"), 0.0);
        assert_eq!(group.total, 3.0);
    }
}
