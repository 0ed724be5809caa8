//! Reshapes bucketed groups into one column per bucket.

use super::aggregate::Group;
use super::duration::round_hours;
use super::grouping::GroupKey;

#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub key: GroupKey,
    /// Rounded sums, one per entry of `bucket_order`.
    pub columns: Vec<f64>,
    /// Rounded sum of the unrounded column values.
    pub total: f64,
}

/// One row per group with a column for every label in `bucket_order`.
///
/// Buckets without entries are `0.0`. The total is rounded once from the
/// unrounded bucket sums, never summed from the rounded columns. Rows are
/// ordered by project label, then stage label.
pub fn pivot(groups: &[Group], bucket_order: &[&str]) -> Vec<PivotRow> {
    let mut rows: Vec<PivotRow> = groups
        .iter()
        .map(|group| {
            let raw: Vec<f64> = bucket_order.iter().map(|label| group.bucket(label)).collect();
            PivotRow {
                key: group.key.clone(),
                columns: raw.iter().copied().map(round_hours).collect(),
                total: round_hours(raw.iter().sum()),
            }
        })
        .collect();

    rows.sort_by(|a, b| (&a.key.project, &a.key.stage).cmp(&(&b.key.project, &b.key.stage)).then_with(|| a.key.cmp(&b.key)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::report::calendar::WEEKDAY_LABELS;
    use crate::libs::report::grouping::Label;
    use std::collections::BTreeMap;

    fn group(project: &str, stage: &str, buckets: &[(&str, f64)]) -> Group {
        let buckets: BTreeMap<String, f64> = buckets.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        Group {
            key: GroupKey {
                project: Some(Label::Named(project.to_string())),
                stage: Some(Label::Named(stage.to_string())),
                task: None,
                client: None,
            },
            total: buckets.values().sum(),
            buckets,
        }
    }

    #[test]
    fn test_single_day_fills_other_columns_with_zero() {
        let rows = pivot(&[group("P1: Bridge", "Design", &[("Wed", 2.5)])], &WEEKDAY_LABELS);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].columns, vec![0.0, 0.0, 2.5, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(rows[0].total, 2.5);
    }

    #[test]
    fn test_total_rounds_unrounded_days() {
        // Each day rounds down to 1.11 but together they make 3.342.
        let rows = pivot(
            &[group("P1: Bridge", "Design", &[("Mon", 1.114), ("Tue", 1.114), ("Wed", 1.114)])],
            &WEEKDAY_LABELS,
        );

        assert_eq!(&rows[0].columns[..3], &[1.11, 1.11, 1.11]);
        assert_eq!(rows[0].total, 3.34);
    }

    #[test]
    fn test_rows_sorted_by_project_then_stage() {
        let rows = pivot(
            &[
                group("P2: Tower", "Build", &[("Mon", 1.0)]),
                group("P1: Bridge", "Test", &[("Tue", 1.0)]),
                group("P1: Bridge", "Design", &[("Fri", 1.0)]),
            ],
            &WEEKDAY_LABELS,
        );

        let order: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.key.project.as_ref().unwrap().to_string(), r.key.stage.as_ref().unwrap().to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("P1: Bridge".to_string(), "Design".to_string()),
                ("P1: Bridge".to_string(), "Test".to_string()),
                ("P2: Tower".to_string(), "Build".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_buckets_are_ignored_by_columns() {
        let rows = pivot(&[group("P1: Bridge", "Design", &[("Mon", 1.0)])], &["Tue"]);
        assert_eq!(rows[0].columns, vec![0.0]);
        assert_eq!(rows[0].total, 0.0);
    }
}
