//! Composite grouping keys.
//!
//! A key carries one tagged label per selected dimension. Labels stay typed
//! until output so that an unassigned component never collides with a real
//! record that happens to render the same text.

use super::snapshot::Joined;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Rendered text of [`Label::Unassigned`].
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Dimension {
    Client,
    Project,
    Stage,
    Task,
}

impl Dimension {
    /// Column header used in report rows.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Client => "client",
            Dimension::Project => "project",
            Dimension::Stage => "stage",
            Dimension::Task => "task",
        }
    }
}

/// The set of dimensions a report groups by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dimensions(BTreeSet<Dimension>);

impl Dimensions {
    pub fn of(dimensions: &[Dimension]) -> Self {
        Self(dimensions.iter().copied().collect())
    }

    pub fn contains(&self, dimension: Dimension) -> bool {
        self.0.contains(&dimension)
    }

    /// Selected dimensions in column order: client, project, stage, task.
    pub fn iter(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Named(String),
    Unassigned,
}

impl Label {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => Label::Named(name.to_string()),
            None => Label::Unassigned,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Named(name) => name,
            Label::Unassigned => UNASSIGNED,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Rendered text first; a named label sorts before an unassigned one with the same text.
impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str()
            .cmp(other.as_str())
            .then_with(|| matches!(self, Label::Unassigned).cmp(&matches!(other, Label::Unassigned)))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Grouping key. `None` means the dimension is not part of the report.
///
/// Field order defines output order: project, stage, task, then client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub project: Option<Label>,
    pub stage: Option<Label>,
    pub task: Option<Label>,
    pub client: Option<Label>,
}

impl GroupKey {
    pub fn get(&self, dimension: Dimension) -> Option<&Label> {
        match dimension {
            Dimension::Client => self.client.as_ref(),
            Dimension::Project => self.project.as_ref(),
            Dimension::Stage => self.stage.as_ref(),
            Dimension::Task => self.task.as_ref(),
        }
    }
}

/// Builds the key for one joined entry over the selected dimensions.
///
/// Broken or missing references map to [`Label::Unassigned`].
pub fn build_key(joined: &Joined<'_>, dimensions: &Dimensions) -> GroupKey {
    let pick = |dimension: Dimension, name: Option<String>| {
        dimensions.contains(dimension).then(|| Label::from_name(name.as_deref()))
    };

    GroupKey {
        project: pick(Dimension::Project, joined.project.map(|p| p.label())),
        stage: pick(Dimension::Stage, joined.stage.map(|s| s.name.clone())),
        task: pick(Dimension::Task, joined.task.map(|t| t.name.clone())),
        client: pick(Dimension::Client, joined.client.map(|c| c.name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::records::{Client, Project, Stage, Task, TimeEntry};
    use chrono::NaiveDate;

    fn entry(task_id: Option<i64>) -> TimeEntry {
        let day = NaiveDate::from_ymd_opt(2024, 4, 17).unwrap();
        TimeEntry {
            id: 1,
            user_id: 1,
            stage_id: 10,
            task_id,
            start: day.and_hms_opt(9, 0, 0).unwrap(),
            end: day.and_hms_opt(10, 0, 0),
        }
    }

    fn project(sub_code: Option<&str>) -> Project {
        Project {
            id: 5,
            code: "P100".to_string(),
            sub_code: sub_code.map(str::to_string),
            name: "Harbour".to_string(),
            client_id: 3,
        }
    }

    #[test]
    fn test_project_label_skips_empty_sub_code() {
        assert_eq!(project(None).label(), "P100: Harbour");
        assert_eq!(project(Some("")).label(), "P100: Harbour");
        assert_eq!(project(Some("B")).label(), "P100: B: Harbour");
    }

    #[test]
    fn test_key_uses_only_selected_dimensions() {
        let client = Client { id: 3, name: "Acme".to_string() };
        let project = project(Some("B"));
        let stage = Stage { id: 10, name: "Design".to_string(), project_id: 5 };
        let task = Task { id: 7, name: "Drawings".to_string(), project_id: Some(5), stage_id: Some(10) };
        let entry = entry(Some(7));
        let joined = Joined {
            entry: &entry,
            client: Some(&client),
            project: Some(&project),
            stage: Some(&stage),
            task: Some(&task),
        };

        let key = build_key(&joined, &Dimensions::of(&[Dimension::Project, Dimension::Stage]));
        assert_eq!(key.project, Some(Label::Named("P100: B: Harbour".to_string())));
        assert_eq!(key.stage, Some(Label::Named("Design".to_string())));
        assert_eq!(key.task, None);
        assert_eq!(key.client, None);
    }

    #[test]
    fn test_missing_records_become_unassigned() {
        let entry = entry(Some(99));
        let joined = Joined {
            entry: &entry,
            client: None,
            project: None,
            stage: None,
            task: None,
        };
        let all = Dimensions::of(&[Dimension::Client, Dimension::Project, Dimension::Stage, Dimension::Task]);

        let key = build_key(&joined, &all);
        for dimension in all.iter() {
            assert_eq!(key.get(dimension), Some(&Label::Unassigned));
        }
        assert!(joined.is_dangling());
    }

    #[test]
    fn test_unassigned_never_equals_a_real_name() {
        let real = Label::Named(UNASSIGNED.to_string());
        assert_ne!(real, Label::Unassigned);
        assert_eq!(real.to_string(), Label::Unassigned.to_string());
        assert!(real < Label::Unassigned);
    }

    #[test]
    fn test_keys_order_by_rendered_labels() {
        let key = |project: &str, stage: &str| GroupKey {
            project: Some(Label::Named(project.to_string())),
            stage: Some(Label::Named(stage.to_string())),
            task: None,
            client: None,
        };
        let mut keys = vec![key("P2: B", "Build"), key("P1: A", "Test"), key("P1: A", "Design")];
        keys.sort();
        assert_eq!(keys, vec![key("P1: A", "Design"), key("P1: A", "Test"), key("P2: B", "Build")]);
    }
}
