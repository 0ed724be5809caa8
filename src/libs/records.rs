//! Record types shared by the store and the reporting engine.
//!
//! These mirror the rows of the `clients`, `projects`, `stages`, `tasks` and
//! `time_entries` tables. The reporting engine only ever reads them.

use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    pub code: String,
    pub sub_code: Option<String>,
    pub name: String,
    pub client_id: i64,
}

impl Project {
    /// Canonical display label: `code[: sub_code]: name`.
    ///
    /// The same string is used as the grouping component for the project
    /// dimension, so two projects that render identically share a row.
    ///
    /// ```rust
    /// use timesheet::libs::records::Project;
    ///
    /// let project = Project {
    ///     id: 1,
    ///     code: "P100".to_string(),
    ///     sub_code: Some("02".to_string()),
    ///     name: "Harbour Bridge".to_string(),
    ///     client_id: 1,
    /// };
    /// assert_eq!(project.label(), "P100: 02: Harbour Bridge");
    /// ```
    pub fn label(&self) -> String {
        match self.sub_code.as_deref().filter(|s| !s.is_empty()) {
            Some(sub_code) => format!("{}: {}: {}", self.code, sub_code, self.name),
            None => format!("{}: {}", self.code, self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub project_id: Option<i64>,
    pub stage_id: Option<i64>,
}

/// A logged interval of work.
///
/// `end` is `None` while the entry is still running.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,
    pub stage_id: i64,
    pub task_id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(end: Option<NaiveDateTime>) -> TimeEntry {
        TimeEntry {
            id: 1,
            user_id: 1,
            stage_id: 1,
            task_id: None,
            start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            end,
        }
    }

    #[test]
    fn test_entry_without_end_is_open() {
        assert!(entry(None).is_open());
        let end = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert!(!entry(Some(end)).is_open());
    }

    #[test]
    fn test_project_label_skips_empty_sub_code() {
        let project = Project {
            id: 1,
            code: "P100".to_string(),
            sub_code: Some(String::new()),
            name: "Bridge".to_string(),
            client_id: 1,
        };
        assert_eq!(project.label(), "P100: Bridge");
    }
}
