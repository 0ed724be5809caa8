//! Immutable view over fetched records.
//!
//! The store materialises a `Snapshot` once per report; the engine resolves
//! every entry's foreign keys against it without touching the database.

use crate::libs::records::{Client, Project, Stage, Task, TimeEntry};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<TimeEntry>,
    clients: HashMap<i64, Client>,
    projects: HashMap<i64, Project>,
    stages: HashMap<i64, Stage>,
    tasks: HashMap<i64, Task>,
}

/// An entry joined to whatever dimension records its keys resolve to.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'a> {
    pub entry: &'a TimeEntry,
    pub client: Option<&'a Client>,
    pub project: Option<&'a Project>,
    pub stage: Option<&'a Stage>,
    pub task: Option<&'a Task>,
}

impl Joined<'_> {
    /// True when the stage, project or client chain is broken, or the task
    /// id points nowhere.
    pub fn is_dangling(&self) -> bool {
        self.stage.is_none()
            || self.project.is_none()
            || self.client.is_none()
            || (self.entry.task_id.is_some() && self.task.is_none())
    }
}

impl Snapshot {
    pub fn new(
        entries: Vec<TimeEntry>,
        clients: Vec<Client>,
        projects: Vec<Project>,
        stages: Vec<Stage>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            entries,
            clients: clients.into_iter().map(|c| (c.id, c)).collect(),
            projects: projects.into_iter().map(|p| (p.id, p)).collect(),
            stages: stages.into_iter().map(|s| (s.id, s)).collect(),
            tasks: tasks.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    /// Follows `stage -> project -> client` and `task` for one entry.
    pub fn resolve<'a>(&'a self, entry: &'a TimeEntry) -> Joined<'a> {
        let stage = self.stages.get(&entry.stage_id);
        let project = stage.and_then(|s| self.projects.get(&s.project_id));
        let client = project.and_then(|p| self.clients.get(&p.client_id));
        let task = entry.task_id.and_then(|id| self.tasks.get(&id));

        Joined {
            entry,
            client,
            project,
            stage,
            task,
        }
    }
}
