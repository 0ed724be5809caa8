//! Task records. Project and stage links are both optional.

use super::db::Db;
use crate::libs::records::Task;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (name, project_id, stage_id) VALUES (?1, ?2, ?3)";
const SELECT_TASKS: &str = "SELECT id, name, project_id, stage_id FROM tasks ORDER BY name";
const SELECT_TASK_BY_ID: &str = "SELECT id, name, project_id, stage_id FROM tasks WHERE id = ?1";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?2, project_id = ?3, stage_id = ?4 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const TASK_IN_USE: &str = "SELECT EXISTS (SELECT 1 FROM time_entries WHERE task_id = ?1)";

pub struct Tasks {
    conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Tasks> {
        Ok(Tasks { conn: Db::new()?.conn })
    }

    pub fn insert(&mut self, name: &str, project_id: Option<i64>, stage_id: Option<i64>) -> Result<Task> {
        self.conn.execute(INSERT_TASK, params![name, project_id, stage_id])?;

        Ok(Task {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            project_id,
            stage_id,
        })
    }

    pub fn fetch(&mut self) -> Result<Vec<Task>> {
        Ok(select_all(&self.conn)?)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Task>> {
        Ok(self.conn.query_row(SELECT_TASK_BY_ID, params![id], from_row).optional()?)
    }

    pub fn update(&mut self, task: &Task) -> Result<usize> {
        Ok(self.conn.execute(UPDATE_TASK, params![task.id, task.name, task.project_id, task.stage_id])?)
    }

    /// True while time entries still reference the task.
    pub fn in_use(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(TASK_IN_USE, params![id], |row| row.get(0))?)
    }

    pub fn delete(&mut self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_TASK, params![id])?)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        project_id: row.get(2)?,
        stage_id: row.get(3)?,
    })
}

pub(crate) fn select_all(conn: &Connection) -> rusqlite::Result<Vec<Task>> {
    let mut stmt = conn.prepare(SELECT_TASKS)?;
    let tasks = stmt.query_map([], from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tasks)
}
