//! Project records.

use super::db::Db;
use crate::libs::records::Project;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_PROJECT: &str = "INSERT INTO projects (code, sub_code, name, client_id) VALUES (?1, ?2, ?3, ?4)";
const SELECT_PROJECTS: &str = "SELECT id, code, sub_code, name, client_id FROM projects ORDER BY code, sub_code, name";
const SELECT_PROJECT_BY_ID: &str = "SELECT id, code, sub_code, name, client_id FROM projects WHERE id = ?1";
const UPDATE_PROJECT: &str = "UPDATE projects SET code = ?2, sub_code = ?3, name = ?4, client_id = ?5 WHERE id = ?1";
const DELETE_PROJECT: &str = "DELETE FROM projects WHERE id = ?1";
const PROJECT_IN_USE: &str = "SELECT EXISTS (SELECT 1 FROM stages WHERE project_id = ?1) OR EXISTS (SELECT 1 FROM tasks WHERE project_id = ?1)";

pub struct Projects {
    conn: Connection,
}

impl Projects {
    pub fn new() -> Result<Projects> {
        Ok(Projects { conn: Db::new()?.conn })
    }

    /// Stores a project; `id` on the argument is ignored.
    pub fn insert(&mut self, project: &Project) -> Result<Project> {
        self.conn.execute(
            INSERT_PROJECT,
            params![project.code, project.sub_code, project.name, project.client_id],
        )?;

        Ok(Project {
            id: self.conn.last_insert_rowid(),
            ..project.clone()
        })
    }

    pub fn fetch(&mut self) -> Result<Vec<Project>> {
        Ok(select_all(&self.conn)?)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Project>> {
        Ok(self.conn.query_row(SELECT_PROJECT_BY_ID, params![id], from_row).optional()?)
    }

    pub fn update(&mut self, project: &Project) -> Result<usize> {
        Ok(self.conn.execute(
            UPDATE_PROJECT,
            params![project.id, project.code, project.sub_code, project.name, project.client_id],
        )?)
    }

    /// True while stages or tasks still reference the project.
    pub fn in_use(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(PROJECT_IN_USE, params![id], |row| row.get(0))?)
    }

    pub fn delete(&mut self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_PROJECT, params![id])?)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        code: row.get(1)?,
        sub_code: row.get(2)?,
        name: row.get(3)?,
        client_id: row.get(4)?,
    })
}

pub(crate) fn select_all(conn: &Connection) -> rusqlite::Result<Vec<Project>> {
    let mut stmt = conn.prepare(SELECT_PROJECTS)?;
    let projects = stmt.query_map([], from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(projects)
}
