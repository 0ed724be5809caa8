//! Stage records. A stage always belongs to one project.

use super::db::Db;
use crate::libs::records::Stage;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_STAGE: &str = "INSERT INTO stages (name, project_id) VALUES (?1, ?2)";
const SELECT_STAGES: &str = "SELECT id, name, project_id FROM stages ORDER BY project_id, name";
const SELECT_STAGES_BY_PROJECT: &str = "SELECT id, name, project_id FROM stages WHERE project_id = ?1 ORDER BY name";
const SELECT_STAGE_BY_ID: &str = "SELECT id, name, project_id FROM stages WHERE id = ?1";
const UPDATE_STAGE: &str = "UPDATE stages SET name = ?2, project_id = ?3 WHERE id = ?1";
const DELETE_STAGE: &str = "DELETE FROM stages WHERE id = ?1";
const STAGE_IN_USE: &str = "SELECT EXISTS (SELECT 1 FROM time_entries WHERE stage_id = ?1) OR EXISTS (SELECT 1 FROM tasks WHERE stage_id = ?1)";

pub struct Stages {
    conn: Connection,
}

impl Stages {
    pub fn new() -> Result<Stages> {
        Ok(Stages { conn: Db::new()?.conn })
    }

    pub fn insert(&mut self, name: &str, project_id: i64) -> Result<Stage> {
        self.conn.execute(INSERT_STAGE, params![name, project_id])?;

        Ok(Stage {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            project_id,
        })
    }

    pub fn fetch(&mut self) -> Result<Vec<Stage>> {
        Ok(select_all(&self.conn)?)
    }

    pub fn fetch_by_project(&mut self, project_id: i64) -> Result<Vec<Stage>> {
        let mut stmt = self.conn.prepare(SELECT_STAGES_BY_PROJECT)?;
        let stages = stmt.query_map(params![project_id], from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(stages)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Stage>> {
        Ok(self.conn.query_row(SELECT_STAGE_BY_ID, params![id], from_row).optional()?)
    }

    pub fn update(&mut self, stage: &Stage) -> Result<usize> {
        Ok(self.conn.execute(UPDATE_STAGE, params![stage.id, stage.name, stage.project_id])?)
    }

    /// True while time entries or tasks still reference the stage.
    pub fn in_use(&mut self, id: i64) -> Result<bool> {
        Ok(self.conn.query_row(STAGE_IN_USE, params![id], |row| row.get(0))?)
    }

    pub fn delete(&mut self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_STAGE, params![id])?)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<Stage> {
    Ok(Stage {
        id: row.get(0)?,
        name: row.get(1)?,
        project_id: row.get(2)?,
    })
}

pub(crate) fn select_all(conn: &Connection) -> rusqlite::Result<Vec<Stage>> {
    let mut stmt = conn.prepare(SELECT_STAGES)?;
    let stages = stmt.query_map([], from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(stages)
}
