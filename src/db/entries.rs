//! Time entry storage.
//!
//! Timestamps are stored as local `NaiveDateTime` text (`YYYY-MM-DD HH:MM:SS`),
//! so date filters use SQLite's `date()` on the stored value.

use super::db::Db;
use crate::libs::records::TimeEntry;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, user_id, stage_id, task_id, started_at, ended_at";
const INSERT_ENTRY: &str = "INSERT INTO time_entries (user_id, stage_id, task_id, started_at, ended_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_ENTRY: &str = "UPDATE time_entries SET stage_id = ?2, task_id = ?3, started_at = ?4, ended_at = ?5 WHERE id = ?1";
const CLOSE_ENTRY: &str = "UPDATE time_entries SET ended_at = ?2 WHERE id = ?1 AND ended_at IS NULL";
const DELETE_ENTRY: &str = "DELETE FROM time_entries WHERE id = ?1";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_DATE_BETWEEN: &str = "WHERE date(started_at) BETWEEN date(?1) AND date(?2)";
const WHERE_LATEST_CLOSED: &str = "WHERE date(started_at) = date(?1) AND ended_at IS NOT NULL ORDER BY ended_at DESC, id DESC LIMIT 1";
const WHERE_OPEN: &str = "WHERE user_id = ?1 AND ended_at IS NULL ORDER BY started_at DESC, id DESC LIMIT 1";
const ORDER_BY_START: &str = "ORDER BY started_at, id";

pub struct Entries {
    conn: Connection,
}

impl Entries {
    pub fn new() -> Result<Entries> {
        Ok(Entries { conn: Db::new()?.conn })
    }

    /// Stores an entry and returns its new id; `entry.id` is ignored.
    pub fn insert(&mut self, entry: &TimeEntry) -> Result<i64> {
        self.conn.execute(
            INSERT_ENTRY,
            params![entry.user_id, entry.stage_id, entry.task_id, entry.start, entry.end],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn fetch_by_date(&mut self, date: NaiveDate) -> Result<Vec<TimeEntry>> {
        Ok(select_between(&self.conn, Some((date, date)))?)
    }

    pub fn fetch_between(&mut self, from: NaiveDate, to: NaiveDate) -> Result<Vec<TimeEntry>> {
        Ok(select_between(&self.conn, Some((from, to)))?)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<TimeEntry>> {
        let sql = format!("SELECT {} FROM time_entries {}", COLUMNS, WHERE_ID);
        Ok(self.conn.query_row(&sql, params![id], from_row).optional()?)
    }

    /// The closed entry of `date` that ends last.
    pub fn fetch_latest(&mut self, date: NaiveDate) -> Result<Option<TimeEntry>> {
        let sql = format!("SELECT {} FROM time_entries {}", COLUMNS, WHERE_LATEST_CLOSED);
        Ok(self.conn.query_row(&sql, params![date], from_row).optional()?)
    }

    /// The running entry of `user_id`, if any.
    pub fn fetch_open(&mut self, user_id: i64) -> Result<Option<TimeEntry>> {
        let sql = format!("SELECT {} FROM time_entries {}", COLUMNS, WHERE_OPEN);
        Ok(self.conn.query_row(&sql, params![user_id], from_row).optional()?)
    }

    /// Sets the end of a running entry. Returns 0 when the entry is missing
    /// or already closed.
    pub fn close(&mut self, id: i64, end: NaiveDateTime) -> Result<usize> {
        Ok(self.conn.execute(CLOSE_ENTRY, params![id, end])?)
    }

    pub fn update(&mut self, entry: &TimeEntry) -> Result<usize> {
        Ok(self.conn.execute(
            UPDATE_ENTRY,
            params![entry.id, entry.stage_id, entry.task_id, entry.start, entry.end],
        )?)
    }

    pub fn delete(&mut self, id: i64) -> Result<usize> {
        Ok(self.conn.execute(DELETE_ENTRY, params![id])?)
    }
}

fn from_row(row: &Row) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        stage_id: row.get(2)?,
        task_id: row.get(3)?,
        start: row.get(4)?,
        end: row.get(5)?,
    })
}

/// Entries whose start date falls within `bounds` (inclusive), or every
/// entry when unbounded.
pub(crate) fn select_between(conn: &Connection, bounds: Option<(NaiveDate, NaiveDate)>) -> rusqlite::Result<Vec<TimeEntry>> {
    let entries = match bounds {
        Some((from, to)) => {
            let sql = format!("SELECT {} FROM time_entries {} {}", COLUMNS, WHERE_DATE_BETWEEN, ORDER_BY_START);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![from, to], from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
        None => {
            let sql = format!("SELECT {} FROM time_entries {}", COLUMNS, ORDER_BY_START);
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
    };

    Ok(entries)
}
