use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DB_FILE_NAME: &str = "timesheet.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database (or the default one in the data
    /// directory) and brings its schema up to date.
    pub fn new() -> Result<Db> {
        Self::open(&Self::path()?)
    }

    pub fn open(path: &Path) -> Result<Db> {
        debug!(path = %path.display(), "Opening database");
        let mut conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the database without running migrations.
    pub fn new_without_migrations() -> Result<Connection> {
        Ok(Connection::open(Self::path()?)?)
    }

    pub fn path() -> Result<PathBuf> {
        match Config::read()?.database.and_then(|d| d.path) {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}
