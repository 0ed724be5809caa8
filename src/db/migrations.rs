//! Versioned schema migrations.
//!
//! Each migration is applied at most once and recorded in the `migrations`
//! table. Opening an older database brings it up to date.
//!
//! ```rust,no_run
//! use timesheet::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("timesheet.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SCHEMA_VERSION: &str = "SELECT COALESCE(MAX(version), 0) FROM migrations";
const RECORD_MIGRATION: &str = "INSERT INTO migrations (version, name) VALUES (?1, ?2)";
const APPLIED_MIGRATIONS: &str = "SELECT version, name FROM migrations ORDER BY version";

struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Every migration, in ascending version order.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_tables",
        up: create_tables,
    },
    Migration {
        version: 2,
        name: "add_time_entry_indices",
        up: add_time_entry_indices,
    },
];

fn create_tables(tx: &Transaction) -> rusqlite::Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY,
            code TEXT NOT NULL,
            sub_code TEXT,
            name TEXT NOT NULL,
            client_id INTEGER NOT NULL,
            FOREIGN KEY (client_id) REFERENCES clients(id)
        );
        CREATE TABLE IF NOT EXISTS stages (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            project_id INTEGER NOT NULL,
            FOREIGN KEY (project_id) REFERENCES projects(id)
        );
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            project_id INTEGER,
            stage_id INTEGER,
            FOREIGN KEY (project_id) REFERENCES projects(id),
            FOREIGN KEY (stage_id) REFERENCES stages(id)
        );
        CREATE TABLE IF NOT EXISTS time_entries (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL DEFAULT 1,
            stage_id INTEGER NOT NULL,
            task_id INTEGER,
            started_at TIMESTAMP NOT NULL,
            ended_at TIMESTAMP,
            FOREIGN KEY (stage_id) REFERENCES stages(id),
            FOREIGN KEY (task_id) REFERENCES tasks(id)
        );",
    )
}

// Report queries filter on started_at and join through the foreign keys.
fn add_time_entry_indices(tx: &Transaction) -> rusqlite::Result<()> {
    tx.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_time_entries_start ON time_entries(started_at);
        CREATE INDEX IF NOT EXISTS idx_time_entries_stage_id ON time_entries(stage_id);
        CREATE INDEX IF NOT EXISTS idx_time_entries_task_id ON time_entries(task_id);
        CREATE INDEX IF NOT EXISTS idx_stages_project_id ON stages(project_id);
        CREATE INDEX IF NOT EXISTS idx_projects_client_id ON projects(client_id);",
    )
}

/// Applies the registered migrations to a connection.
#[derive(Default)]
pub struct MigrationManager;

impl MigrationManager {
    pub fn new() -> Self {
        Self
    }

    pub fn latest_version(&self) -> u32 {
        MIGRATIONS.last().map_or(0, |m| m.version)
    }

    /// Brings the schema up to [`MigrationManager::latest_version`].
    ///
    /// Pending migrations share one transaction, so a failure leaves the
    /// database at its previous version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current = schema_version(conn)?;
        let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }
        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));
            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e.into());
            }
            tx.execute(RECORD_MIGRATION, params![migration.version, migration.name])?;
        }
        tx.commit()?;

        msg_debug!(Message::AllMigrationsCompleted);
        Ok(())
    }

    /// `(version, name)` of every applied migration, oldest first.
    pub fn applied(&self, conn: &Connection) -> Result<Vec<(u32, String)>> {
        let mut stmt = conn.prepare(APPLIED_MIGRATIONS)?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Version 0 means no migration table yet.
fn schema_version(conn: &Connection) -> Result<u32> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'migrations')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }
    Ok(conn.query_row(SCHEMA_VERSION, [], |row| row.get(0))?)
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    schema_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    Ok(schema_version(conn)? < MigrationManager::new().latest_version())
}
