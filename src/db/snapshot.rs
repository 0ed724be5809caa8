//! Loads a report [`Snapshot`] from the database.

use super::db::Db;
use super::{clients, entries, projects, stages, tasks};
use crate::libs::report::{EntryFilter, Snapshot};
use anyhow::Result;
use tracing::debug;

/// Reads the entries admitted by `filter`'s date bounds together with every
/// client, project, stage and task.
///
/// The filter itself is applied again by the engine; this only narrows the
/// query.
pub fn load(db: &Db, filter: &EntryFilter) -> Result<Snapshot> {
    let entries = entries::select_between(&db.conn, filter.bounds())?;
    debug!(entries = entries.len(), ?filter, "Loaded entries for snapshot");

    Ok(Snapshot::new(
        entries,
        clients::select_all(&db.conn)?,
        projects::select_all(&db.conn)?,
        stages::select_all(&db.conn)?,
        tasks::select_all(&db.conn)?,
    ))
}
