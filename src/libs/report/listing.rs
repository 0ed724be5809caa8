//! Per-entry listing shown above the daily report.

use super::aggregate::EntryFilter;
use super::grouping::UNASSIGNED;
use super::snapshot::Snapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryLine {
    pub id: i64,
    pub client: String,
    pub project: String,
    pub stage: String,
    pub task: String,
    pub start: String,
    pub end: String,
}

/// Entries passing `filter`, resolved to display labels and ordered by start.
///
/// Missing or unresolvable references render as "Unassigned" and a running
/// entry shows `-` as its end.
pub fn list_entries(snapshot: &Snapshot, filter: &EntryFilter) -> Vec<EntryLine> {
    let mut entries: Vec<_> = snapshot.entries().iter().filter(|e| filter.matches(e.start)).collect();
    entries.sort_by_key(|e| (e.start, e.id));

    entries
        .into_iter()
        .map(|entry| {
            let joined = snapshot.resolve(entry);
            let or_unassigned = |name: Option<String>| name.unwrap_or_else(|| UNASSIGNED.to_string());
            EntryLine {
                id: entry.id,
                client: or_unassigned(joined.client.map(|c| c.name.clone())),
                project: or_unassigned(joined.project.map(|p| p.label())),
                stage: or_unassigned(joined.stage.map(|s| s.name.clone())),
                task: or_unassigned(joined.task.map(|t| t.name.clone())),
                start: entry.start.format("%H:%M").to_string(),
                end: entry.end.map_or_else(|| "-".to_string(), |end| end.format("%H:%M").to_string()),
            }
        })
        .collect()
}
