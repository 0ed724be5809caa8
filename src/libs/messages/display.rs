//! Text for every [`Message`] variant.
//!
//! All user-facing wording lives here so commands only pick a variant and
//! its parameters.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CLIENT MESSAGES ===
            Message::ClientCreated(name) => format!("Client '{}' created", name),
            Message::ClientDeleted(id) => format!("Client {} deleted", id),
            Message::ClientNotFound(id) => format!("Client with ID {} not found", id),
            Message::ClientInUse(id) => format!("Client {} is still used by projects and cannot be deleted", id),
            Message::ClientsEmpty => "No clients yet. Add one with `timesheet client add`.".to_string(),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(label) => format!("Project '{}' created", label),
            Message::ProjectUpdated(label) => format!("Project '{}' updated", label),
            Message::ProjectDeleted(id) => format!("Project {} deleted", id),
            Message::ProjectNotFound(id) => format!("Project with ID {} not found", id),
            Message::ProjectInUse(id) => format!("Project {} is still used by stages or tasks and cannot be deleted", id),
            Message::ProjectsEmpty => "No projects yet. Add one with `timesheet project add`.".to_string(),

            // === STAGE MESSAGES ===
            Message::StageCreated(name) => format!("Stage '{}' created", name),
            Message::StageUpdated(name) => format!("Stage '{}' updated", name),
            Message::StageDeleted(id) => format!("Stage {} deleted", id),
            Message::StageNotFound(id) => format!("Stage with ID {} not found", id),
            Message::StageInUse(id) => format!("Stage {} is still used by time entries or tasks and cannot be deleted", id),
            Message::StagesEmpty => "No stages found.".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task with ID {} not found", id),
            Message::TaskInUse(id) => format!("Task {} is still used by time entries and cannot be deleted", id),
            Message::TasksEmpty => "No tasks found.".to_string(),

            // === ENTRY MESSAGES ===
            Message::EntryAdded(id, start, end) => format!("Time entry {} added ({} - {})", id, start, end),
            Message::EntryUpdated(id) => format!("Time entry {} updated", id),
            Message::EntryDeleted(id) => format!("Time entry {} deleted", id),
            Message::EntryNotFound(id) => format!("Time entry with ID {} not found", id),
            Message::EntryStarted(id, start) => format!("Time entry {} started at {}", id, start),
            Message::EntryStopped(id, duration) => format!("Time entry {} stopped after {}", id, duration),
            Message::EntryAlreadyOpen(id) => format!("Time entry {} is still running. Stop it with `timesheet entry stop`.", id),
            Message::NoOpenEntry => "There is no running time entry.".to_string(),
            Message::EntryEndNotAfterStart(start, end) => format!("End time {} must be after start time {}", end, start),
            Message::EntriesHeader(date) => format!("All time entries for {}:", date),
            Message::NoEntriesForDate(date) => format!("No time entries found for {}.", date),
            Message::ConfirmDeleteEntry(id) => format!("Delete time entry {}?", id),

            // === REPORT MESSAGES ===
            Message::ReportEmpty(title) => format!("{}: nothing logged.", title),
            Message::ReportTotal(hours) => format!("Total: {} h", hours),
            Message::OpenEntriesExcluded(count) => format!("{} running time entr{} not included in the totals.", count, if *count == 1 { "y is" } else { "ies are" }),
            Message::DanglingEntriesUnassigned(count) => format!("{} time entr{} reference missing records and are shown as Unassigned.", count, if *count == 1 { "y" } else { "ies" }),
            Message::InvalidDateFormat(value) => format!("Invalid date '{}'. Use YYYY-MM-DD, 'today' or 'yesterday'.", value),
            Message::InvalidTimeFormat(value) => format!("Invalid time '{}'. Use HH:MM.", value),
            Message::WeekRequiresYear => "Pass both --year and --week, or neither for the current week.".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingReport(kind, format) => format!("Exporting {} report as {}...", kind, format),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigModuleDatabase => "Database".to_string(),
            Message::ConfigModuleEntry => "Time entries".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptDatabasePath => "Database file (empty for the default location)".to_string(),
            Message::PromptTimeIncrement => "Time increment in minutes".to_string(),
            Message::PromptDefaultStart => "Default start of the day (HH:MM)".to_string(),
            Message::PromptUserId => "User ID".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
