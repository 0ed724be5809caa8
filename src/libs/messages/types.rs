#[derive(Debug, Clone)]
pub enum Message {
    // === CLIENT MESSAGES ===
    ClientCreated(String),
    ClientDeleted(i64),
    ClientNotFound(i64),
    ClientInUse(i64),
    ClientsEmpty,

    // === PROJECT MESSAGES ===
    ProjectCreated(String),
    ProjectUpdated(String),
    ProjectDeleted(i64),
    ProjectNotFound(i64),
    ProjectInUse(i64),
    ProjectsEmpty,

    // === STAGE MESSAGES ===
    StageCreated(String),
    StageUpdated(String),
    StageDeleted(i64),
    StageNotFound(i64),
    StageInUse(i64),
    StagesEmpty,

    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskDeleted(i64),
    TaskNotFound(i64),
    TaskInUse(i64),
    TasksEmpty,

    // === ENTRY MESSAGES ===
    EntryAdded(i64, String, String), // id, start, end
    EntryUpdated(i64),
    EntryDeleted(i64),
    EntryNotFound(i64),
    EntryStarted(i64, String), // id, start
    EntryStopped(i64, String), // id, duration
    EntryAlreadyOpen(i64),
    NoOpenEntry,
    EntryEndNotAfterStart(String, String), // start, end
    EntriesHeader(String),                 // date
    NoEntriesForDate(String),              // date
    ConfirmDeleteEntry(i64),

    // === REPORT MESSAGES ===
    ReportEmpty(String), // title
    ReportTotal(String), // hours
    OpenEntriesExcluded(usize),
    DanglingEntriesUnassigned(usize),
    InvalidDateFormat(String),
    InvalidTimeFormat(String),
    WeekRequiresYear,

    // === EXPORT MESSAGES ===
    ExportingReport(String, String), // kind, format
    ExportCompleted(String),         // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    ConfigModuleEntry,
    PromptSelectModules,
    PromptDatabasePath,
    PromptTimeIncrement,
    PromptDefaultStart,
    PromptUserId,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseUpToDate,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
