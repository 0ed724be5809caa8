//! Library modules behind the `timesheet` commands.
//!
//! - `report`: the reporting engine (durations, ISO weeks, grouping, pivot)
//! - `records`: row types shared by the store and the engine
//! - `config`, `data_storage`, `logging`: settings, file locations, tracing
//! - `messages`, `view`, `formatter`, `export`: output
//! - `time`: parsing and snapping of user-entered times

pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod logging;
pub mod messages;
pub mod records;
pub mod report;
pub mod time;
pub mod view;
