//! # timesheet
//!
//! Logs work intervals against a client / project / stage / task catalog
//! and turns them into duration reports: daily summaries, inclusive date
//! ranges, and ISO-week pivots with one column per weekday.
//!
//! - [`db`]: SQLite storage, migrations and snapshot loading
//! - [`libs`]: the reporting engine plus configuration, messages and output
//! - [`commands`]: the clap command-line surface

pub mod commands;
pub mod db;
pub mod libs;
