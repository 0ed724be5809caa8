pub mod clients;
pub mod db;
pub mod entries;
pub mod migrations;
pub mod projects;
pub mod snapshot;
pub mod stages;
pub mod tasks;
