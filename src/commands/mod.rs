//! Command-line interface.
//!
//! One module per top-level command; each exposes a clap `Args` struct and
//! a `cmd` function.

pub mod client;
pub mod entry;
pub mod export;
pub mod init;
pub mod project;
pub mod report;
pub mod stage;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage clients")]
    Client(client::ClientArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Manage project stages")]
    Stage(stage::StageArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Log, edit and list time entries")]
    Entry(entry::EntryArgs),
    #[command(about = "Show a report")]
    Report(report::ReportArgs),
    #[command(about = "Export a report to CSV, JSON or Excel")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Client(args) => client::cmd(args),
            Commands::Project(args) => project::cmd(args),
            Commands::Stage(args) => stage::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Entry(args) => entry::cmd(args),
            Commands::Report(args) => report::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
