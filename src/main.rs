use anyhow::Result;
use timesheet::commands::Cli;
use timesheet::libs::logging::enable_logging;

fn main() -> Result<()> {
    enable_logging()?;
    Cli::menu()
}
