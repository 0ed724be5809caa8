//! Tracing subscriber setup.
//!
//! Nothing is installed unless `TIMESHEET_DEBUG` or `RUST_LOG` is set; in
//! that case the `msg_*` macros log through the same subscriber.

use super::messages::macros::is_debug_mode;
use anyhow::Result;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when present, otherwise everything from this crate at
/// `debug`.
pub fn enable_logging() -> Result<()> {
    if !is_debug_mode() {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME").replace('-', "_"))),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
