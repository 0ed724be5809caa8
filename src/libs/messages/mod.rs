//! User-facing messages.
//!
//! Commands describe what happened with a [`Message`] variant and print it
//! through the `msg_*` macros, which route to `tracing` in debug mode.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
