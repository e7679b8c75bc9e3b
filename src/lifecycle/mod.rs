//! Lifecycle management for the web front end.
//!
//! # Data Flow
//! ```text
//! signals.rs: Ctrl+C / SIGTERM
//!     → shutdown.rs: Shutdown::trigger(reason)
//!     → web server stops accepting, drains in-flight requests, exits
//! ```
//!
//! Command-line subcommands other than `serve` run to completion and do not
//! install signal handlers.

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownReason};
pub use signals::wait_for_signal;
