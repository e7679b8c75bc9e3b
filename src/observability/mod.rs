//! Observability.
//!
//! Structured logging through `tracing`. Events go to stderr so stdout only
//! carries command output such as deployed addresses.

pub mod logging;

pub use logging::init_logging;
