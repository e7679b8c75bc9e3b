//! Web front end.
//!
//! # Data Flow
//! ```text
//! Request
//!     → server.rs (request id, trace, timeout)
//!     → handler
//!     → shell.rs: WalletProvider → StyleProvider → Layout → page (pages.rs)
//!     → HTML response
//! ```
//!
//! `provider.rs` builds the [`Web3Library`] once at startup; every request
//! shares it through axum state.

pub mod pages;
pub mod provider;
pub mod server;
pub mod shell;

pub use provider::{get_library, Web3Library};
pub use server::WebServer;
pub use shell::AppShell;
