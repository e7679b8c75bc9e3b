//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkConfig (URL, chain id, accounts from PRIVATE_KEY)
//!     → wallet.rs (key loading)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (nonce tracking, build, broadcast, confirm)
//!     → accounts.rs (configured keys, else eth_accounts)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod accounts;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use accounts::list_accounts;
pub use client::BlockchainClient;
pub use transaction::{Sender, TxBuilder};
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus};
pub use wallet::Wallet;
