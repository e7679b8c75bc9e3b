//! Block explorer verification status.

pub mod etherscan;

pub use etherscan::{EtherscanClient, EtherscanError, VerificationStatus};
