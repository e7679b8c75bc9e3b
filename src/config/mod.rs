//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! buddha.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (overlay <NETWORK>_URL, PRIVATE_KEY, ETHERSCAN_API_KEY)
//!     → validation.rs (semantic checks)
//!     → ProjectConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; running without a config file targets a local node
//! - Environment values are taken verbatim, with empty or absent fallbacks
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    ContractSpec, DeployConfig, EtherscanConfig, NetworkConfig, ObservabilityConfig,
    ProjectConfig, ServerConfig,
};
