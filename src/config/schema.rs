//! Configuration schema definitions.
//!
//! This module defines the project configuration: compiler settings, named
//! networks, block explorer access, the deployment plan and the web server.
//! All types derive Serde traits for deserialization from `buddha.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for a project.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Solidity compiler version the artifacts were built with.
    pub solidity: String,

    /// Directory holding compiled contract artifacts.
    pub artifacts_dir: String,

    /// Network used when none is given on the command line.
    pub default_network: String,

    /// Named networks.
    pub networks: BTreeMap<String, NetworkConfig>,

    /// Block explorer settings.
    pub etherscan: EtherscanConfig,

    /// Deployment plan.
    pub deploy: DeployConfig,

    /// Web front end settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert("localhost".to_string(), NetworkConfig::default());
        networks.insert(
            "rinkeby".to_string(),
            NetworkConfig {
                url: String::new(),
                chain_id: 4,
                ..NetworkConfig::default()
            },
        );

        Self {
            solidity: "0.8.4".to_string(),
            artifacts_dir: "artifacts".to_string(),
            default_network: "localhost".to_string(),
            networks,
            etherscan: EtherscanConfig::default(),
            deploy: DeployConfig::default(),
            server: ServerConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, UnknownNetwork> {
        self.networks.get(name).ok_or_else(|| UnknownNetwork {
            name: name.to_string(),
            known: self.networks.keys().cloned().collect(),
        })
    }
}

/// A network name that is not present in the configuration.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown network '{name}' (configured: {})", known.join(", "))]
pub struct UnknownNetwork {
    pub name: String,
    pub known: Vec<String>,
}

/// JSON-RPC network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL. `rul` is accepted for older config files.
    #[serde(alias = "rul")]
    pub url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 4 for Rinkeby, 31337 for a local node).
    pub chain_id: u64,

    /// Hex-encoded private keys. The first one signs deployments.
    #[serde(skip_serializing)]
    pub accounts: Vec<String>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations to wait for after inclusion.
    pub confirmation_blocks: u32,

    /// Gas price multiplier (1.0 = node price, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            accounts: Vec::new(),
            rpc_timeout_secs: 10,
            confirmation_blocks: 0,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 500,
        }
    }
}

/// Block explorer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EtherscanConfig {
    /// API key. Usually supplied through `ETHERSCAN_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API endpoint.
    pub api_url: String,
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api-rinkeby.etherscan.io/api".to_string(),
        }
    }
}

/// Deployment plan and confirmation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Contracts to deploy, in order.
    pub contracts: Vec<ContractSpec>,

    /// Maximum time to wait for a creation transaction to be mined.
    pub confirmation_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            contracts: vec![
                ContractSpec::new("BuddhaNFT", ["base_uri"]),
                ContractSpec::new("NFTMarketplace", [] as [&str; 0]),
            ],
            confirmation_timeout_secs: 120,
            poll_interval_ms: 2000,
        }
    }
}

/// One contract in the deployment plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractSpec {
    /// Artifact name (`<name>.json` under the artifacts directory).
    pub name: String,

    /// Constructor arguments, coerced to the constructor's parameter types.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ContractSpec {
    pub fn new<I, S>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Web front end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
