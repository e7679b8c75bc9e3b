//! Network provider shared with the page tree.

use crate::blockchain::BlockchainClient;
use crate::config::NetworkConfig;

/// Wraps the RPC client for the selected network.
///
/// A library without a client still renders; pages show the network as
/// disconnected.
#[derive(Debug, Clone)]
pub struct Web3Library {
    network: String,
    chain_id: u64,
    client: Option<BlockchainClient>,
}

impl Web3Library {
    pub fn new(network: impl Into<String>, chain_id: u64, client: Option<BlockchainClient>) -> Self {
        Self {
            network: network.into(),
            chain_id,
            client,
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn client(&self) -> Option<&BlockchainClient> {
        self.client.as_ref()
    }

    /// Whether the node currently answers.
    pub async fn is_connected(&self) -> bool {
        match &self.client {
            Some(client) => client.is_healthy().await,
            None => false,
        }
    }
}

/// Build the library for `network`. Connection problems are logged, not fatal.
pub async fn get_library(name: &str, network: &NetworkConfig) -> Web3Library {
    let client = match BlockchainClient::new(network.clone(), None).await {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(network = name, error = %e, "Serving without a network provider");
            None
        }
    };
    Web3Library::new(name, network.chain_id, client)
}
