//! Account listing for a network.

use alloy::primitives::Address;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainResult, NetworkConfig};
use crate::blockchain::wallet::account_addresses;

/// Accounts available on `network`.
///
/// Configured private keys take precedence; without any, the node's
/// unlocked accounts (`eth_accounts`) are returned.
pub async fn list_accounts(network: &NetworkConfig) -> BlockchainResult<Vec<Address>> {
    if !network.accounts.is_empty() {
        return account_addresses(&network.accounts, network.chain_id);
    }

    let client = BlockchainClient::new(network.clone(), None).await?;
    client.get_accounts().await
}
