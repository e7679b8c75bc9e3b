//! Contract-creation transactions and confirmation monitoring.
//!
//! # Responsibilities
//! - Build creation transactions with gas price caps and gas estimation
//! - Broadcast them, signed by the client's wallet or by the node itself
//! - Poll for the receipt until the required depth is reached

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};

/// Account that signs creation transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Signed locally by the client's wallet (`eth_sendRawTransaction`).
    Wallet(Address),
    /// Signed by the node with one of its unlocked accounts (`eth_sendTransaction`).
    Node(Address),
}

impl Sender {
    pub fn address(&self) -> Address {
        match self {
            Self::Wallet(address) | Self::Node(address) => *address,
        }
    }
}

/// Transaction builder for contract deployments.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    client: BlockchainClient,
    sender: Option<Sender>,
    /// Next unreserved nonce, shared between clones.
    nonce: Arc<AtomicU64>,
}

impl TxBuilder {
    /// Builder signing with the client's wallet. Without one, building fails.
    pub fn new(client: BlockchainClient) -> Self {
        let sender = client.wallet().map(|w| Sender::Wallet(w.address()));
        Self {
            client,
            sender,
            nonce: Arc::default(),
        }
    }

    /// Builder whose transactions the node signs for `account`.
    pub fn with_node_account(client: BlockchainClient, account: Address) -> Self {
        Self {
            client,
            sender: Some(Sender::Node(account)),
            nonce: Arc::default(),
        }
    }

    /// Use the client's wallet when it has one, otherwise the first account
    /// the node reports through `eth_accounts`.
    pub async fn connect(client: BlockchainClient) -> BlockchainResult<Self> {
        if client.wallet().is_some() {
            return Ok(Self::new(client));
        }

        let account = client.get_accounts().await?.into_iter().next().ok_or_else(|| {
            BlockchainError::NotAvailable(
                "no deployer: set PRIVATE_KEY or unlock an account on the node".to_string(),
            )
        })?;
        tracing::info!(account = %account, "Using node-managed deployer account");
        Ok(Self::with_node_account(client, account))
    }

    /// Who signs this builder's transactions, if anyone.
    pub fn sender(&self) -> Option<Sender> {
        self.sender
    }

    fn require_sender(&self) -> BlockchainResult<Sender> {
        self.sender.ok_or_else(|| {
            BlockchainError::NotAvailable("deployment requires a wallet or a node account".to_string())
        })
    }

    /// Local nonce counter; never falls behind the node's transaction count.
    fn reserve_nonce(&self, chain_nonce: u64) -> u64 {
        self.nonce.fetch_max(chain_nonce, Ordering::SeqCst);
        self.nonce.fetch_add(1, Ordering::SeqCst)
    }

    /// Build a contract-creation request.
    ///
    /// # Arguments
    /// * `code` - Creation bytecode with ABI-encoded constructor arguments appended
    pub async fn build_deployment(&self, code: Bytes) -> BlockchainResult<TransactionRequest> {
        let from = self.require_sender()?.address();
        let chain_nonce = self.client.get_transaction_count(from).await?;

        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;

        let config = self.client.config();
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }

        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;
        let nonce = self.reserve_nonce(chain_nonce);

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(config.chain_id);

        let gas_limit = self.client.estimate_gas(&tx).await?;

        tracing::debug!(
            nonce = nonce,
            gas_price = adjusted_gas_price,
            gas_limit = gas_limit,
            "Deployment transaction built"
        );

        Ok(tx.with_gas_limit(gas_limit))
    }

    /// Broadcast a transaction through this builder's sender.
    pub async fn send(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let tx_hash = match self.require_sender()? {
            Sender::Wallet(_) => self.client.send_transaction(tx).await?,
            Sender::Node(_) => self.client.send_unsigned_transaction(tx).await?,
        };
        tracing::info!(tx_hash = %tx_hash, "Transaction broadcast");
        Ok(tx_hash)
    }

    /// Wait for a transaction to be mined with the required depth.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait
    /// * `poll_interval` - Delay between receipt polls
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
        poll_interval: Duration,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks();

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Reverted(format!(
                        "transaction {} reverted",
                        tx_hash
                    )));
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required_confirmations {
                    return Ok(ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                        contract_address: receipt.contract_address,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(timeout_secs)),
        }
    }

    /// The client this builder sends through.
    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::NetworkConfig;

    #[test]
    fn test_confirmation_status() {
        let status = ConfirmationStatus::Confirmed {
            block_number: 100,
            contract_address: None,
        };
        assert!(matches!(status, ConfirmationStatus::Confirmed { .. }));

        let status = ConfirmationStatus::Reverted("out of gas".to_string());
        assert!(matches!(status, ConfirmationStatus::Reverted(_)));
    }

    async fn offline_client() -> BlockchainClient {
        let config = NetworkConfig {
            url: "http://127.0.0.1:1".to_string(),
            rpc_timeout_secs: 1,
            ..NetworkConfig::default()
        };
        BlockchainClient::new(config, None).await.unwrap()
    }

    #[tokio::test]
    async fn test_build_requires_sender() {
        let builder = TxBuilder::new(offline_client().await);
        assert_eq!(builder.sender(), None);

        let err = builder.build_deployment(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, BlockchainError::NotAvailable(_)));
    }

    #[tokio::test]
    async fn test_node_account_sender() {
        let account = Address::with_last_byte(7);
        let builder = TxBuilder::with_node_account(offline_client().await, account);
        assert_eq!(builder.sender(), Some(Sender::Node(account)));
        assert_eq!(builder.sender().unwrap().address(), account);
    }

    #[tokio::test]
    async fn test_reserve_nonce_follows_chain() {
        let builder = TxBuilder::new(offline_client().await);
        let shared = builder.clone();

        assert_eq!(builder.reserve_nonce(0), 0);
        // Node has not seen the first transaction yet
        assert_eq!(shared.reserve_nonce(0), 1);
        // Account was used elsewhere
        assert_eq!(builder.reserve_nonce(5), 5);
        assert_eq!(shared.reserve_nonce(5), 6);
    }
}
