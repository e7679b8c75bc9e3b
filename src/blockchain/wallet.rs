//! Deployer wallet.
//!
//! # Security
//! - Private keys come from the network's `accounts` list, which the
//!   config loader fills from `PRIVATE_KEY`
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Local signer for deployment transactions.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::debug!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Create a wallet from the first entry of a network's `accounts` list.
    pub fn from_accounts(accounts: &[String], chain_id: u64) -> BlockchainResult<Self> {
        let key = accounts.first().ok_or_else(|| {
            BlockchainError::Wallet(
                "No accounts configured; set PRIVATE_KEY or networks.<name>.accounts".to_string(),
            )
        })?;
        Self::from_private_key(key, chain_id)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Signing wallet for an alloy provider.
    pub fn ethereum_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

/// Addresses for every configured private key, in order.
pub fn account_addresses(accounts: &[String], chain_id: u64) -> BlockchainResult<Vec<Address>> {
    accounts
        .iter()
        .map(|key| Wallet::from_private_key(key, chain_id).map(|w| w.address()))
        .collect()
}
