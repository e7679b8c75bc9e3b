//! The deployment seam.

use alloy::primitives::{Address, TxHash};
use std::future::Future;

use crate::config::ContractSpec;
use crate::deploy::DeployResult;

/// A creation transaction that has been broadcast but not yet mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    pub name: String,
    pub tx_hash: TxHash,
}

/// A contract instance that exists on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
}

/// Prepares and deploys contracts.
///
/// Deployment is split in two steps so callers can report progress between
/// broadcast and inclusion.
pub trait ContractFactory {
    /// Broadcast the creation transaction for `contract`.
    fn deploy(
        &self,
        contract: &ContractSpec,
    ) -> impl Future<Output = DeployResult<PendingDeployment>> + Send;

    /// Wait until `pending` is mined and return the new instance.
    fn deployed(
        &self,
        pending: PendingDeployment,
    ) -> impl Future<Output = DeployResult<DeployedContract>> + Send;
}
