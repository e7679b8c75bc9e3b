//! On-chain contract factory backed by alloy.

use std::time::Duration;

use crate::blockchain::{ConfirmationStatus, TxBuilder};
use crate::config::{ContractSpec, DeployConfig};
use crate::deploy::artifact::ArtifactStore;
use crate::deploy::factory::{ContractFactory, DeployedContract, PendingDeployment};
use crate::deploy::{DeployError, DeployResult};

/// Deploys artifacts through a wallet-carrying [`TxBuilder`].
#[derive(Debug, Clone)]
pub struct ChainFactory {
    store: ArtifactStore,
    tx: TxBuilder,
    confirmation_timeout_secs: u64,
    poll_interval: Duration,
}

impl ChainFactory {
    pub fn new(store: ArtifactStore, tx: TxBuilder, config: &DeployConfig) -> Self {
        Self {
            store,
            tx,
            confirmation_timeout_secs: config.confirmation_timeout_secs,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

impl ContractFactory for ChainFactory {
    async fn deploy(&self, contract: &ContractSpec) -> DeployResult<PendingDeployment> {
        let artifact = self.store.load(&contract.name)?;
        let code = artifact.creation_code(&contract.args)?;

        let request = self.tx.build_deployment(code).await?;
        let tx_hash = self.tx.send(request).await?;

        tracing::info!(contract = %contract.name, tx_hash = %tx_hash, "Creation transaction sent");

        Ok(PendingDeployment {
            name: contract.name.clone(),
            tx_hash,
        })
    }

    async fn deployed(&self, pending: PendingDeployment) -> DeployResult<DeployedContract> {
        let status = self
            .tx
            .wait_for_confirmation(pending.tx_hash, self.confirmation_timeout_secs, self.poll_interval)
            .await?;

        match status {
            ConfirmationStatus::Confirmed {
                block_number,
                contract_address: Some(address),
            } => Ok(DeployedContract {
                name: pending.name,
                address,
                tx_hash: pending.tx_hash,
                block_number,
            }),
            ConfirmationStatus::Confirmed {
                contract_address: None,
                ..
            } => Err(DeployError::MissingAddress { name: pending.name }),
            ConfirmationStatus::Reverted(reason) => Err(DeployError::Reverted {
                name: pending.name,
                reason,
            }),
        }
    }
}
