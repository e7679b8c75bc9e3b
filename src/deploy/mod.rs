//! Contract deployment.
//!
//! # Data Flow
//! ```text
//! DeployConfig.contracts (ordered plan)
//!     → runner.rs (one contract at a time, stop at first failure)
//!     → factory.rs trait: deploy() then deployed()
//!         → chain.rs: artifact.rs (abi + bytecode + constructor args)
//!                     → blockchain::TxBuilder (build, sign, broadcast, confirm)
//!     → "<Name> deployed to: <address>" on stdout
//! ```
//!
//! Every failure is a deployment failure: there is no retry, no resume and
//! no idempotence. Running the plan again creates new contract instances.

pub mod artifact;
pub mod chain;
pub mod factory;
pub mod runner;

use std::path::PathBuf;
use thiserror::Error;

use crate::blockchain::BlockchainError;

pub use artifact::{ArtifactStore, ContractArtifact};
pub use chain::ChainFactory;
pub use factory::{ContractFactory, DeployedContract, PendingDeployment};
pub use runner::{run_deployment, DeployReport};

/// Errors raised while deploying a contract.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("artifact for {name} not found under {}", dir.display())]
    ArtifactNotFound { name: String, dir: PathBuf },

    #[error("failed to read artifact {}: {source}", path.display())]
    ArtifactIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("{name} has no deployable bytecode")]
    MissingBytecode { name: String },

    #[error("{name} bytecode has unlinked library references")]
    UnlinkedLibraries { name: String },

    #[error("{name} constructor takes {expected} argument(s), {got} given")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("{name} constructor argument {index}: {reason}")]
    Argument {
        name: String,
        index: usize,
        reason: String,
    },

    #[error("{name} deployment reverted: {reason}")]
    Reverted { name: String, reason: String },

    #[error("{name} creation receipt carries no contract address")]
    MissingAddress { name: String },

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;
