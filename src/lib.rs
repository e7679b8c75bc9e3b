//! Deployment and front-end tooling for the BuddhaNFT token and NFTMarketplace contracts.

pub mod abi;
pub mod blockchain;
pub mod config;
pub mod deploy;
pub mod lifecycle;
pub mod observability;
pub mod verify;
pub mod web;

pub use config::ProjectConfig;
pub use deploy::{run_deployment, ContractFactory, DeployReport};
pub use web::WebServer;
