//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. All violations are collected
//! rather than stopping at the first. Endpoint URLs and keys coming from the
//! environment are deliberately left unchecked here: an empty URL loads fine
//! and fails when a command actually talks to the network.

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::ProjectConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning every violation found.
pub fn validate_config(config: &ProjectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_semver(&config.solidity) {
        errors.push(ValidationError::new(
            "solidity",
            format!("'{}' is not a MAJOR.MINOR.PATCH version", config.solidity),
        ));
    }

    if !config.networks.contains_key(&config.default_network) {
        errors.push(ValidationError::new(
            "default_network",
            format!("network '{}' is not configured", config.default_network),
        ));
    }

    for (name, network) in &config.networks {
        if network.rpc_timeout_secs == 0 {
            errors.push(ValidationError::new(
                format!("networks.{name}.rpc_timeout_secs"),
                "must be greater than zero",
            ));
        }
        if network.gas_price_multiplier < 1.0 {
            errors.push(ValidationError::new(
                format!("networks.{name}.gas_price_multiplier"),
                "must be at least 1.0",
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, contract) in config.deploy.contracts.iter().enumerate() {
        if contract.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("deploy.contracts[{i}].name"),
                "must not be empty",
            ));
        } else if !seen.insert(contract.name.as_str()) {
            errors.push(ValidationError::new(
                format!("deploy.contracts[{i}].name"),
                format!("'{}' appears more than once", contract.name),
            ));
        }
    }

    if config.deploy.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "deploy.confirmation_timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.deploy.poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "deploy.poll_interval_ms",
            "must be greater than zero",
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_semver(version: &str) -> bool {
    let parts: Vec<_> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
