//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::ProjectConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "buddha.toml";

/// Environment variable holding the deployer's private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Environment variable holding the block explorer API key.
pub const ETHERSCAN_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, overlay with the process environment and validate a TOML file.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: ProjectConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    apply_env(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// Like [`load_config`], but falls back to defaults when `path` is the
/// default file name and it does not exist.
pub fn load_or_default(path: &Path) -> Result<ProjectConfig, ConfigError> {
    if path == Path::new(DEFAULT_CONFIG_FILE) && !path.exists() {
        tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
        let mut config = ProjectConfig::default();
        apply_env(&mut config, |key| std::env::var(key).ok());
        validate_config(&config).map_err(ConfigError::Validation)?;
        return Ok(config);
    }
    load_config(path)
}

/// Overlay environment values onto a configuration.
///
/// - `<NETWORK>_URL` replaces the network's URL when set.
/// - `PRIVATE_KEY` becomes the only account of every non-local network.
/// - `ETHERSCAN_API_KEY` fills the explorer API key.
///
/// Values are taken as-is: empty strings are kept and nothing is validated.
pub fn apply_env<F>(config: &mut ProjectConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let private_key = env(PRIVATE_KEY_ENV_VAR);

    for (name, network) in config.networks.iter_mut() {
        if let Some(url) = env(&url_env_var(name)) {
            network.url = url;
        }
        if name != "localhost" {
            if let Some(key) = &private_key {
                network.accounts = vec![key.clone()];
            }
        }
    }

    if let Some(api_key) = env(ETHERSCAN_API_KEY_ENV_VAR) {
        config.etherscan.api_key = Some(api_key);
    }
}

/// Name of the URL override variable for a network (`rinkeby` -> `RINKEBY_URL`).
pub fn url_env_var(network: &str) -> String {
    let name: String = network
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{name}_URL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_url_env_var() {
        assert_eq!(url_env_var("rinkeby"), "RINKEBY_URL");
        assert_eq!(url_env_var("base-sepolia"), "BASE_SEPOLIA_URL");
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = ProjectConfig::default();
        apply_env(
            &mut config,
            env_of(&[
                ("RINKEBY_URL", "https://rinkeby.example/v3/abc"),
                ("PRIVATE_KEY", "0xdead"),
                ("ETHERSCAN_API_KEY", "KEY"),
            ]),
        );

        let rinkeby = &config.networks["rinkeby"];
        assert_eq!(rinkeby.url, "https://rinkeby.example/v3/abc");
        assert_eq!(rinkeby.accounts, ["0xdead"]);
        assert!(config.networks["localhost"].accounts.is_empty());
        assert_eq!(config.etherscan.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn test_apply_env_fallbacks() {
        let mut config = ProjectConfig::default();
        apply_env(&mut config, env_of(&[]));

        assert_eq!(config.networks["rinkeby"].url, "");
        assert!(config.networks["rinkeby"].accounts.is_empty());
        assert!(config.etherscan.api_key.is_none());
    }

    #[test]
    fn test_empty_env_value_is_kept() {
        let mut config = ProjectConfig::default();
        apply_env(&mut config, env_of(&[("LOCALHOST_URL", "")]));
        assert_eq!(config.networks["localhost"].url, "");
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("buddha-load-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            solidity = "0.8.4"
            default_network = "dev"

            [networks.dev]
            url = "http://127.0.0.1:9545"
            chain_id = 1337

            [[deploy.contracts]]
            name = "BuddhaNFT"
            args = ["ipfs://base/"]
            "#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.default_network, "dev");
        assert_eq!(config.deploy.contracts.len(), 1);
        assert_eq!(config.deploy.contracts[0].args, ["ipfs://base/"]);
    }

    #[test]
    fn test_load_config_validation_error() {
        let path = std::env::temp_dir().join(format!("buddha-invalid-{}.toml", std::process::id()));
        fs::write(&path, "default_network = \"nowhere\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("default_network"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_or_default(Path::new("/nonexistent/buddha.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
