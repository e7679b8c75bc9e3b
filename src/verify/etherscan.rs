//! Etherscan-compatible explorer client.

use alloy::primitives::Address;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::EtherscanConfig;

#[derive(Debug, Error)]
pub enum EtherscanError {
    #[error("no explorer API key configured; set ETHERSCAN_API_KEY")]
    MissingApiKey,

    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("explorer returned an error: {0}")]
    Api(String),

    #[error("unexpected explorer response: {0}")]
    Malformed(String),
}

pub type EtherscanResult<T> = Result<T, EtherscanError>;

/// Source verification state of a contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified {
        contract_name: String,
        compiler_version: String,
    },
    Unverified,
}

#[derive(Deserialize)]
struct ApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SourceEntry {
    #[serde(default)]
    source_code: String,
    #[serde(default)]
    contract_name: String,
    #[serde(default)]
    compiler_version: String,
}

#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(config: &EtherscanConfig) -> EtherscanResult<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(EtherscanError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: api_key.to_string(),
        })
    }

    /// Look up whether `address` has verified source code.
    pub async fn source_status(&self, address: Address) -> EtherscanResult<VerificationStatus> {
        let address = address.to_string();
        tracing::debug!(address = %address, api_url = %self.api_url, "Querying explorer");

        let body = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", address.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_source_response(&body)
    }
}

/// Interpret a `getsourcecode` response body.
pub fn parse_source_response(body: &str) -> EtherscanResult<VerificationStatus> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| EtherscanError::Malformed(e.to_string()))?;

    if response.status != "1" {
        let detail = response
            .result
            .as_str()
            .map(str::to_string)
            .unwrap_or(response.message);
        return Err(EtherscanError::Api(detail));
    }

    let entries: Vec<SourceEntry> = serde_json::from_value(response.result)
        .map_err(|e| EtherscanError::Malformed(e.to_string()))?;
    let entry = entries
        .into_iter()
        .next()
        .ok_or_else(|| EtherscanError::Malformed("empty result".to_string()))?;

    if entry.source_code.is_empty() {
        Ok(VerificationStatus::Unverified)
    } else {
        Ok(VerificationStatus::Verified {
            contract_name: entry.contract_name,
            compiler_version: entry.compiler_version,
        })
    }
}
