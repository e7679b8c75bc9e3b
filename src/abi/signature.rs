//! Human-readable ABI signatures.
//!
//! Signatures use the compact `function name(type arg, ...) view returns (type)`
//! and `event Name(type indexed arg, ...)` forms and are parsed with alloy's
//! human-readable parser.

use alloy::json_abi::{Event, Function, JsonAbi};
use thiserror::Error;

use crate::blockchain::BlockchainError;

/// Errors raised while parsing signatures or calling through an ABI.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("empty ABI signature")]
    Empty,

    #[error("unsupported ABI item '{0}': expected 'function' or 'event'")]
    UnsupportedKind(String),

    #[error("invalid signature '{signature}': {reason}")]
    Parse { signature: String, reason: String },

    #[error("function '{0}' not found in ABI")]
    UnknownFunction(String),

    #[error("event '{0}' not found in ABI")]
    UnknownEvent(String),

    #[error("ABI encoding error: {0}")]
    Encoding(String),

    #[error("unexpected return value from {function}: {reason}")]
    UnexpectedOutput { function: String, reason: String },

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Result type for ABI operations.
pub type AbiResult<T> = Result<T, AbiError>;

/// A parsed ABI entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiItem {
    Function(Function),
    Event(Event),
}

impl AbiItem {
    pub fn name(&self) -> &str {
        match self {
            AbiItem::Function(f) => &f.name,
            AbiItem::Event(e) => &e.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AbiItem::Function(_) => "function",
            AbiItem::Event(_) => "event",
        }
    }

    /// Canonical signature, e.g. `balanceOf(address)`.
    pub fn canonical(&self) -> String {
        match self {
            AbiItem::Function(f) => f.signature(),
            AbiItem::Event(e) => e.signature(),
        }
    }

    /// 4-byte selector for functions, 32-byte topic for events, hex encoded.
    pub fn selector_hex(&self) -> String {
        match self {
            AbiItem::Function(f) => f.selector().to_string(),
            AbiItem::Event(e) => e.selector().to_string(),
        }
    }
}

/// Parse a single human-readable signature.
pub fn parse_signature(signature: &str) -> AbiResult<AbiItem> {
    let signature = signature.trim();
    let keyword = signature.split_whitespace().next().ok_or(AbiError::Empty)?;

    let parse_err = |e: alloy::json_abi::parser::Error| AbiError::Parse {
        signature: signature.to_string(),
        reason: e.to_string(),
    };

    match keyword {
        "function" => Function::parse(signature)
            .map(AbiItem::Function)
            .map_err(parse_err),
        "event" => Event::parse(signature).map(AbiItem::Event).map_err(parse_err),
        other => Err(AbiError::UnsupportedKind(other.to_string())),
    }
}

/// Build a JSON ABI from human-readable signatures, keeping every entry.
pub fn human_readable_abi(signatures: &[&str]) -> AbiResult<JsonAbi> {
    let mut abi = JsonAbi::new();
    for signature in signatures {
        match parse_signature(signature)? {
            AbiItem::Function(f) => abi.functions.entry(f.name.clone()).or_default().push(f),
            AbiItem::Event(e) => abi.events.entry(e.name.clone()).or_default().push(e),
        }
    }
    Ok(abi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_function() {
        let item = parse_signature("function balanceOf(address owner) view returns (uint256)").unwrap();
        assert_eq!(item.kind(), "function");
        assert_eq!(item.name(), "balanceOf");
        assert_eq!(item.canonical(), "balanceOf(address)");
        assert_eq!(item.selector_hex(), "0x70a08231");
    }

    #[test]
    fn test_parse_event() {
        let item = parse_signature(
            "event Transfer(address indexed from, address indexed to, uint256 indexed tokenId)",
        )
        .unwrap();
        assert_eq!(item.kind(), "event");
        assert_eq!(item.canonical(), "Transfer(address,address,uint256)");
        match item {
            AbiItem::Event(e) => assert!(e.inputs.iter().all(|p| p.indexed)),
            AbiItem::Function(_) => panic!("expected event"),
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(parse_signature("   "), Err(AbiError::Empty)));
    }

    #[test]
    fn test_rejects_other_items() {
        let err = parse_signature("error Unauthorized(address caller)").unwrap_err();
        assert!(matches!(err, AbiError::UnsupportedKind(ref k) if k == "error"));
    }

    #[test]
    fn test_rejects_malformed() {
        let err = parse_signature("function balanceOf(address owner").unwrap_err();
        assert!(matches!(err, AbiError::Parse { .. }));
    }

    #[test]
    fn test_human_readable_abi() {
        let abi = human_readable_abi(&[
            "function symbol() view returns (string)",
            "function name() view returns (string)",
            "event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId)",
        ])
        .unwrap();
        assert_eq!(abi.functions.len(), 2);
        assert_eq!(abi.events.len(), 1);
        assert_eq!(abi.functions["symbol"][0].outputs[0].ty, "string");
    }
}
