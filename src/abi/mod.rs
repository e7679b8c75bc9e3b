//! Contract interfaces.
//!
//! - signature.rs: human-readable signature parsing
//! - erc721.rs: the static ERC-721 descriptor
//! - reader.rs: read-only calls through that descriptor

pub mod erc721;
pub mod reader;
pub mod signature;

pub use erc721::{erc721_abi, event_topic, transfer_topic, ERC721_ABI};
pub use reader::Erc721Reader;
pub use signature::{human_readable_abi, parse_signature, AbiError, AbiItem, AbiResult};
