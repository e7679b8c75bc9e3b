//! Minimal read-only ERC-721 interface.

use alloy::json_abi::JsonAbi;
use alloy::primitives::B256;

use crate::abi::signature::{human_readable_abi, AbiError, AbiResult};

/// Human-readable ERC-721 subset used by the front end, in declaration order.
pub const ERC721_ABI: [&str; 4] = [
    "function balanceOf(address owner) view returns (uint256)",
    "function tokenURI(uint256 tokenId) public view returns (string memory)",
    "function symbol() view returns (string)",
    "event Transfer(address indexed from, address indexed to, uint256 indexed tokenId)",
];

/// The ERC-721 subset as a JSON ABI.
pub fn erc721_abi() -> AbiResult<JsonAbi> {
    human_readable_abi(&ERC721_ABI)
}

/// Topic 0 of `Transfer(address,address,uint256)`.
pub fn transfer_topic() -> AbiResult<B256> {
    event_topic(&erc721_abi()?, "Transfer")
}

/// Topic 0 of the first event called `name`.
pub fn event_topic(abi: &JsonAbi, name: &str) -> AbiResult<B256> {
    abi.events
        .get(name)
        .and_then(|events| events.first())
        .map(|event| event.selector())
        .ok_or_else(|| AbiError::UnknownEvent(name.to_string()))
}
