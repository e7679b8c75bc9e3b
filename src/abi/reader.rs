//! Read-only ERC-721 queries through the human-readable ABI.

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;

use crate::abi::erc721::erc721_abi;
use crate::abi::signature::{AbiError, AbiResult};
use crate::blockchain::BlockchainClient;

/// Queries a deployed ERC-721 token with `eth_call`.
#[derive(Debug, Clone)]
pub struct Erc721Reader {
    client: BlockchainClient,
    address: Address,
    abi: JsonAbi,
}

impl Erc721Reader {
    pub fn new(client: BlockchainClient, address: Address) -> AbiResult<Self> {
        Ok(Self {
            client,
            address,
            abi: erc721_abi()?,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `symbol()`
    pub async fn symbol(&self) -> AbiResult<String> {
        let output = self.call("symbol", &[]).await?;
        single_string("symbol", output)
    }

    /// `balanceOf(owner)`
    pub async fn balance_of(&self, owner: Address) -> AbiResult<U256> {
        let output = self.call("balanceOf", &[DynSolValue::Address(owner)]).await?;
        single_uint("balanceOf", output)
    }

    /// `tokenURI(tokenId)`
    pub async fn token_uri(&self, token_id: U256) -> AbiResult<String> {
        let output = self
            .call("tokenURI", &[DynSolValue::Uint(token_id, 256)])
            .await?;
        single_string("tokenURI", output)
    }

    async fn call(&self, name: &str, args: &[DynSolValue]) -> AbiResult<Vec<DynSolValue>> {
        let function = self.function(name)?;
        let input = encode_call(function, args)?;

        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(input);

        tracing::debug!(contract = %self.address, function = name, "eth_call");
        let output = self.client.call(&tx).await?;
        decode_output(function, &output)
    }

    fn function(&self, name: &str) -> AbiResult<&Function> {
        self.abi
            .functions
            .get(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| AbiError::UnknownFunction(name.to_string()))
    }
}

/// Selector followed by the ABI-encoded arguments.
pub fn encode_call(function: &Function, args: &[DynSolValue]) -> AbiResult<Bytes> {
    function
        .abi_encode_input(args)
        .map(Bytes::from)
        .map_err(|e| AbiError::Encoding(e.to_string()))
}

pub fn decode_output(function: &Function, data: &[u8]) -> AbiResult<Vec<DynSolValue>> {
    function
        .abi_decode_output(data)
        .map_err(|e| AbiError::UnexpectedOutput {
            function: function.name.clone(),
            reason: e.to_string(),
        })
}

fn single_string(function: &str, output: Vec<DynSolValue>) -> AbiResult<String> {
    match output.as_slice() {
        [value] => value.as_str().map(str::to_string).ok_or_else(|| unexpected(function, "string")),
        _ => Err(unexpected(function, "string")),
    }
}

fn single_uint(function: &str, output: Vec<DynSolValue>) -> AbiResult<U256> {
    match output.as_slice() {
        [value] => value
            .as_uint()
            .map(|(n, _)| n)
            .ok_or_else(|| unexpected(function, "uint256")),
        _ => Err(unexpected(function, "uint256")),
    }
}

fn unexpected(function: &str, expected: &str) -> AbiError {
    AbiError::UnexpectedOutput {
        function: function.to_string(),
        reason: format!("expected a single {expected}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn function(name: &str) -> Function {
        erc721_abi().unwrap().functions[name][0].clone()
    }

    #[test]
    fn test_encode_balance_of() {
        let owner = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        let data = encode_call(&function("balanceOf"), &[DynSolValue::Address(owner)]).unwrap();

        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&data[16..], owner.as_slice());
    }

    #[test]
    fn test_encode_wrong_arity() {
        let err = encode_call(&function("symbol"), &[DynSolValue::Bool(true)]).unwrap_err();
        assert!(matches!(err, AbiError::Encoding(_)));
    }

    #[test]
    fn test_decode_symbol() {
        let encoded = DynSolValue::Tuple(vec![DynSolValue::String("BDH".to_string())]).abi_encode_params();
        let output = decode_output(&function("symbol"), &encoded).unwrap();
        assert_eq!(single_string("symbol", output).unwrap(), "BDH");
    }

    #[test]
    fn test_decode_balance() {
        let encoded = DynSolValue::Tuple(vec![DynSolValue::Uint(U256::from(3), 256)]).abi_encode_params();
        let output = decode_output(&function("balanceOf"), &encoded).unwrap();
        assert_eq!(single_uint("balanceOf", output).unwrap(), U256::from(3));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_output(&function("tokenURI"), &[0x01, 0x02]).unwrap_err();
        assert!(matches!(err, AbiError::UnexpectedOutput { .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let err = single_uint("balanceOf", vec![DynSolValue::Bool(false)]).unwrap_err();
        assert!(err.to_string().contains("uint256"));
    }
}
