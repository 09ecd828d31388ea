//! Read-only chain access for token metadata.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolType, SolValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProtocolConfig;
use crate::{Error, Result};

sol! {
    function name() external view returns (string);
    function getNonce(address user) external view returns (uint256);
    function nonces(address owner) external view returns (uint256);
}

/// Token metadata and nonces needed to build approval payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn chain_id(&self) -> Result<u64>;

    /// ERC-20 `name()`, used as the token's EIP-712 domain name.
    async fn token_name(&self, token: Address) -> Result<String>;

    /// Meta-transaction nonce of `owner` (`getNonce(owner)`).
    async fn approval_nonce(&self, token: Address, owner: Address) -> Result<U256>;

    /// Permit nonce of `owner` (`nonces(owner)`).
    async fn permit_nonce(&self, token: Address, owner: Address) -> Result<U256>;
}

/// [`ChainReader`] over a JSON-RPC node.
pub struct RpcChainReader {
    rpc_url: String,
    http_client: reqwest::Client,
}

impl RpcChainReader {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ProtocolConfig) -> Result<Self> {
        let rpc_url = config.rpc_url.as_ref().ok_or_else(|| Error::Config {
            message: "rpc_url is required to read token metadata".to_string(),
        })?;
        Ok(Self::new(rpc_url.clone()))
    }

    async fn rpc_call(&self, method: &str, params: serde_json::Value) -> Result<String> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::chain(format!("RPC request failed: {}", response.status())));
        }

        let body: JsonRpcResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(Error::chain(format!("{} ({})", error.message, error.code)));
        }
        body.result
            .ok_or_else(|| Error::chain(format!("No result in {} response", method)))
    }

    async fn eth_call(&self, to: Address, data: Vec<u8>) -> Result<Bytes> {
        debug!(to = %to, selector = %hex::encode(&data[..data.len().min(4)]), "eth_call");
        let params = serde_json::json!([
            {
                "to": to.to_checksum(None),
                "data": format!("0x{}", hex::encode(&data)),
            },
            "latest"
        ]);
        let result = self.rpc_call("eth_call", params).await?;
        decode_hex(&result)
    }
}

fn decode_hex(value: &str) -> Result<Bytes> {
    value
        .parse::<Bytes>()
        .map_err(|e| Error::chain(format!("Malformed hex in RPC result: {}", e)))
}

fn parse_quantity(value: &str) -> Result<u64> {
    u64::from_str_radix(value.trim_start_matches("0x"), 16)
        .map_err(|e| Error::chain(format!("Failed to parse quantity {}: {}", value, e)))
}

fn decode_return<T>(data: &[u8]) -> Result<T>
where
    T: SolValue + From<<T::SolType as SolType>::RustType>,
{
    T::abi_decode(data).map_err(|e| Error::chain(format!("Failed to decode call result: {}", e)))
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn chain_id(&self) -> Result<u64> {
        let result = self.rpc_call("eth_chainId", serde_json::json!([])).await?;
        parse_quantity(&result)
    }

    async fn token_name(&self, token: Address) -> Result<String> {
        let data = self.eth_call(token, nameCall {}.abi_encode()).await?;
        decode_return::<String>(&data)
    }

    async fn approval_nonce(&self, token: Address, owner: Address) -> Result<U256> {
        let data = self
            .eth_call(token, getNonceCall { user: owner }.abi_encode())
            .await?;
        decode_return::<U256>(&data)
    }

    async fn permit_nonce(&self, token: Address, owner: Address) -> Result<U256> {
        let data = self
            .eth_call(token, noncesCall { owner }.abi_encode())
            .await?;
        decode_return::<U256>(&data)
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
