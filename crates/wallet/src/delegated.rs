//! Signer that delegates to an external wallet over JSON-RPC.
//!
//! The wallet holds the key; this adapter only forwards hashes and typed-data
//! payloads and normalizes the returned signatures. Which typed-data RPC
//! method the wallet understands is decided here from what the wallet
//! reports about itself, and nowhere else.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sportx_core::signing::{SignerAdapter, TypedDataPayload};
use sportx_core::{Error, Result};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Typed-data signing method understood by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedDataMethod {
    /// `eth_signTypedData_v4` with the payload as a JSON string.
    V4,
    /// `eth_signTypedData` with the payload as a JSON object.
    Legacy,
}

impl TypedDataMethod {
    /// Pick the method from a `web3_clientVersion` string.
    pub fn from_client_version(client_version: &str) -> Self {
        if client_version.to_lowercase().contains("metamask") {
            TypedDataMethod::V4
        } else {
            TypedDataMethod::Legacy
        }
    }

    pub fn rpc_method(&self) -> &'static str {
        match self {
            TypedDataMethod::V4 => "eth_signTypedData_v4",
            TypedDataMethod::Legacy => "eth_signTypedData",
        }
    }

    fn params(&self, account: Address, payload: &TypedDataPayload) -> Result<Value> {
        let account = account.to_checksum(None);
        Ok(match self {
            TypedDataMethod::V4 => json!([account, payload.to_json_string()?]),
            TypedDataMethod::Legacy => json!([account, payload.json()]),
        })
    }
}

/// [`SignerAdapter`] backed by a wallet's JSON-RPC endpoint.
pub struct DelegatedWalletSigner {
    rpc_url: String,
    account: Address,
    http_client: reqwest::Client,
    typed_data_method: OnceCell<TypedDataMethod>,
}

impl DelegatedWalletSigner {
    pub fn new(rpc_url: impl Into<String>, account: Address) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            account,
            http_client: reqwest::Client::new(),
            typed_data_method: OnceCell::new(),
        }
    }

    /// Skip capability detection and always use `method`.
    pub fn with_typed_data_method(self, method: TypedDataMethod) -> Self {
        Self {
            typed_data_method: OnceCell::new_with(Some(method)),
            ..self
        }
    }

    async fn rpc_call(&self, method: &str, params: Value) -> Result<String> {
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
            return Err(Error::Signing {
                message: format!("Wallet request failed: {}", response.status()),
            });
        }

        let body: JsonRpcResponse = response.json().await?;
        body.into_result(method)
    }

    async fn typed_data_method(&self) -> TypedDataMethod {
        *self
            .typed_data_method
            .get_or_init(|| async {
                match self.rpc_call("web3_clientVersion", json!([])).await {
                    Ok(version) => {
                        let method = TypedDataMethod::from_client_version(&version);
                        debug!(client_version = %version, method = method.rpc_method(), "Wallet capabilities");
                        method
                    }
                    Err(e) => {
                        warn!(error = %e, "Wallet did not report its version, using eth_signTypedData");
                        TypedDataMethod::Legacy
                    }
                }
            })
            .await
    }
}

#[async_trait]
impl SignerAdapter for DelegatedWalletSigner {
    fn address(&self) -> Address {
        self.account
    }

    async fn sign_hash(&self, hash: B256) -> Result<String> {
        let params = json!([format!("0x{}", hex::encode(hash)), self.account.to_checksum(None)]);
        let signature = self.rpc_call("personal_sign", params).await?;
        normalize_signature(&signature)
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String> {
        let method = self.typed_data_method().await;
        debug!(method = method.rpc_method(), primary_type = ?payload.primary_type(), "Requesting wallet signature");
        let signature = self
            .rpc_call(method.rpc_method(), method.params(self.account, payload)?)
            .await?;
        normalize_signature(&signature)
    }
}

impl std::fmt::Debug for DelegatedWalletSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedWalletSigner")
            .field("rpc_url", &self.rpc_url)
            .field("account", &self.account.to_checksum(None))
            .finish()
    }
}

/// Lowercase 65-byte hex with `v` in `{27, 28}`.
fn normalize_signature(signature: &str) -> Result<String> {
    let mut bytes = hex::decode(signature.trim().trim_start_matches("0x")).map_err(|e| Error::Signing {
        message: format!("Wallet returned malformed signature: {}", e),
    })?;
    if bytes.len() != 65 {
        return Err(Error::Signing {
            message: format!("Wallet returned a {}-byte signature", bytes.len()),
        });
    }
    if bytes[64] < 27 {
        bytes[64] += 27;
    }
    Ok(format!("0x{}", hex::encode(bytes)))
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    message: String,
}

impl JsonRpcResponse {
    /// Wallet errors (including user rejection) pass through as their message.
    fn into_result(self, method: &str) -> Result<String> {
        if let Some(error) = self.error {
            return Err(Error::Signing {
                message: error.message,
            });
        }
        self.result.ok_or_else(|| Error::Signing {
            message: format!("No result in {} response", method),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use sportx_core::signing::payloads::cancel_all_payload;
    use sportx_core::types::CancelAllDetails;

    const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn payload() -> TypedDataPayload {
        cancel_all_payload(CancelAllDetails::fresh(1_700_000_000), 137)
            .to_payload()
            .unwrap()
    }

    #[test]
    fn test_method_from_client_version() {
        assert_eq!(
            TypedDataMethod::from_client_version("MetaMask/v11.16.0"),
            TypedDataMethod::V4
        );
        assert_eq!(
            TypedDataMethod::from_client_version("Geth/v1.13.5-stable/linux-amd64/go1.21.4"),
            TypedDataMethod::Legacy
        );
    }

    #[test]
    fn test_v4_params_carry_json_string() {
        let params = TypedDataMethod::V4.params(ACCOUNT, &payload()).unwrap();
        assert_eq!(params[0], "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let json: Value = serde_json::from_str(params[1].as_str().unwrap()).unwrap();
        assert_eq!(json["primaryType"], "Details");
    }

    #[test]
    fn test_legacy_params_carry_json_object() {
        let params = TypedDataMethod::Legacy.params(ACCOUNT, &payload()).unwrap();
        assert!(params[1].is_object());
        assert_eq!(params[1]["domain"]["name"], "CancelAllOrdersSportX");
    }

    #[test]
    fn test_normalize_signature() {
        let mut raw = vec![0xABu8; 64];
        raw.push(1);
        let normalized = normalize_signature(&format!("0x{}", hex::encode_upper(&raw))).unwrap();
        assert_eq!(normalized.len(), 132);
        assert!(normalized.ends_with("1c"));
        assert_eq!(normalized, normalized.to_lowercase());

        assert!(matches!(normalize_signature("0x1234"), Err(Error::Signing { .. })));
        assert!(matches!(normalize_signature("0xzz"), Err(Error::Signing { .. })));
    }

    #[test]
    fn test_wallet_rejection_passes_through() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 4001, "message": "User denied message signature."}
        }))
        .unwrap();
        let error = response.into_result("eth_signTypedData_v4").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Signing error: User denied message signature."
        );
    }

    #[tokio::test]
    async fn test_unreachable_wallet_is_an_error() {
        let signer = DelegatedWalletSigner::new("http://127.0.0.1:1", ACCOUNT)
            .with_typed_data_method(TypedDataMethod::V4);
        assert_eq!(signer.address(), ACCOUNT);
        assert!(signer.sign_hash(B256::ZERO).await.is_err());
        assert!(signer.sign_typed_data(&payload()).await.is_err());
    }
}
