//! Signature providers.
//!
//! The signing service only ever asks for "a signature over this hash" or
//! "a signature over this typed-data payload". How that signature is made
//! (local key, browser wallet, hardware device) is the adapter's concern.

use std::str::FromStr;

use alloy_primitives::{Address, Signature, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use super::payloads::TypedDataPayload;
use crate::{Error, Result};

/// Produces signatures for an account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignerAdapter: Send + Sync {
    /// Address whose signatures this adapter produces.
    fn address(&self) -> Address;

    /// EIP-191 personal-message signature over the raw 32 hash bytes.
    async fn sign_hash(&self, hash: B256) -> Result<String>;

    /// EIP-712 signature over a typed-data payload.
    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String>;
}

/// Render a signature as lowercase `0x` hex of its 65 bytes (`r ‖ s ‖ v`).
pub fn format_signature(signature: &Signature) -> String {
    format!("0x{}", hex::encode(signature.as_bytes()))
}

/// Signs in-process with a secp256k1 private key.
#[derive(Clone)]
pub struct LocalKeySigner {
    signer: PrivateKeySigner,
}

impl LocalKeySigner {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Parse a hex private key, with or without `0x`.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let signer = PrivateKeySigner::from_str(key)
            .map_err(|e| Error::signing(format!("invalid private key: {}", e)))?;
        Ok(Self::new(signer))
    }
}

#[async_trait]
impl SignerAdapter for LocalKeySigner {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_hash(&self, hash: B256) -> Result<String> {
        let signature = self
            .signer
            .sign_message(hash.as_slice())
            .await
            .map_err(Error::signing)?;
        Ok(format_signature(&signature))
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String> {
        let signature = self
            .signer
            .sign_hash(&payload.signing_hash())
            .await
            .map_err(Error::signing)?;
        Ok(format_signature(&signature))
    }
}

impl std::fmt::Debug for LocalKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalKeySigner")
            .field("address", &self.address().to_checksum(None))
            .finish()
    }
}
