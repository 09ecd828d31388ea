//! Trading wallet loaded from the environment.

use std::str::FromStr;

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use sportx_core::signing::{LocalKeySigner, SignerAdapter};

/// A wallet with private key access, signing in-process.
#[derive(Clone)]
pub struct TradingWallet {
    signer: LocalKeySigner,
    address: Address,
}

impl TradingWallet {
    /// Load wallet from the `WALLET_PRIVATE_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set or the key is malformed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let private_key = std::env::var("WALLET_PRIVATE_KEY")
            .context("WALLET_PRIVATE_KEY environment variable not set")?;

        Self::from_private_key(&private_key)
    }

    /// Create a wallet from a 64-character hex key, optionally `0x`-prefixed.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let key_clean = key.trim().trim_start_matches("0x");

        let signer = PrivateKeySigner::from_str(key_clean)
            .context("Invalid private key format - expected 64 hex characters")?;
        let signer = LocalKeySigner::new(signer);
        let address = signer.address();

        Ok(Self { signer, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Checksummed address.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    pub fn signer(&self) -> &LocalKeySigner {
        &self.signer
    }

    /// Consume the wallet and return the signature provider.
    pub fn into_signer(self) -> LocalKeySigner {
        self.signer
    }
}

impl std::fmt::Debug for TradingWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("TradingWallet")
            .field("address", &self.address_string())
            .finish()
    }
}
