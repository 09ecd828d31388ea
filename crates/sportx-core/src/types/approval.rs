//! Token approval types: DAI-style permits and meta-transaction approvals.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::wire;

/// Permit message granting `spender` an allowance on `holder`'s tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermitDetails {
    #[serde(serialize_with = "wire::checksummed")]
    pub holder: Address,
    #[serde(serialize_with = "wire::checksummed")]
    pub spender: Address,
    #[serde(serialize_with = "wire::display")]
    pub nonce: U256,
    /// Zero means the permit never expires.
    #[serde(serialize_with = "wire::display")]
    pub expiry: u64,
    pub allowed: bool,
}

/// Signed permit as submitted to the relayer.
#[derive(Debug, Clone, Serialize)]
pub struct SignedPermit {
    pub holder: String,
    pub spender: String,
    pub nonce: String,
    pub expiry: u64,
    pub allowed: bool,
    pub signature: String,
}

/// Meta-transaction executed by a relayer on the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTransactionDetails {
    #[serde(serialize_with = "wire::display")]
    pub nonce: U256,
    #[serde(serialize_with = "wire::checksummed")]
    pub from: Address,
    /// ABI-encoded call, e.g. `approve(spender, amount)`.
    #[serde(serialize_with = "wire::hex_bytes")]
    pub function_signature: Bytes,
}

/// Signed approval of a spender, attached to fills or posted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSpenderPayload {
    pub owner: String,
    pub spender: String,
    pub token_address: String,
    pub amount: String,
    pub signature: String,
}
