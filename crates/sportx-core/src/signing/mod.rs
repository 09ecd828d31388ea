//! Signing module for SportX orders, fills, cancels and token approvals.
//!
//! # Architecture
//!
//! ```text
//! NewOrder / FillIntent / order hashes
//!       │
//!       ▼
//! validation ──► OrderCodec ──► hashing / payloads
//!                                     │
//!                                     ▼
//!                     OrderSigner ─── SignerAdapter
//!                          │          (LocalKeySigner, wallet RPC)
//!                          ▼
//!          SignedOrder / FillOrdersRequest / CancelRequest
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sportx_core::config::ProtocolConfig;
//! use sportx_core::signing::{LocalKeySigner, OrderSigner};
//!
//! let config = ProtocolConfig::from_env()?;
//! let signer = OrderSigner::new(config, LocalKeySigner::from_private_key("0x...")?)?;
//!
//! let signed = signer.new_order(new_order).await?;
//! let cancel = signer.cancel_all_orders().await?;
//! ```

pub mod adapter;
pub mod domain;
pub mod payloads;
pub mod signer;

pub use adapter::{format_signature, LocalKeySigner, SignerAdapter};
pub use payloads::{Eip712Message, TypeDefinition, TypedData, TypedDataPayload};
pub use signer::OrderSigner;

#[cfg(test)]
pub use adapter::MockSignerAdapter;
