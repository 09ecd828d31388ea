//! SportX SDK: order, fill and cancel signing for the SportX betting exchange
//!
//! This is the root crate that provides benchmark and integration-test access
//! to the workspace. For actual functionality, use the individual crates:
//!
//! - `sportx-core`: wire types, validation, hashing, EIP-712 payloads, signing service
//! - `sportx-wallet`: key-backed and delegated wallet signers, `sportx-sign` CLI

pub use sportx_core as core;
pub use sportx_wallet as wallet;
