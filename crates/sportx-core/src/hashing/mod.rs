//! Packed-encoding digests of orders and fills.
//!
//! Field order and widths match the exchange contract's
//! `keccak256(abi.encodePacked(...))` exactly.

pub mod fill;
pub mod order;

pub use fill::{compute_fill_hash, compute_multi_fill_hash};
pub use order::compute_order_hash;

use alloy_primitives::B256;

/// Render a digest as lowercase `0x`-prefixed hex.
pub fn format_hash(hash: &B256) -> String {
    format!("0x{}", hex::encode(hash.as_slice()))
}
