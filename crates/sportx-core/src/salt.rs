//! Replay-protection salts drawn from the operating system CSPRNG.

use alloy_primitives::{B256, U256};
use rand::rngs::OsRng;
use rand::RngCore;

/// 32 random bytes.
pub fn random_bytes32() -> B256 {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    B256::from(bytes)
}

/// A random 256-bit unsigned integer, used as order and fill salt.
pub fn random_salt() -> U256 {
    U256::from_be_bytes(random_bytes32().0)
}
