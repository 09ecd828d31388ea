//! Serde helpers for the relayer's string-encoded wire format.

use std::fmt::Display;

use alloy_primitives::{Address, Bytes};
use serde::Serializer;

/// Any `Display` value as a JSON string (`U256` renders as decimal).
pub(crate) fn display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub(crate) fn display_seq<T: Display, S: Serializer>(
    values: &[T],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(ToString::to_string))
}

/// EIP-55 checksummed address.
pub(crate) fn checksummed<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

fn prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Lowercase `0x` hex of a byte string.
pub(crate) fn hex_bytes<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&prefixed_hex(bytes))
}

pub(crate) fn hex_bytes_seq<S: Serializer>(values: &[Bytes], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|bytes| prefixed_hex(bytes)))
}
