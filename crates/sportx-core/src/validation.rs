//! Schema validation for caller-supplied order, fill and cancel data.
//!
//! Every check runs before any hashing or signing. Failures are reported as
//! [`Error::Schema`] with a message naming the offending field.

use alloy_primitives::{Address, B256, U256};

use crate::odds::FRACTION_DENOMINATOR;
use crate::types::{
    FillDetailsMetadata, LegacyRelayerMakerOrder, NewOrder, RelayerMakerOrder, WireOrder,
};
use crate::{Error, Result};

/// Parse a hex address, enforcing the EIP-55 checksum when the input is mixed-case.
pub fn parse_address(value: &str) -> Result<Address> {
    let hex_part = value.strip_prefix("0x").unwrap_or(value);
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::schema(format!("{} is not a valid address", value)));
    }

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", hex_part), None).ok()
    } else {
        hex_part.parse::<Address>().ok()
    };

    parsed.ok_or_else(|| Error::schema(format!("{} has an invalid checksum", value)))
}

/// Parse a `0x`-prefixed 32-byte hex string.
pub fn parse_hash(value: &str) -> Result<B256> {
    let hex_part = value
        .strip_prefix("0x")
        .ok_or_else(|| Error::schema(format!("{} is not a hex string", value)))?;
    hex_part
        .parse::<B256>()
        .map_err(|_| Error::schema(format!("{} is not a 32-byte hex string", value)))
}

/// Parse an unsigned integer string (decimal, or `0x` hex).
pub fn parse_uint(field: &str, value: &str) -> Result<U256> {
    if value.trim().is_empty() {
        return Err(Error::schema(format!("{} is empty", field)));
    }
    value
        .trim()
        .parse::<U256>()
        .map_err(|_| Error::schema(format!("{} is not an unsigned integer", field)))
}

/// True when `value` parses as an integer strictly greater than zero.
pub fn is_positive_integer(value: &str) -> bool {
    parse_uint("value", value)
        .map(|v| v > U256::ZERO)
        .unwrap_or(false)
}

fn check_odds(percentage_odds: &str) -> Result<()> {
    let odds = parse_uint("percentageOdds", percentage_odds)?;
    if odds == U256::ZERO {
        return Err(Error::schema("percentageOdds as a number is not positive"));
    }
    if odds >= FRACTION_DENOMINATOR {
        return Err(Error::schema(format!(
            "percentageOdds must be less than {}",
            FRACTION_DENOMINATOR
        )));
    }
    Ok(())
}

fn check_bet_size(total_bet_size: &str) -> Result<()> {
    if !is_positive_integer(total_bet_size) {
        return Err(Error::schema("totalBetSize as a number is not positive"));
    }
    Ok(())
}

fn check_expiry(expiry: u64, now: u64) -> Result<()> {
    if expiry <= now {
        return Err(Error::schema("expiry before current time."));
    }
    Ok(())
}

/// Validate a new order request before it is turned into a maker order.
pub fn validate_new_order(order: &NewOrder, now: u64) -> Result<()> {
    check_expiry(order.expiry, now)?;
    check_bet_size(&order.total_bet_size)?;
    check_odds(&order.percentage_odds)
        .map_err(|_| Error::schema("impliedOdds must be between 0 and 1 exclusive."))?;
    parse_hash(&order.market_hash)
        .map_err(|_| Error::schema("marketHash undefined or malformed."))?;
    if let Some(base_token) = &order.base_token {
        parse_address(base_token).map_err(|_| Error::schema("baseToken undefined or malformed."))?;
    }
    Ok(())
}

/// Validate a base-token maker order as received from the relayer.
pub fn validate_relayer_order(order: &RelayerMakerOrder, now: u64) -> Result<()> {
    parse_hash(&order.market_hash)
        .map_err(|_| Error::schema("marketHash is not a valid hex string"))?;
    parse_address(&order.maker).map_err(|_| Error::schema("maker is not a valid address"))?;
    check_bet_size(&order.total_bet_size)?;
    check_odds(&order.percentage_odds)?;
    check_expiry(parse_uint("expiry", &order.expiry)?.saturating_to::<u64>(), now)?;
    parse_address(&order.executor)
        .map_err(|_| Error::schema("executor is not a valid address"))?;
    parse_address(&order.base_token)
        .map_err(|_| Error::schema("baseToken is not a valid address"))?;
    if !is_positive_integer(&order.salt) {
        return Err(Error::schema("salt as a number is not positive"));
    }
    Ok(())
}

/// Validate a legacy relayer-fee maker order.
pub fn validate_legacy_order(order: &LegacyRelayerMakerOrder, now: u64) -> Result<()> {
    parse_hash(&order.market_hash)
        .map_err(|_| Error::schema("marketHash is not a valid hex string"))?;
    parse_address(&order.maker).map_err(|_| Error::schema("maker is not a valid address"))?;
    check_bet_size(&order.total_bet_size)?;
    check_odds(&order.percentage_odds)?;
    check_expiry(parse_uint("expiry", &order.expiry)?.saturating_to::<u64>(), now)?;
    parse_address(&order.relayer)
        .map_err(|_| Error::schema("relayer is not a valid address"))?;
    parse_address(&order.executor)
        .map_err(|_| Error::schema("executor is not a valid address"))?;
    parse_uint("relayerMakerFee", &order.relayer_maker_fee)?;
    parse_uint("relayerTakerFee", &order.relayer_taker_fee)?;
    if !is_positive_integer(&order.salt) {
        return Err(Error::schema("salt as a number is not positive"));
    }
    Ok(())
}

/// Validate either wire order variant.
pub fn validate_wire_order(order: &WireOrder, now: u64) -> Result<()> {
    match order {
        WireOrder::BaseToken(order) => validate_relayer_order(order, now),
        WireOrder::Legacy(order) => validate_legacy_order(order, now),
    }
}

/// Validate a signed maker order: the order itself plus a hex signature.
pub fn validate_signed_order(order: &WireOrder, signature: &str, now: u64) -> Result<()> {
    validate_wire_order(order, now)?;
    let is_hex = signature
        .strip_prefix("0x")
        .map(|s| s.len() % 2 == 0 && s.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);
    if !is_hex {
        return Err(Error::schema("signature is not a valid hex string."));
    }
    Ok(())
}

/// Validate that the fill metadata carries no empty labels.
pub fn validate_fill_metadata(metadata: &FillDetailsMetadata) -> Result<()> {
    let fields = [
        ("action", &metadata.action),
        ("market", &metadata.market),
        ("betting", &metadata.betting),
        ("stake", &metadata.stake),
        ("odds", &metadata.odds),
        ("returning", &metadata.returning),
    ];
    for (name, value) in fields {
        if value.is_empty() {
            return Err(Error::schema(format!("{} is empty", name)));
        }
    }
    Ok(())
}

/// Validate parallel order / taker amount lists.
pub fn validate_taker_amounts(order_count: usize, taker_amounts: &[String]) -> Result<()> {
    if order_count != taker_amounts.len() {
        return Err(Error::schema(format!(
            "orders and takerAmounts differ in length ({} != {})",
            order_count,
            taker_amounts.len()
        )));
    }
    if order_count == 0 {
        return Err(Error::schema("no orders to fill"));
    }
    if !taker_amounts.iter().all(|amount| is_positive_integer(amount)) {
        return Err(Error::schema("takerAmounts has some invalid number strings"));
    }
    Ok(())
}
