//! Legacy fill hashes and the multi-order fill chain.

use alloy_primitives::{keccak256, B256, U256};
use alloy_sol_types::SolValue;

use crate::types::LegacyOrder;
use crate::{Error, Result};

/// Hash of one (order, taker amount) pair.
///
/// The submitter fee is appended only when present; an absent fee is not
/// encoded as zero.
pub fn compute_fill_hash(
    order: &LegacyOrder,
    taker_amount: U256,
    fill_salt: U256,
    submitter_fee: Option<U256>,
) -> B256 {
    let mut packed = order.packed_encoding();
    packed.extend_from_slice(&(taker_amount, fill_salt).abi_encode_packed());
    if let Some(fee) = submitter_fee {
        packed.extend_from_slice(&fee.to_be_bytes::<32>());
    }
    keccak256(packed)
}

/// Left fold of per-order fill hashes: `acc = keccak256(acc ‖ fill(i))`.
pub fn compute_multi_fill_hash(
    orders: &[LegacyOrder],
    taker_amounts: &[U256],
    fill_salt: U256,
    submitter_fee: Option<U256>,
) -> Result<B256> {
    if orders.len() != taker_amounts.len() {
        return Err(Error::schema(format!(
            "{} orders but {} taker amounts",
            orders.len(),
            taker_amounts.len()
        )));
    }

    let mut pairs = orders.iter().zip(taker_amounts);
    let (first, first_amount) = pairs
        .next()
        .ok_or_else(|| Error::schema("fill requires at least one order"))?;

    let acc = compute_fill_hash(first, *first_amount, fill_salt, submitter_fee);
    Ok(pairs.fold(acc, |acc, (order, amount)| {
        let next = compute_fill_hash(order, *amount, fill_salt, submitter_fee);
        keccak256((acc, next).abi_encode_packed())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    fn order(salt: u64) -> LegacyOrder {
        LegacyOrder {
            market_hash: b256!("6dad8a2e7d9ca9a2a097deea2efeaec67f82f8ec53222ae9c83312f7a284e9b6"),
            maker: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            total_bet_size: U256::from(1000u64),
            percentage_odds: U256::from(40_000_000_000_000_000_000u128),
            expiry: U256::from(1_700_003_600u64),
            relayer: address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            relayer_maker_fee: U256::ZERO,
            relayer_taker_fee: U256::from(25u64),
            executor: address!("3E96B0a25d51e3Cc89C557f152797c33B839968f"),
            salt: U256::from(salt),
            is_maker_betting_outcome_one: false,
        }
    }

    #[test]
    fn test_fill_hash_appends_amount_and_salt() {
        let o = order(1);
        let mut expected = o.packed_encoding();
        expected.extend_from_slice(&U256::from(10u64).to_be_bytes::<32>());
        expected.extend_from_slice(&U256::from(7u64).to_be_bytes::<32>());

        assert_eq!(
            compute_fill_hash(&o, U256::from(10u64), U256::from(7u64), None),
            keccak256(expected)
        );
    }

    #[test]
    fn test_absent_fee_is_not_zero_fee() {
        let o = order(1);
        let without = compute_fill_hash(&o, U256::from(10u64), U256::from(7u64), None);
        let zero = compute_fill_hash(&o, U256::from(10u64), U256::from(7u64), Some(U256::ZERO));
        assert_ne!(without, zero);
    }

    #[test]
    fn test_single_order_chain_equals_fill_hash() {
        let o = order(1);
        let salt = U256::from(42u64);
        let chained = compute_multi_fill_hash(&[o.clone()], &[U256::from(5u64)], salt, None).unwrap();
        assert_eq!(chained, compute_fill_hash(&o, U256::from(5u64), salt, None));
    }

    #[test]
    fn test_chain_is_left_fold() {
        let (a, b, c) = (order(1), order(2), order(3));
        let amounts = [U256::from(5u64), U256::from(6u64), U256::from(7u64)];
        let salt = U256::from(42u64);

        let ha = compute_fill_hash(&a, amounts[0], salt, None);
        let hb = compute_fill_hash(&b, amounts[1], salt, None);
        let hc = compute_fill_hash(&c, amounts[2], salt, None);
        let ab = keccak256([ha.as_slice(), hb.as_slice()].concat());
        let expected = keccak256([ab.as_slice(), hc.as_slice()].concat());

        let chained = compute_multi_fill_hash(&[a, b, c], &amounts, salt, None).unwrap();
        assert_eq!(chained, expected);
    }

    #[test]
    fn test_chain_is_order_sensitive() {
        let salt = U256::from(42u64);
        let amounts = [U256::from(5u64), U256::from(6u64)];
        let forward = compute_multi_fill_hash(&[order(1), order(2)], &amounts, salt, None).unwrap();
        let reversed = compute_multi_fill_hash(
            &[order(2), order(1)],
            &[amounts[1], amounts[0]],
            salt,
            None,
        )
        .unwrap();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = compute_multi_fill_hash(&[order(1)], &[], U256::ZERO, None);
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_empty_chain_rejected() {
        let result = compute_multi_fill_hash(&[], &[], U256::ZERO, None);
        assert!(matches!(result, Err(Error::Schema(_))));
    }
}
