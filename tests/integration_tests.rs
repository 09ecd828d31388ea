//! Integration tests across the core library and the wallet crate.

use alloy_primitives::{address, b256, eip191_hash_message, Address, Signature, B256, U256};
use sportx_core::codec::OrderCodec;
use sportx_core::config::{ProtocolConfig, ProtocolVersion};
use sportx_core::hashing::{compute_fill_hash, compute_multi_fill_hash, compute_order_hash, format_hash};
use sportx_core::odds::{decimal_to_fixed_point, fixed_point_to_decimal};
use sportx_core::signing::{OrderSigner, SignerAdapter};
use sportx_core::types::{BaseTokenOrder, ContractOrder, FillIntent, LegacyOrder, NewOrder};
use sportx_wallet::TradingWallet;

// Well-known development keys, never funded.
const MAKER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const TAKER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

const MAKER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const TAKER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
const EXECUTOR: Address = address!("3E96B0a25d51e3Cc89C557f152797c33B839968f");
const FILL_HASHER: Address = address!("ccF2a5b9D6E1B5A2f3e8f7b5Ae1a5D2a2C6b6E41");
const PROXY: Address = address!("Cc4fBba7D0E0F2A03113F42f5D3aE80d9B2aD55d");

const GOLDEN_ORDER_HASH: B256 =
    b256!("6a07d76045090d0fa317f5b5c12a57c2dc9a456fc4fc591840316f84158ce6b0");
const GOLDEN_MAKER_SIG: &str = "0x29c9c5e8bd19d67e1cfbddf489e590f40476e596c6fe2a9e1d8fba4b260681cd\
                                4d7337c98a43422a69eda5e22717d5b2da1c5f897c7f509ddb8eee9fe75261c61c";

fn config(version: ProtocolVersion) -> ProtocolConfig {
    ProtocolConfig::new(version, 137, FILL_HASHER, EXECUTOR, PROXY)
}

fn fixture_order() -> BaseTokenOrder {
    BaseTokenOrder {
        market_hash: b256!("6dad8a2e7d9ca9a2a097deea2efeaec67f82f8ec53222ae9c83312f7a284e9b6"),
        base_token: address!("5147891461a7C81075950f8eE6384e019e39ab98"),
        total_bet_size: U256::from(10_000_000_000_000_000_000u128),
        percentage_odds: U256::from(50_000_000_000_000_000_000u128),
        expiry: U256::from(2_209_006_800u64),
        salt: U256::from(123_456_789u64),
        maker: MAKER,
        executor: EXECUTOR,
        is_maker_betting_outcome_one: true,
    }
}

fn recover(signature: &str, prehash: B256) -> Address {
    let bytes = hex::decode(signature.trim_start_matches("0x")).unwrap();
    Signature::try_from(bytes.as_slice())
        .unwrap()
        .recover_address_from_prehash(&prehash)
        .unwrap()
}

/// Fixed salt and expiry give a fixed hash and, with the test key, a fixed
/// signature recovering to the maker.
#[tokio::test]
async fn test_golden_order_hash_and_signature() {
    let order = ContractOrder::BaseToken(fixture_order());
    let hash = compute_order_hash(&order);
    assert_eq!(hash, GOLDEN_ORDER_HASH);
    assert_eq!(
        format_hash(&hash),
        "0x6a07d76045090d0fa317f5b5c12a57c2dc9a456fc4fc591840316f84158ce6b0"
    );

    let wallet = TradingWallet::from_private_key(MAKER_KEY).unwrap();
    let signer = OrderSigner::new(config(ProtocolVersion::V3), wallet.into_signer()).unwrap();
    let signature = signer.sign_order(&order).await.unwrap();

    assert_eq!(signature, GOLDEN_MAKER_SIG);
    assert_eq!(recover(&signature, eip191_hash_message(hash)), MAKER);
}

#[test]
fn test_order_hash_changes_with_any_field() {
    let base = compute_order_hash(&ContractOrder::BaseToken(fixture_order()));
    let variants: Vec<Box<dyn Fn(&mut BaseTokenOrder)>> = vec![
        Box::new(|o: &mut BaseTokenOrder| o.salt += U256::from(1u64)),
        Box::new(|o: &mut BaseTokenOrder| o.expiry += U256::from(1u64)),
        Box::new(|o: &mut BaseTokenOrder| o.total_bet_size += U256::from(1u64)),
        Box::new(|o: &mut BaseTokenOrder| o.percentage_odds -= U256::from(1u64)),
        Box::new(|o: &mut BaseTokenOrder| o.is_maker_betting_outcome_one = false),
        Box::new(|o: &mut BaseTokenOrder| o.maker = TAKER),
        Box::new(|o: &mut BaseTokenOrder| o.executor = PROXY),
        Box::new(|o: &mut BaseTokenOrder| o.base_token = FILL_HASHER),
        Box::new(|o: &mut BaseTokenOrder| o.market_hash = B256::repeat_byte(1)),
    ];
    for mutate in variants {
        let mut order = fixture_order();
        mutate(&mut order);
        assert_ne!(compute_order_hash(&ContractOrder::BaseToken(order)), base);
    }
}

/// A maker signs, the order travels as JSON, a taker fills it.
#[tokio::test]
async fn test_order_to_fill_round_trip() {
    let maker = OrderSigner::new(
        config(ProtocolVersion::V3),
        TradingWallet::from_private_key(MAKER_KEY).unwrap().into_signer(),
    )
    .unwrap();
    let taker = OrderSigner::new(
        config(ProtocolVersion::V3),
        TradingWallet::from_private_key(TAKER_KEY).unwrap().into_signer(),
    )
    .unwrap();

    let signed = maker
        .new_order(NewOrder {
            market_hash: "0x6dad8a2e7d9ca9a2a097deea2efeaec67f82f8ec53222ae9c83312f7a284e9b6"
                .to_string(),
            total_bet_size: "10000000000000000000".to_string(),
            percentage_odds: decimal_to_fixed_point(0.5).unwrap().to_string(),
            expiry: 2_209_006_800,
            is_maker_betting_outcome_one: true,
            base_token: Some("0x5147891461a7C81075950f8eE6384e019e39ab98".to_string()),
        })
        .await
        .unwrap();

    let json = serde_json::to_value(&signed).unwrap();
    assert_eq!(json["maker"], MAKER.to_checksum(None));
    assert_eq!(json["percentageOdds"], "50000000000000000000");

    let received = OrderCodec::new(taker.config().order_schema())
        .parse_signed(json)
        .unwrap();
    assert_eq!(received, signed);

    let maker_hash = maker.codec().to_canonical(signed.order()).unwrap().order_hash();
    assert_eq!(
        recover(received.signature(), eip191_hash_message(maker_hash)),
        MAKER
    );

    let request = taker
        .fill_orders(
            FillIntent::new(vec![received], vec!["2500000000000000000".to_string()])
                .with_beneficiary(TAKER.to_checksum(None)),
        )
        .await
        .unwrap();
    assert_eq!(request.order_hashes, vec![format_hash(&maker_hash)]);
    assert_eq!(request.taker, TAKER.to_checksum(None));

    let request_json = serde_json::to_value(&request).unwrap();
    assert_eq!(request_json["beneficiary"], TAKER.to_checksum(None));
    assert_eq!(request_json["takerAmounts"][0], "2500000000000000000");
    assert_eq!(request_json["takerSig"].as_str().unwrap().len(), 132);
}

#[tokio::test]
async fn test_cancel_shapes_follow_version() {
    let wallet = TradingWallet::from_private_key(MAKER_KEY).unwrap();
    let hash = format_hash(&GOLDEN_ORDER_HASH);

    let early = OrderSigner::new(config(ProtocolVersion::V1), wallet.signer().clone()).unwrap();
    let json = serde_json::to_value(early.cancel_orders(vec![hash.clone()], None).await.unwrap()).unwrap();
    assert_eq!(json["message"], "N/A");
    assert_eq!(json["orders"][0], hash);
    assert!(json.get("cancelSignature").is_some());

    let salted = OrderSigner::new(config(ProtocolVersion::V4), wallet.into_signer()).unwrap();
    let json = serde_json::to_value(salted.cancel_orders(vec![hash.clone()], None).await.unwrap()).unwrap();
    assert_eq!(json["orderHashes"][0], hash);
    assert_eq!(json["maker"], MAKER.to_checksum(None));
    assert_eq!(json["salt"].as_str().unwrap().len(), 66);
    assert!(json.get("message").is_none());
}

#[test]
fn test_single_order_multi_fill_equals_fill_hash() {
    let order = LegacyOrder {
        market_hash: GOLDEN_ORDER_HASH,
        maker: MAKER,
        total_bet_size: U256::from(1000u64),
        percentage_odds: U256::from(40_000_000_000_000_000_000u128),
        expiry: U256::from(2_209_006_800u64),
        relayer: TAKER,
        relayer_maker_fee: U256::ZERO,
        relayer_taker_fee: U256::from(25u64),
        executor: EXECUTOR,
        salt: U256::from(7u64),
        is_maker_betting_outcome_one: false,
    };
    let amount = U256::from(10u64);
    let fill_salt = U256::from(99u64);

    assert_eq!(
        compute_multi_fill_hash(&[order.clone()], &[amount], fill_salt, None).unwrap(),
        compute_fill_hash(&order, amount, fill_salt, None)
    );
}

#[test]
fn test_odds_fixtures() {
    assert_eq!(decimal_to_fixed_point(0.5).unwrap().to_string(), "50000000000000000000");
    assert_eq!(
        fixed_point_to_decimal("88985727650227679586").unwrap(),
        0.8898572765022768
    );
}

#[test]
fn test_wallet_signer_address_matches_key() {
    let wallet = TradingWallet::from_private_key(TAKER_KEY).unwrap();
    assert_eq!(wallet.address(), TAKER);
    assert_eq!(wallet.signer().address(), TAKER);
}
