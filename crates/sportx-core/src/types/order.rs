//! Maker order types.
//!
//! Orders travel over the wire with every number encoded as a string. The
//! exchange has shipped two incompatible order layouts; which one is in use
//! is fixed per deployment by [`OrderSchema`], never guessed from the data.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use super::wire;

/// Order layout understood by the deployed exchange contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSchema {
    /// Orders denominated in an explicit base token.
    BaseToken,
    /// Early orders carrying relayer address and relayer fees.
    LegacyRelayerFee,
}

impl std::fmt::Display for OrderSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSchema::BaseToken => write!(f, "base-token"),
            OrderSchema::LegacyRelayerFee => write!(f, "legacy-relayer-fee"),
        }
    }
}

/// Caller request for a new maker order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub market_hash: String,
    /// Bet size in base units of the token.
    pub total_bet_size: String,
    /// Fixed-point odds, strictly below 10^20.
    pub percentage_odds: String,
    /// Unix seconds.
    pub expiry: u64,
    pub is_maker_betting_outcome_one: bool,
    /// Required by the base-token schema, ignored by the legacy one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_token: Option<String>,
}

/// Base-token maker order as exchanged with the relayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerMakerOrder {
    pub market_hash: String,
    pub base_token: String,
    pub maker: String,
    pub total_bet_size: String,
    pub percentage_odds: String,
    pub expiry: String,
    /// Relayer-side expiry; not part of the order hash.
    #[serde(default)]
    pub api_expiry: u64,
    pub executor: String,
    pub salt: String,
    pub is_maker_betting_outcome_one: bool,
}

/// Legacy relayer-fee maker order as exchanged with the relayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRelayerMakerOrder {
    pub market_hash: String,
    pub maker: String,
    pub total_bet_size: String,
    pub percentage_odds: String,
    pub expiry: String,
    pub relayer: String,
    pub relayer_maker_fee: String,
    pub relayer_taker_fee: String,
    pub executor: String,
    pub salt: String,
    pub is_maker_betting_outcome_one: bool,
}

/// A wire order in either layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WireOrder {
    BaseToken(RelayerMakerOrder),
    Legacy(LegacyRelayerMakerOrder),
}

impl WireOrder {
    /// Layout of this order.
    pub fn schema(&self) -> OrderSchema {
        match self {
            WireOrder::BaseToken(_) => OrderSchema::BaseToken,
            WireOrder::Legacy(_) => OrderSchema::LegacyRelayerFee,
        }
    }

    pub fn maker(&self) -> &str {
        match self {
            WireOrder::BaseToken(order) => &order.maker,
            WireOrder::Legacy(order) => &order.maker,
        }
    }

    pub fn market_hash(&self) -> &str {
        match self {
            WireOrder::BaseToken(order) => &order.market_hash,
            WireOrder::Legacy(order) => &order.market_hash,
        }
    }
}

impl From<RelayerMakerOrder> for WireOrder {
    fn from(order: RelayerMakerOrder) -> Self {
        WireOrder::BaseToken(order)
    }
}

impl From<LegacyRelayerMakerOrder> for WireOrder {
    fn from(order: LegacyRelayerMakerOrder) -> Self {
        WireOrder::Legacy(order)
    }
}

/// A maker order together with the maker's signature.
///
/// Immutable once built: fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedOrder {
    #[serde(flatten)]
    order: WireOrder,
    signature: String,
}

impl SignedOrder {
    pub fn new(order: WireOrder, signature: String) -> Self {
        Self { order, signature }
    }

    pub fn order(&self) -> &WireOrder {
        &self.order
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn into_parts(self) -> (WireOrder, String) {
        (self.order, self.signature)
    }
}

/// Base-token order with every numeric field parsed.
///
/// Serializes as the `Order` message of typed-data payloads: numbers as
/// decimal strings, addresses checksummed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTokenOrder {
    #[serde(serialize_with = "wire::display")]
    pub market_hash: B256,
    #[serde(serialize_with = "wire::checksummed")]
    pub base_token: Address,
    #[serde(serialize_with = "wire::display")]
    pub total_bet_size: U256,
    #[serde(serialize_with = "wire::display")]
    pub percentage_odds: U256,
    #[serde(serialize_with = "wire::display")]
    pub expiry: U256,
    #[serde(serialize_with = "wire::display")]
    pub salt: U256,
    #[serde(serialize_with = "wire::checksummed")]
    pub maker: Address,
    #[serde(serialize_with = "wire::checksummed")]
    pub executor: Address,
    pub is_maker_betting_outcome_one: bool,
}

/// Legacy relayer-fee order with every numeric field parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyOrder {
    pub market_hash: B256,
    pub maker: Address,
    pub total_bet_size: U256,
    pub percentage_odds: U256,
    pub expiry: U256,
    pub relayer: Address,
    pub relayer_maker_fee: U256,
    pub relayer_taker_fee: U256,
    pub executor: Address,
    pub salt: U256,
    pub is_maker_betting_outcome_one: bool,
}

/// Canonical order in the form the exchange contract hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractOrder {
    BaseToken(BaseTokenOrder),
    Legacy(LegacyOrder),
}

impl ContractOrder {
    pub fn schema(&self) -> OrderSchema {
        match self {
            ContractOrder::BaseToken(_) => OrderSchema::BaseToken,
            ContractOrder::Legacy(_) => OrderSchema::LegacyRelayerFee,
        }
    }

    pub fn maker(&self) -> Address {
        match self {
            ContractOrder::BaseToken(order) => order.maker,
            ContractOrder::Legacy(order) => order.maker,
        }
    }

    pub fn salt(&self) -> U256 {
        match self {
            ContractOrder::BaseToken(order) => order.salt,
            ContractOrder::Legacy(order) => order.salt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relayer_order() -> RelayerMakerOrder {
        RelayerMakerOrder {
            market_hash: "0x6dad8a2e7d9ca9a2a097deea2efeaec67f82f8ec53222ae9c83312f7a284e9b6"
                .to_string(),
            base_token: "0x5147891461a7C81075950f8eE6384e019e39ab98".to_string(),
            maker: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            total_bet_size: "10000000000000000000".to_string(),
            percentage_odds: "50000000000000000000".to_string(),
            expiry: "1700003600".to_string(),
            api_expiry: 1700003600,
            executor: "0x3E96B0a25d51e3Cc89C557f152797c33B839968f".to_string(),
            salt: "12345".to_string(),
            is_maker_betting_outcome_one: true,
        }
    }

    #[test]
    fn test_relayer_order_serializes_camel_case() {
        let json = serde_json::to_value(relayer_order()).unwrap();
        assert_eq!(json["totalBetSize"], "10000000000000000000");
        assert_eq!(json["isMakerBettingOutcomeOne"], true);
        assert_eq!(json["apiExpiry"], 1700003600u64);
    }

    #[test]
    fn test_signed_order_flattens_order() {
        let signed = SignedOrder::new(relayer_order().into(), "0xdead".to_string());
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["signature"], "0xdead");
        assert_eq!(json["salt"], "12345");
        assert!(json.get("order").is_none());
    }

    #[test]
    fn test_wire_order_schema() {
        let order: WireOrder = relayer_order().into();
        assert_eq!(order.schema(), OrderSchema::BaseToken);
        assert_eq!(order.maker(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    }

    #[test]
    fn test_base_token_order_message_encoding() {
        let order = BaseTokenOrder {
            market_hash: relayer_order().market_hash.parse().unwrap(),
            base_token: relayer_order().base_token.parse().unwrap(),
            maker: relayer_order().maker.parse().unwrap(),
            total_bet_size: U256::from(10_000_000_000_000_000_000u128),
            percentage_odds: U256::from(50_000_000_000_000_000_000u128),
            expiry: U256::from(1_700_003_600u64),
            executor: relayer_order().executor.parse().unwrap(),
            salt: U256::from(12345u64),
            is_maker_betting_outcome_one: true,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["marketHash"], relayer_order().market_hash);
        assert_eq!(json["maker"], "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(json["percentageOdds"], "50000000000000000000");
        assert_eq!(json["salt"], "12345");
    }

    #[test]
    fn test_new_order_deserializes_without_base_token() {
        let json = r#"{
            "marketHash": "0x6dad8a2e7d9ca9a2a097deea2efeaec67f82f8ec53222ae9c83312f7a284e9b6",
            "totalBetSize": "1000",
            "percentageOdds": "50000000000000000000",
            "expiry": 1700003600,
            "isMakerBettingOutcomeOne": false
        }"#;
        let order: NewOrder = serde_json::from_str(json).unwrap();
        assert!(order.base_token.is_none());
        assert_eq!(order.expiry, 1700003600);
    }
}
