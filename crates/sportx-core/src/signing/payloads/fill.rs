//! Fill and order payloads under the `SportX` domain.

use alloy_primitives::{Address, Bytes, U256};
use serde::Serialize;

use super::{Eip712Message, TypedData};
use crate::signing::domain::{fill_domain, salted_fill_domain};
use crate::types::wire;
use crate::types::{BaseTokenOrder, FillDetailsMetadata};

use alloy_sol_types::Eip712Domain;

/// Solidity mirrors of the fill payload without a beneficiary.
pub mod plain {
    alloy_sol_types::sol! {
        struct Order {
            bytes32 marketHash;
            address baseToken;
            uint256 totalBetSize;
            uint256 percentageOdds;
            uint256 expiry;
            uint256 salt;
            address maker;
            address executor;
            bool isMakerBettingOutcomeOne;
        }

        struct FillObject {
            Order[] orders;
            bytes[] makerSigs;
            uint256[] takerAmounts;
            uint256 fillSalt;
        }

        struct Details {
            string action;
            string market;
            string betting;
            string stake;
            string odds;
            string returning;
            FillObject fills;
        }
    }
}

/// Solidity mirrors of the fill payload carrying a beneficiary.
pub mod with_beneficiary {
    alloy_sol_types::sol! {
        struct Order {
            bytes32 marketHash;
            address baseToken;
            uint256 totalBetSize;
            uint256 percentageOdds;
            uint256 expiry;
            uint256 salt;
            address maker;
            address executor;
            bool isMakerBettingOutcomeOne;
        }

        struct FillObject {
            Order[] orders;
            bytes[] makerSigs;
            uint256[] takerAmounts;
            uint256 fillSalt;
            address beneficiary;
        }

        struct Details {
            string action;
            string market;
            string betting;
            string stake;
            string odds;
            string returning;
            FillObject fills;
        }
    }
}

impl From<&BaseTokenOrder> for plain::Order {
    fn from(order: &BaseTokenOrder) -> Self {
        Self {
            marketHash: order.market_hash,
            baseToken: order.base_token,
            totalBetSize: order.total_bet_size,
            percentageOdds: order.percentage_odds,
            expiry: order.expiry,
            salt: order.salt,
            maker: order.maker,
            executor: order.executor,
            isMakerBettingOutcomeOne: order.is_maker_betting_outcome_one,
        }
    }
}

impl From<&BaseTokenOrder> for with_beneficiary::Order {
    fn from(order: &BaseTokenOrder) -> Self {
        Self {
            marketHash: order.market_hash,
            baseToken: order.base_token,
            totalBetSize: order.total_bet_size,
            percentageOdds: order.percentage_odds,
            expiry: order.expiry,
            salt: order.salt,
            maker: order.maker,
            executor: order.executor,
            isMakerBettingOutcomeOne: order.is_maker_betting_outcome_one,
        }
    }
}

/// Fill message: human-readable labels plus the orders being filled.
#[derive(Debug, Clone, Serialize)]
pub struct FillDetails<F> {
    #[serde(flatten)]
    pub metadata: FillDetailsMetadata,
    pub fills: F,
}

/// Orders, maker signatures and amounts of a fill.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillObject {
    pub orders: Vec<BaseTokenOrder>,
    #[serde(serialize_with = "wire::hex_bytes_seq")]
    pub maker_sigs: Vec<Bytes>,
    #[serde(serialize_with = "wire::display_seq")]
    pub taker_amounts: Vec<U256>,
    #[serde(serialize_with = "wire::display")]
    pub fill_salt: U256,
}

/// [`FillObject`] plus the address receiving the filled position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryFillObject {
    pub orders: Vec<BaseTokenOrder>,
    #[serde(serialize_with = "wire::hex_bytes_seq")]
    pub maker_sigs: Vec<Bytes>,
    #[serde(serialize_with = "wire::display_seq")]
    pub taker_amounts: Vec<U256>,
    #[serde(serialize_with = "wire::display")]
    pub fill_salt: U256,
    #[serde(serialize_with = "wire::checksummed")]
    pub beneficiary: Address,
}

impl FillObject {
    pub fn with_beneficiary(self, beneficiary: Address) -> BeneficiaryFillObject {
        BeneficiaryFillObject {
            orders: self.orders,
            maker_sigs: self.maker_sigs,
            taker_amounts: self.taker_amounts,
            fill_salt: self.fill_salt,
            beneficiary,
        }
    }
}

impl Eip712Message for BaseTokenOrder {
    type SolType = plain::Order;

    fn to_sol(&self) -> Self::SolType {
        self.into()
    }
}

impl Eip712Message for FillDetails<FillObject> {
    type SolType = plain::Details;

    fn to_sol(&self) -> Self::SolType {
        let metadata = self.metadata.clone();
        plain::Details {
            action: metadata.action,
            market: metadata.market,
            betting: metadata.betting,
            stake: metadata.stake,
            odds: metadata.odds,
            returning: metadata.returning,
            fills: plain::FillObject {
                orders: self.fills.orders.iter().map(Into::into).collect(),
                makerSigs: self.fills.maker_sigs.clone(),
                takerAmounts: self.fills.taker_amounts.clone(),
                fillSalt: self.fills.fill_salt,
            },
        }
    }
}

impl Eip712Message for FillDetails<BeneficiaryFillObject> {
    type SolType = with_beneficiary::Details;

    fn to_sol(&self) -> Self::SolType {
        let metadata = self.metadata.clone();
        with_beneficiary::Details {
            action: metadata.action,
            market: metadata.market,
            betting: metadata.betting,
            stake: metadata.stake,
            odds: metadata.odds,
            returning: metadata.returning,
            fills: with_beneficiary::FillObject {
                orders: self.fills.orders.iter().map(Into::into).collect(),
                makerSigs: self.fills.maker_sigs.clone(),
                takerAmounts: self.fills.taker_amounts.clone(),
                fillSalt: self.fills.fill_salt,
                beneficiary: self.fills.beneficiary,
            },
        }
    }
}

/// Fill payload bound to `{name, version, chainId, verifyingContract}`.
pub fn fill_order_payload(
    details: FillDetails<FillObject>,
    version: &'static str,
    chain_id: u64,
    verifying_contract: Address,
) -> TypedData<FillDetails<FillObject>> {
    TypedData::new(fill_domain(version, chain_id, verifying_contract), details)
}

/// Fill payload with a beneficiary, bound to a `chainId` domain.
pub fn beneficiary_fill_order_payload(
    details: FillDetails<BeneficiaryFillObject>,
    version: &'static str,
    chain_id: u64,
    verifying_contract: Address,
) -> TypedData<FillDetails<BeneficiaryFillObject>> {
    TypedData::new(fill_domain(version, chain_id, verifying_contract), details)
}

/// Fill payload with a beneficiary, bound to a domain whose `salt` is the
/// left-padded chain id.
pub fn salted_fill_order_payload(
    details: FillDetails<BeneficiaryFillObject>,
    version: &'static str,
    chain_id: u64,
    verifying_contract: Address,
) -> TypedData<FillDetails<BeneficiaryFillObject>> {
    TypedData::new(salted_fill_domain(version, chain_id, verifying_contract), details)
}

/// A single maker order as typed data, under the deployment's fill domain.
pub fn order_payload(order: BaseTokenOrder, fill_domain: Eip712Domain) -> TypedData<BaseTokenOrder> {
    TypedData::new(fill_domain, order)
}
