//! Order hashes.

use alloy_primitives::{keccak256, B256};
use alloy_sol_types::SolValue;

use crate::types::{BaseTokenOrder, ContractOrder, LegacyOrder};

impl BaseTokenOrder {
    /// `abi.encodePacked(marketHash, baseToken, totalBetSize, percentageOdds,
    /// expiry, salt, maker, executor, isMakerBettingOutcomeOne)`
    pub fn packed_encoding(&self) -> Vec<u8> {
        (
            self.market_hash,
            self.base_token,
            self.total_bet_size,
            self.percentage_odds,
            self.expiry,
            self.salt,
            self.maker,
            self.executor,
            self.is_maker_betting_outcome_one,
        )
            .abi_encode_packed()
    }

    pub fn order_hash(&self) -> B256 {
        keccak256(self.packed_encoding())
    }
}

impl LegacyOrder {
    /// `abi.encodePacked(marketHash, totalBetSize, percentageOdds, expiry,
    /// relayerMakerFee, relayerTakerFee, salt, maker, relayer, executor,
    /// isMakerBettingOutcomeOne)`
    pub fn packed_encoding(&self) -> Vec<u8> {
        (
            self.market_hash,
            self.total_bet_size,
            self.percentage_odds,
            self.expiry,
            self.relayer_maker_fee,
            self.relayer_taker_fee,
            self.salt,
            self.maker,
            self.relayer,
            self.executor,
            self.is_maker_betting_outcome_one,
        )
            .abi_encode_packed()
    }

    pub fn order_hash(&self) -> B256 {
        keccak256(self.packed_encoding())
    }
}

impl ContractOrder {
    pub fn packed_encoding(&self) -> Vec<u8> {
        match self {
            ContractOrder::BaseToken(order) => order.packed_encoding(),
            ContractOrder::Legacy(order) => order.packed_encoding(),
        }
    }

    pub fn order_hash(&self) -> B256 {
        keccak256(self.packed_encoding())
    }
}

/// Order hash using the layout of the order's own schema.
pub fn compute_order_hash(order: &ContractOrder) -> B256 {
    order.order_hash()
}
