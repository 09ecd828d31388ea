//! Conversion between wire orders (string fields) and canonical contract orders.

use alloy_primitives::{Address, U256};
use serde::Deserialize;

use crate::types::{
    BaseTokenOrder, ContractOrder, LegacyOrder, LegacyRelayerMakerOrder, OrderSchema,
    RelayerMakerOrder, SignedOrder, WireOrder,
};
use crate::validation::{parse_address, parse_hash, parse_uint};
use crate::{Error, Result};

/// Order codec bound to the deployment's order schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderCodec {
    schema: OrderSchema,
}

#[derive(Deserialize)]
struct SignatureField {
    signature: String,
}

impl OrderCodec {
    pub fn new(schema: OrderSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> OrderSchema {
        self.schema
    }

    fn ensure_schema(&self, found: OrderSchema) -> Result<()> {
        if found != self.schema {
            return Err(Error::schema(format!(
                "{} order given to a {} deployment",
                found, self.schema
            )));
        }
        Ok(())
    }

    /// Parse every numeric string into `U256` and every address and hash into its typed form.
    pub fn to_canonical(&self, order: &WireOrder) -> Result<ContractOrder> {
        self.ensure_schema(order.schema())?;
        match order {
            WireOrder::BaseToken(order) => Ok(ContractOrder::BaseToken(BaseTokenOrder {
                market_hash: parse_hash(&order.market_hash)?,
                base_token: parse_address(&order.base_token)?,
                maker: parse_address(&order.maker)?,
                total_bet_size: parse_uint("totalBetSize", &order.total_bet_size)?,
                percentage_odds: parse_uint("percentageOdds", &order.percentage_odds)?,
                expiry: parse_uint("expiry", &order.expiry)?,
                executor: parse_address(&order.executor)?,
                salt: parse_uint("salt", &order.salt)?,
                is_maker_betting_outcome_one: order.is_maker_betting_outcome_one,
            })),
            WireOrder::Legacy(order) => Ok(ContractOrder::Legacy(LegacyOrder {
                market_hash: parse_hash(&order.market_hash)?,
                maker: parse_address(&order.maker)?,
                total_bet_size: parse_uint("totalBetSize", &order.total_bet_size)?,
                percentage_odds: parse_uint("percentageOdds", &order.percentage_odds)?,
                expiry: parse_uint("expiry", &order.expiry)?,
                relayer: parse_address(&order.relayer)?,
                relayer_maker_fee: parse_uint("relayerMakerFee", &order.relayer_maker_fee)?,
                relayer_taker_fee: parse_uint("relayerTakerFee", &order.relayer_taker_fee)?,
                executor: parse_address(&order.executor)?,
                salt: parse_uint("salt", &order.salt)?,
                is_maker_betting_outcome_one: order.is_maker_betting_outcome_one,
            })),
        }
    }

    /// Render a canonical order back to its wire form.
    ///
    /// `api_expiry` only applies to base-token orders.
    pub fn to_wire(&self, order: &ContractOrder, api_expiry: u64) -> Result<WireOrder> {
        self.ensure_schema(order.schema())?;
        let address = |a: &Address| a.to_checksum(None);
        let uint = |v: &U256| v.to_string();

        Ok(match order {
            ContractOrder::BaseToken(order) => WireOrder::BaseToken(RelayerMakerOrder {
                market_hash: order.market_hash.to_string(),
                base_token: address(&order.base_token),
                maker: address(&order.maker),
                total_bet_size: uint(&order.total_bet_size),
                percentage_odds: uint(&order.percentage_odds),
                expiry: uint(&order.expiry),
                api_expiry,
                executor: address(&order.executor),
                salt: uint(&order.salt),
                is_maker_betting_outcome_one: order.is_maker_betting_outcome_one,
            }),
            ContractOrder::Legacy(order) => WireOrder::Legacy(LegacyRelayerMakerOrder {
                market_hash: order.market_hash.to_string(),
                maker: address(&order.maker),
                total_bet_size: uint(&order.total_bet_size),
                percentage_odds: uint(&order.percentage_odds),
                expiry: uint(&order.expiry),
                relayer: address(&order.relayer),
                relayer_maker_fee: uint(&order.relayer_maker_fee),
                relayer_taker_fee: uint(&order.relayer_taker_fee),
                executor: address(&order.executor),
                salt: uint(&order.salt),
                is_maker_betting_outcome_one: order.is_maker_betting_outcome_one,
            }),
        })
    }

    /// Deserialize a relayer order using this deployment's layout.
    pub fn parse_wire(&self, value: serde_json::Value) -> Result<WireOrder> {
        let order = match self.schema {
            OrderSchema::BaseToken => {
                WireOrder::BaseToken(serde_json::from_value::<RelayerMakerOrder>(value)?)
            }
            OrderSchema::LegacyRelayerFee => {
                WireOrder::Legacy(serde_json::from_value::<LegacyRelayerMakerOrder>(value)?)
            }
        };
        Ok(order)
    }

    /// Deserialize a signed relayer order (order fields plus `signature`).
    pub fn parse_signed(&self, value: serde_json::Value) -> Result<SignedOrder> {
        let SignatureField { signature } = serde_json::from_value(value.clone())?;
        let order = self.parse_wire(value)?;
        Ok(SignedOrder::new(order, signature))
    }
}
