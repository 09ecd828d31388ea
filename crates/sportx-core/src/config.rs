//! Deployment configuration: which protocol version is live, on which chain,
//! and the contract addresses orders and fills are bound to.

use std::env;
use std::path::Path;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_sol_types::Eip712Domain;
use serde::{Deserialize, Serialize};

use crate::signing::domain::{fill_domain, salted_fill_domain};
use crate::types::OrderSchema;
use crate::validation::{parse_address, parse_uint};
use crate::{Error, Result};

/// How maker orders are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSigningStrategy {
    /// EIP-191 personal-sign of the packed order hash.
    PersonalMessage,
    /// EIP-712 `Order` payload under the fill domain.
    TypedData,
}

/// How takers sign fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillSigningStrategy {
    /// Personal-sign of the chained legacy fill hash.
    ChainedHash,
    /// EIP-712 `Details` payload under a `chainId` domain.
    TypedData,
    /// As `TypedData`, with a beneficiary in the fill object.
    TypedDataWithBeneficiary,
    /// Beneficiary fill object under a domain salted with the chain id.
    SaltedTypedData,
}

/// Shape of cancel-by-hashes requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelShape {
    /// `{message, orders}`, no replay protection.
    EarlyMessage,
    /// `{orderHashes, salt, timestamp}`.
    Salted,
}

/// Protocol generations of the exchange contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolVersion {
    LegacyRelayer,
    V1,
    V3,
    V4,
}

impl ProtocolVersion {
    pub fn order_schema(&self) -> OrderSchema {
        match self {
            ProtocolVersion::LegacyRelayer => OrderSchema::LegacyRelayerFee,
            _ => OrderSchema::BaseToken,
        }
    }

    pub fn order_signing(&self) -> OrderSigningStrategy {
        match self {
            ProtocolVersion::V4 => OrderSigningStrategy::TypedData,
            _ => OrderSigningStrategy::PersonalMessage,
        }
    }

    pub fn fill_signing(&self) -> FillSigningStrategy {
        match self {
            ProtocolVersion::LegacyRelayer => FillSigningStrategy::ChainedHash,
            ProtocolVersion::V1 => FillSigningStrategy::TypedData,
            ProtocolVersion::V3 => FillSigningStrategy::TypedDataWithBeneficiary,
            ProtocolVersion::V4 => FillSigningStrategy::SaltedTypedData,
        }
    }

    pub fn cancel_shape(&self) -> CancelShape {
        match self {
            ProtocolVersion::LegacyRelayer | ProtocolVersion::V1 => CancelShape::EarlyMessage,
            ProtocolVersion::V3 | ProtocolVersion::V4 => CancelShape::Salted,
        }
    }

    /// `version` of the `SportX` domain; `None` where fills are not typed data.
    pub fn fill_domain_version(&self) -> Option<&'static str> {
        match self {
            ProtocolVersion::LegacyRelayer => None,
            ProtocolVersion::V1 => Some("1.0"),
            ProtocolVersion::V3 => Some("3.0"),
            ProtocolVersion::V4 => Some("4.0"),
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "legacy_relayer" | "legacy-relayer" => Ok(ProtocolVersion::LegacyRelayer),
            "v1" | "1" => Ok(ProtocolVersion::V1),
            "v3" | "3" => Ok(ProtocolVersion::V3),
            "v4" | "4" => Ok(ProtocolVersion::V4),
            other => Err(Error::Config {
                message: format!("unknown protocol version: {}", other),
            }),
        }
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolVersion::LegacyRelayer => write!(f, "legacy_relayer"),
            ProtocolVersion::V1 => write!(f, "v1"),
            ProtocolVersion::V3 => write!(f, "v3"),
            ProtocolVersion::V4 => write!(f, "v4"),
        }
    }
}

/// Deployment the signer produces artifacts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub version: ProtocolVersion,
    pub chain_id: u64,
    /// Verifying contract of the fill and order domains.
    pub fill_hasher_address: Address,
    pub executor_address: Address,
    /// Spender approved by permits and meta-transactions.
    pub token_transfer_proxy: Address,
    /// Legacy relayer-fee orders only.
    pub relayer_address: Option<Address>,
    pub relayer_maker_fee: U256,
    pub relayer_taker_fee: U256,
    /// Chain node used for token name and nonce reads.
    pub rpc_url: Option<String>,
}

/// File/environment form before address parsing.
#[derive(Debug, Deserialize)]
struct RawProtocolConfig {
    version: String,
    chain_id: u64,
    fill_hasher_address: String,
    executor_address: String,
    token_transfer_proxy: String,
    relayer_address: Option<String>,
    relayer_maker_fee: Option<String>,
    relayer_taker_fee: Option<String>,
    rpc_url: Option<String>,
}

fn config_error(message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| config_error(format!("{} environment variable not set", name)))
}

fn address_setting(name: &str, value: &str) -> Result<Address> {
    parse_address(value).map_err(|e| config_error(format!("{}: {}", name, e)))
}

fn fee_setting(name: &str, value: Option<&str>) -> Result<U256> {
    value
        .map(|v| parse_uint(name, v).map_err(|e| config_error(e.to_string())))
        .transpose()
        .map(|fee| fee.unwrap_or(U256::ZERO))
}

impl TryFrom<RawProtocolConfig> for ProtocolConfig {
    type Error = Error;

    fn try_from(raw: RawProtocolConfig) -> Result<Self> {
        let config = Self {
            version: raw.version.parse()?,
            chain_id: raw.chain_id,
            fill_hasher_address: address_setting("fill_hasher_address", &raw.fill_hasher_address)?,
            executor_address: address_setting("executor_address", &raw.executor_address)?,
            token_transfer_proxy: address_setting("token_transfer_proxy", &raw.token_transfer_proxy)?,
            relayer_address: raw
                .relayer_address
                .as_deref()
                .map(|a| address_setting("relayer_address", a))
                .transpose()?,
            relayer_maker_fee: fee_setting("relayer_maker_fee", raw.relayer_maker_fee.as_deref())?,
            relayer_taker_fee: fee_setting("relayer_taker_fee", raw.relayer_taker_fee.as_deref())?,
            rpc_url: raw.rpc_url,
        };
        config.validate()?;
        Ok(config)
    }
}

impl ProtocolConfig {
    pub fn new(
        version: ProtocolVersion,
        chain_id: u64,
        fill_hasher_address: Address,
        executor_address: Address,
        token_transfer_proxy: Address,
    ) -> Self {
        Self {
            version,
            chain_id,
            fill_hasher_address,
            executor_address,
            token_transfer_proxy,
            relayer_address: None,
            relayer_maker_fee: U256::ZERO,
            relayer_taker_fee: U256::ZERO,
            rpc_url: None,
        }
    }

    pub fn with_relayer(mut self, relayer: Address, maker_fee: U256, taker_fee: U256) -> Self {
        self.relayer_address = Some(relayer);
        self.relayer_maker_fee = maker_fee;
        self.relayer_taker_fee = taker_fee;
        self
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Load configuration from `SPORTX_*` environment variables (and `.env`).
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let raw = RawProtocolConfig {
            version: env::var("SPORTX_VERSION").unwrap_or_else(|_| "v1".to_string()),
            chain_id: required_var("SPORTX_CHAIN_ID")?
                .parse()
                .map_err(|_| config_error("SPORTX_CHAIN_ID is not an integer"))?,
            fill_hasher_address: required_var("SPORTX_FILL_HASHER_ADDRESS")?,
            executor_address: required_var("SPORTX_EXECUTOR_ADDRESS")?,
            token_transfer_proxy: required_var("SPORTX_TOKEN_TRANSFER_PROXY")?,
            relayer_address: env::var("SPORTX_RELAYER_ADDRESS").ok(),
            relayer_maker_fee: env::var("SPORTX_RELAYER_MAKER_FEE").ok(),
            relayer_taker_fee: env::var("SPORTX_RELAYER_TAKER_FEE").ok(),
            rpc_url: env::var("SPORTX_RPC_URL").ok(),
        };
        raw.try_into()
    }

    /// Load configuration from a file (format by extension), overlaid with
    /// `SPORTX_*` environment variables.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw: RawProtocolConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(true))
            .add_source(config::Environment::with_prefix("SPORTX"))
            .build()?
            .try_deserialize()?;
        raw.try_into()
    }

    /// Reject settings the configured version cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.chain_id == 0 {
            return Err(config_error("chain_id must be non-zero"));
        }
        if self.version.order_schema() == OrderSchema::LegacyRelayerFee
            && self.relayer_address.is_none()
        {
            return Err(config_error(
                "relayer_address is required for legacy relayer-fee orders",
            ));
        }
        Ok(())
    }

    pub fn order_schema(&self) -> OrderSchema {
        self.version.order_schema()
    }

    /// Domain of fill payloads and typed-data orders, if this version has one.
    pub fn fill_domain(&self) -> Option<Eip712Domain> {
        let version = self.version.fill_domain_version()?;
        Some(match self.version.fill_signing() {
            FillSigningStrategy::SaltedTypedData => {
                salted_fill_domain(version, self.chain_id, self.fill_hasher_address)
            }
            _ => fill_domain(version, self.chain_id, self.fill_hasher_address),
        })
    }

    /// Fixture deployment on Polygon.
    #[cfg(test)]
    pub fn test_config(version: ProtocolVersion) -> Self {
        use alloy_primitives::address;

        let config = Self::new(
            version,
            137,
            address!("ccF2a5b9D6E1B5A2f3e8f7b5Ae1a5D2a2C6b6E41"),
            address!("3E96B0a25d51e3Cc89C557f152797c33B839968f"),
            address!("Cc4fBba7D0E0F2A03113F42f5D3aE80d9B2aD55d"),
        );
        match version {
            ProtocolVersion::LegacyRelayer => config.with_relayer(
                address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
                U256::ZERO,
                U256::from(25u64),
            ),
            _ => config,
        }
    }
}
