//! EIP-712 domains for SportX payloads.
//!
//! Every payload family binds to its own domain shape. Some carry a version,
//! some replace `chainId` with a `salt`, and the cancel domains omit the
//! verifying contract. Each shape gets its own constructor so none of them
//! is expressed as a generic domain with optional fields.

use std::borrow::Cow;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::Eip712Domain;
use serde::Serialize;

use super::payloads::TypeDefinition;

/// Name of the fill and order domain.
pub const SPORTX_DOMAIN_NAME: &str = "SportX";

/// Domain name of the early cancel-by-hashes payload.
pub const CANCEL_ORDER_V1_DOMAIN_NAME: &str = "CancelOrderSportX";

/// Version of the early cancel-by-hashes domain.
pub const CANCEL_ORDER_V1_DOMAIN_VERSION: &str = "1.0";

pub const CANCEL_ORDER_DOMAIN_NAME: &str = "CancelOrderV2SportX";
pub const CANCEL_ALL_DOMAIN_NAME: &str = "CancelAllOrdersSportX";
pub const CANCEL_EVENT_DOMAIN_NAME: &str = "CancelOrderEventsSportX";

/// Version used by meta-transaction enabled tokens.
pub const META_TRANSACTION_DOMAIN_VERSION: &str = "1";

/// Chain id left-padded to 32 bytes, used where a domain carries `salt`
/// instead of `chainId`.
pub fn chain_id_salt(chain_id: u64) -> B256 {
    B256::left_padding_from(&chain_id.to_be_bytes())
}

/// `{name: "SportX", version, chainId, verifyingContract}`
pub fn fill_domain(version: &'static str, chain_id: u64, verifying_contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(SPORTX_DOMAIN_NAME)),
        Some(Cow::Borrowed(version)),
        Some(U256::from(chain_id)),
        Some(verifying_contract),
        None,
    )
}

/// `{name: "SportX", version, verifyingContract, salt: leftPad32(chainId)}`
pub fn salted_fill_domain(
    version: &'static str,
    chain_id: u64,
    verifying_contract: Address,
) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(SPORTX_DOMAIN_NAME)),
        Some(Cow::Borrowed(version)),
        None,
        Some(verifying_contract),
        Some(chain_id_salt(chain_id)),
    )
}

/// `{name: "CancelOrderSportX", version: "1.0", chainId}`
pub fn cancel_orders_v1_domain(chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(CANCEL_ORDER_V1_DOMAIN_NAME)),
        Some(Cow::Borrowed(CANCEL_ORDER_V1_DOMAIN_VERSION)),
        Some(U256::from(chain_id)),
        None,
        None,
    )
}

fn name_and_chain(name: &'static str, chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(name)),
        None,
        Some(U256::from(chain_id)),
        None,
        None,
    )
}

/// `{name: "CancelOrderV2SportX", chainId}`
pub fn cancel_orders_domain(chain_id: u64) -> Eip712Domain {
    name_and_chain(CANCEL_ORDER_DOMAIN_NAME, chain_id)
}

/// `{name: "CancelAllOrdersSportX", chainId}`
pub fn cancel_all_domain(chain_id: u64) -> Eip712Domain {
    name_and_chain(CANCEL_ALL_DOMAIN_NAME, chain_id)
}

/// `{name: "CancelOrderEventsSportX", chainId}`
pub fn cancel_event_domain(chain_id: u64) -> Eip712Domain {
    name_and_chain(CANCEL_EVENT_DOMAIN_NAME, chain_id)
}

/// `{name: <token name>, version: "1", verifyingContract: token, salt: leftPad32(chainId)}`
pub fn meta_transaction_domain(token_name: String, token: Address, chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Owned(token_name)),
        Some(Cow::Borrowed(META_TRANSACTION_DOMAIN_VERSION)),
        None,
        Some(token),
        Some(chain_id_salt(chain_id)),
    )
}

/// `{name: <token name>, version: <token version>, chainId, verifyingContract: token}`
pub fn permit_domain(
    token_name: String,
    token_version: String,
    chain_id: u64,
    token: Address,
) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Owned(token_name)),
        Some(Cow::Owned(token_version)),
        Some(U256::from(chain_id)),
        Some(token),
        None,
    )
}

/// JSON rendering of a domain, as passed to `eth_signTypedData_v4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl From<&Eip712Domain> for DomainData {
    fn from(domain: &Eip712Domain) -> Self {
        Self {
            name: domain.name.as_ref().map(|name| name.to_string()),
            version: domain.version.as_ref().map(|version| version.to_string()),
            chain_id: domain.chain_id.and_then(|id| u64::try_from(id).ok()),
            verifying_contract: domain.verifying_contract.map(|a| a.to_checksum(None)),
            salt: domain.salt.map(|salt| salt.to_string()),
        }
    }
}

/// `EIP712Domain` type entries for exactly the fields present, in canonical order.
pub fn domain_type_definitions(domain: &Eip712Domain) -> Vec<TypeDefinition> {
    let mut fields = Vec::new();
    if domain.name.is_some() {
        fields.push(TypeDefinition::new("name", "string"));
    }
    if domain.version.is_some() {
        fields.push(TypeDefinition::new("version", "string"));
    }
    if domain.chain_id.is_some() {
        fields.push(TypeDefinition::new("chainId", "uint256"));
    }
    if domain.verifying_contract.is_some() {
        fields.push(TypeDefinition::new("verifyingContract", "address"));
    }
    if domain.salt.is_some() {
        fields.push(TypeDefinition::new("salt", "bytes32"));
    }
    fields
}
