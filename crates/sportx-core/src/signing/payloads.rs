//! EIP-712 typed-data payloads.
//!
//! A payload is a [`TypedData`] envelope around one message type. The JSON
//! form (`types`, `primaryType`, `domain`, `message`) is what a wallet signs
//! with `eth_signTypedData_v4`; [`TypedData::signing_hash`] is the digest the
//! same wallet would produce, computed locally from `sol!` mirrors of each
//! message. The `types` section is derived from those mirrors, so the JSON a
//! wallet sees and the locally computed digest cannot drift apart.

pub mod approval;
pub mod cancel;
pub mod fill;

pub use approval::{meta_transaction_payload, permit_payload};
pub use cancel::{
    cancel_all_payload, cancel_event_payload, cancel_order_payload, cancel_order_payload_v1,
};
pub use fill::{
    beneficiary_fill_order_payload, fill_order_payload, order_payload, salted_fill_order_payload,
    BeneficiaryFillObject, FillDetails, FillObject,
};

use std::collections::BTreeMap;

use alloy_primitives::B256;
use alloy_sol_types::{Eip712Domain, SolStruct};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{domain_type_definitions, DomainData};
use crate::Result;

/// Single field of an EIP-712 struct type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A message that can be placed in a typed-data envelope.
pub trait Eip712Message: Serialize {
    /// Solidity mirror of the message; its name is the payload's primary type.
    type SolType: SolStruct;

    fn to_sol(&self) -> Self::SolType;
}

/// Split an EIP-712 `encodeType` string into per-struct field lists.
///
/// `Details(string action,FillObject fills)FillObject(uint256 fillSalt)`
/// yields entries for `Details` and `FillObject`.
fn parse_encode_type(encoded: &str) -> BTreeMap<String, Vec<TypeDefinition>> {
    encoded
        .split_terminator(')')
        .filter_map(|chunk| {
            let (struct_name, fields) = chunk.split_once('(')?;
            let fields = fields
                .split(',')
                .filter(|field| !field.is_empty())
                .filter_map(|field| {
                    let (type_name, name) = field.rsplit_once(' ')?;
                    Some(TypeDefinition::new(name, type_name))
                })
                .collect();
            Some((struct_name.to_string(), fields))
        })
        .collect()
}

/// Full typed-data payload for one message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData<M> {
    pub types: BTreeMap<String, Vec<TypeDefinition>>,
    pub primary_type: String,
    pub domain: DomainData,
    pub message: M,
    #[serde(skip)]
    eip712_domain: Eip712Domain,
}

impl<M: Eip712Message> TypedData<M> {
    pub fn new(domain: Eip712Domain, message: M) -> Self {
        let mut types = parse_encode_type(&<M::SolType as SolStruct>::eip712_encode_type());
        types.insert("EIP712Domain".to_string(), domain_type_definitions(&domain));

        Self {
            types,
            primary_type: <M::SolType as SolStruct>::NAME.to_string(),
            domain: DomainData::from(&domain),
            message,
            eip712_domain: domain,
        }
    }

    pub fn eip712_domain(&self) -> &Eip712Domain {
        &self.eip712_domain
    }

    /// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(message))`
    pub fn signing_hash(&self) -> B256 {
        self.message.to_sol().eip712_signing_hash(&self.eip712_domain)
    }

    /// Type-erased form handed to a [`SignerAdapter`](super::SignerAdapter).
    pub fn to_payload(&self) -> Result<TypedDataPayload> {
        Ok(TypedDataPayload {
            json: serde_json::to_value(self)?,
            signing_hash: self.signing_hash(),
        })
    }
}

/// A typed-data payload as JSON together with its EIP-712 digest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypedDataPayload {
    json: Value,
    #[serde(skip)]
    signing_hash: B256,
}

impl TypedDataPayload {
    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn signing_hash(&self) -> B256 {
        self.signing_hash
    }

    pub fn primary_type(&self) -> Option<&str> {
        self.json.get("primaryType").and_then(Value::as_str)
    }

    /// Compact JSON string, as `eth_signTypedData_v4` expects it.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.json)?)
    }
}
