//! Cancellation payloads.

use alloy_primitives::U256;

use super::{Eip712Message, TypedData};
use crate::signing::domain::{
    cancel_all_domain, cancel_event_domain, cancel_orders_domain, cancel_orders_v1_domain,
};
use crate::types::{CancelAllDetails, CancelEventDetails, CancelOrdersDetails, CancelOrdersDetailsV1};

/// Early cancel-by-hashes message.
pub mod by_hashes_v1 {
    alloy_sol_types::sol! {
        struct Details {
            string message;
            string[] orders;
        }
    }
}

pub mod by_hashes {
    alloy_sol_types::sol! {
        struct Details {
            string[] orderHashes;
            bytes32 salt;
            uint256 timestamp;
        }
    }
}

pub mod all {
    alloy_sol_types::sol! {
        struct Details {
            bytes32 salt;
            uint256 timestamp;
        }
    }
}

pub mod by_event {
    alloy_sol_types::sol! {
        struct Details {
            string sportXEventId;
            bytes32 salt;
            uint256 timestamp;
        }
    }
}

impl Eip712Message for CancelOrdersDetailsV1 {
    type SolType = by_hashes_v1::Details;

    fn to_sol(&self) -> Self::SolType {
        by_hashes_v1::Details {
            message: self.message.clone(),
            orders: self.orders.clone(),
        }
    }
}

impl Eip712Message for CancelOrdersDetails {
    type SolType = by_hashes::Details;

    fn to_sol(&self) -> Self::SolType {
        by_hashes::Details {
            orderHashes: self.order_hashes.clone(),
            salt: self.salt,
            timestamp: U256::from(self.timestamp),
        }
    }
}

impl Eip712Message for CancelAllDetails {
    type SolType = all::Details;

    fn to_sol(&self) -> Self::SolType {
        all::Details {
            salt: self.salt,
            timestamp: U256::from(self.timestamp),
        }
    }
}

impl Eip712Message for CancelEventDetails {
    type SolType = by_event::Details;

    fn to_sol(&self) -> Self::SolType {
        by_event::Details {
            sportXEventId: self.sportx_event_id.clone(),
            salt: self.salt,
            timestamp: U256::from(self.timestamp),
        }
    }
}

/// `{message, orders}` under `{name: "CancelOrderSportX", version: "1.0", chainId}`.
pub fn cancel_order_payload_v1(
    details: CancelOrdersDetailsV1,
    chain_id: u64,
) -> TypedData<CancelOrdersDetailsV1> {
    TypedData::new(cancel_orders_v1_domain(chain_id), details)
}

/// `{orderHashes, salt, timestamp}` under `{name: "CancelOrderV2SportX", chainId}`.
pub fn cancel_order_payload(details: CancelOrdersDetails, chain_id: u64) -> TypedData<CancelOrdersDetails> {
    TypedData::new(cancel_orders_domain(chain_id), details)
}

pub fn cancel_all_payload(details: CancelAllDetails, chain_id: u64) -> TypedData<CancelAllDetails> {
    TypedData::new(cancel_all_domain(chain_id), details)
}

pub fn cancel_event_payload(details: CancelEventDetails, chain_id: u64) -> TypedData<CancelEventDetails> {
    TypedData::new(cancel_event_domain(chain_id), details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{keccak256, B256};
    use alloy_sol_types::SolValue;

    fn digest(separator: B256, struct_hash: B256) -> B256 {
        let mut input = vec![0x19, 0x01];
        input.extend_from_slice(separator.as_slice());
        input.extend_from_slice(struct_hash.as_slice());
        keccak256(input)
    }

    #[test]
    fn test_cancel_all_hash_matches_manual_encoding() {
        let details = CancelAllDetails {
            salt: B256::with_last_byte(9),
            timestamp: 1_700_000_000,
        };
        let payload = cancel_all_payload(details.clone(), 137);

        let type_hash = keccak256("Details(bytes32 salt,uint256 timestamp)");
        let struct_hash =
            keccak256((type_hash, details.salt, U256::from(details.timestamp)).abi_encode());

        assert_eq!(
            payload.signing_hash(),
            digest(payload.eip712_domain().separator(), struct_hash)
        );
    }

    #[test]
    fn test_cancel_v1_hash_matches_manual_encoding() {
        let details = CancelOrdersDetailsV1 {
            message: "N/A".to_string(),
            orders: vec!["0xaa".to_string(), "0xbb".to_string()],
        };
        let payload = cancel_order_payload_v1(details, 1);

        let type_hash = keccak256("Details(string message,string[] orders)");
        let orders_hash = keccak256(
            [keccak256("0xaa").as_slice(), keccak256("0xbb").as_slice()].concat(),
        );
        let struct_hash = keccak256((type_hash, keccak256("N/A"), orders_hash).abi_encode());

        assert_eq!(
            payload.signing_hash(),
            digest(payload.eip712_domain().separator(), struct_hash)
        );
        assert_eq!(payload.domain.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_cancel_payload_shapes() {
        let orders = serde_json::to_value(cancel_order_payload(
            CancelOrdersDetails::fresh(vec!["0xaa".to_string()], 1_700_000_000),
            137,
        ))
        .unwrap();
        assert_eq!(orders["domain"]["name"], "CancelOrderV2SportX");
        assert!(orders["domain"].get("version").is_none());
        assert_eq!(orders["types"]["Details"][0]["name"], "orderHashes");
        assert_eq!(orders["types"]["Details"][0]["type"], "string[]");

        let event = serde_json::to_value(cancel_event_payload(
            CancelEventDetails::fresh("L7187811", 1_700_000_000),
            137,
        ))
        .unwrap();
        assert_eq!(event["domain"]["name"], "CancelOrderEventsSportX");
        assert_eq!(event["message"]["sportXEventId"], "L7187811");
        assert_eq!(event["message"]["timestamp"], "1700000000");
    }

    #[test]
    fn test_same_timestamp_different_salt_different_hash() {
        let first = cancel_all_payload(CancelAllDetails::fresh(1_700_000_000), 137);
        let second = cancel_all_payload(CancelAllDetails::fresh(1_700_000_000), 137);

        assert_ne!(first.message.salt, second.message.salt);
        assert_ne!(first.signing_hash(), second.signing_hash());
    }

    #[test]
    fn test_scopes_use_distinct_domains() {
        let salt = B256::with_last_byte(1);
        let all = cancel_all_payload(CancelAllDetails { salt, timestamp: 1 }, 137);
        let event = cancel_event_payload(
            CancelEventDetails {
                sportx_event_id: String::new(),
                salt,
                timestamp: 1,
            },
            137,
        );
        assert_ne!(
            all.eip712_domain().separator(),
            event.eip712_domain().separator()
        );
    }
}
