//! Cancellation intents and signed cancellation requests.

use alloy_primitives::B256;
use serde::Serialize;

use super::wire;
use crate::salt::random_bytes32;

/// What a maker wants cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelIntent {
    /// Specific orders by hash.
    ByHashes {
        order_hashes: Vec<String>,
        /// Free text, only carried by the early cancel shape.
        message: Option<String>,
    },
    /// Every open order of the account.
    All,
    /// Every open order on one sporting event.
    Event { sportx_event_id: String },
}

/// Early cancel-by-hashes message: free text plus the order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelOrdersDetailsV1 {
    pub message: String,
    pub orders: Vec<String>,
}

/// Replay-resistant cancel-by-hashes message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrdersDetails {
    pub order_hashes: Vec<String>,
    #[serde(serialize_with = "wire::display")]
    pub salt: B256,
    #[serde(serialize_with = "wire::display")]
    pub timestamp: u64,
}

impl CancelOrdersDetails {
    pub fn fresh(order_hashes: Vec<String>, timestamp: u64) -> Self {
        Self {
            order_hashes,
            salt: random_bytes32(),
            timestamp,
        }
    }
}

/// Cancel-all message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelAllDetails {
    #[serde(serialize_with = "wire::display")]
    pub salt: B256,
    #[serde(serialize_with = "wire::display")]
    pub timestamp: u64,
}

impl CancelAllDetails {
    /// Build with a freshly drawn salt.
    pub fn fresh(timestamp: u64) -> Self {
        Self {
            salt: random_bytes32(),
            timestamp,
        }
    }
}

/// Cancel-by-event message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelEventDetails {
    #[serde(rename = "sportXEventId")]
    pub sportx_event_id: String,
    #[serde(serialize_with = "wire::display")]
    pub salt: B256,
    #[serde(serialize_with = "wire::display")]
    pub timestamp: u64,
}

impl CancelEventDetails {
    /// Build with a freshly drawn salt.
    pub fn fresh(sportx_event_id: impl Into<String>, timestamp: u64) -> Self {
        Self {
            sportx_event_id: sportx_event_id.into(),
            salt: random_bytes32(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrdersRequestV1 {
    pub message: String,
    pub orders: Vec<String>,
    pub cancel_signature: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrdersRequest {
    pub order_hashes: Vec<String>,
    pub salt: String,
    pub timestamp: u64,
    pub signature: String,
    pub maker: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAllOrdersRequest {
    pub salt: String,
    pub timestamp: u64,
    pub signature: String,
    pub maker: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelEventOrdersRequest {
    #[serde(rename = "sportXEventId")]
    pub sportx_event_id: String,
    pub salt: String,
    pub timestamp: u64,
    pub signature: String,
    pub maker: String,
}

/// Any signed cancellation, ready for the relayer.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CancelRequest {
    OrdersV1(CancelOrdersRequestV1),
    Orders(CancelOrdersRequest),
    All(CancelAllOrdersRequest),
    Event(CancelEventOrdersRequest),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_all_salts_differ_for_same_timestamp() {
        let first = CancelAllDetails::fresh(1_700_000_000);
        let second = CancelAllDetails::fresh(1_700_000_000);
        assert_eq!(first.timestamp, second.timestamp);
        assert_ne!(first.salt, second.salt);
    }

    #[test]
    fn test_cancel_event_salts_differ_for_same_timestamp() {
        let first = CancelEventDetails::fresh("L7187811", 1_700_000_000);
        let second = CancelEventDetails::fresh("L7187811", 1_700_000_000);
        assert_ne!(first.salt, second.salt);
    }

    #[test]
    fn test_cancel_messages_render_strings() {
        let details = CancelOrdersDetails {
            order_hashes: vec!["0x01".to_string()],
            salt: B256::with_last_byte(7),
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["timestamp"], "1700000000");
        assert_eq!(
            json["salt"],
            "0x0000000000000000000000000000000000000000000000000000000000000007"
        );
        assert_eq!(json["orderHashes"][0], "0x01");
    }

    #[test]
    fn test_event_request_field_name() {
        let request = CancelEventOrdersRequest {
            sportx_event_id: "L7187811".to_string(),
            salt: "0x00".to_string(),
            timestamp: 1,
            signature: "0x".to_string(),
            maker: "0x0".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["sportXEventId"], "L7187811");
    }
}
