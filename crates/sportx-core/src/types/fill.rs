//! Fill intents and the signed fill request handed to the relayer.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::approval::ApproveSpenderPayload;
use super::order::SignedOrder;
use crate::salt::random_salt;

/// Human-readable description shown to the taker when signing a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillDetailsMetadata {
    pub action: String,
    pub market: String,
    pub betting: String,
    pub stake: String,
    pub odds: String,
    pub returning: String,
}

impl Default for FillDetailsMetadata {
    fn default() -> Self {
        let na = || "N/A".to_string();
        Self {
            action: na(),
            market: na(),
            betting: na(),
            stake: na(),
            odds: na(),
            returning: na(),
        }
    }
}

/// A taker's intent to fill one or more signed maker orders.
#[derive(Debug, Clone)]
pub struct FillIntent {
    pub orders: Vec<SignedOrder>,
    /// Parallel to `orders`, base-unit integer strings.
    pub taker_amounts: Vec<String>,
    /// Drawn once in [`FillIntent::new`]; never reused across fills.
    fill_salt: U256,
    pub metadata: FillDetailsMetadata,
    pub affiliate_address: Option<String>,
    pub approve_proxy_payload: Option<ApproveSpenderPayload>,
    /// Receiver of the filled position; zero address when unset.
    pub beneficiary: Option<String>,
    /// Trailing fee field of the legacy fill hash.
    pub submitter_fee: Option<String>,
}

impl FillIntent {
    /// Create a fill intent with a fresh random fill salt.
    pub fn new(orders: Vec<SignedOrder>, taker_amounts: Vec<String>) -> Self {
        Self {
            orders,
            taker_amounts,
            fill_salt: random_salt(),
            metadata: FillDetailsMetadata::default(),
            affiliate_address: None,
            approve_proxy_payload: None,
            beneficiary: None,
            submitter_fee: None,
        }
    }

    pub fn fill_salt(&self) -> U256 {
        self.fill_salt
    }

    pub fn with_metadata(mut self, metadata: FillDetailsMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_affiliate(mut self, affiliate: impl Into<String>) -> Self {
        self.affiliate_address = Some(affiliate.into());
        self
    }

    pub fn with_approval(mut self, payload: ApproveSpenderPayload) -> Self {
        self.approve_proxy_payload = Some(payload);
        self
    }

    pub fn with_beneficiary(mut self, beneficiary: impl Into<String>) -> Self {
        self.beneficiary = Some(beneficiary.into());
        self
    }

    pub fn with_submitter_fee(mut self, fee: impl Into<String>) -> Self {
        self.submitter_fee = Some(fee.into());
        self
    }
}

/// Signed fill request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillOrdersRequest {
    pub order_hashes: Vec<String>,
    pub taker_amounts: Vec<String>,
    pub taker: String,
    pub taker_sig: String,
    pub fill_salt: String,
    #[serde(flatten)]
    pub metadata: FillDetailsMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approve_proxy_payload: Option<ApproveSpenderPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
}
