//! Token approval payloads: meta-transactions and DAI-style permits.

use alloy_primitives::{Address, U256};

use super::{Eip712Message, TypedData};
use crate::signing::domain::{meta_transaction_domain, permit_domain};
use crate::types::{MetaTransactionDetails, PermitDetails};

pub mod meta {
    alloy_sol_types::sol! {
        struct MetaTransaction {
            uint256 nonce;
            address from;
            bytes functionSignature;
        }
    }
}

pub mod permit {
    alloy_sol_types::sol! {
        struct Permit {
            address holder;
            address spender;
            uint256 nonce;
            uint256 expiry;
            bool allowed;
        }
    }
}

impl Eip712Message for MetaTransactionDetails {
    type SolType = meta::MetaTransaction;

    fn to_sol(&self) -> Self::SolType {
        meta::MetaTransaction {
            nonce: self.nonce,
            from: self.from,
            functionSignature: self.function_signature.clone(),
        }
    }
}

impl Eip712Message for PermitDetails {
    type SolType = permit::Permit;

    fn to_sol(&self) -> Self::SolType {
        permit::Permit {
            holder: self.holder,
            spender: self.spender,
            nonce: self.nonce,
            expiry: U256::from(self.expiry),
            allowed: self.allowed,
        }
    }
}

/// Meta-transaction executed by the token contract on behalf of `details.from`.
pub fn meta_transaction_payload(
    details: MetaTransactionDetails,
    token_name: String,
    token: Address,
    chain_id: u64,
) -> TypedData<MetaTransactionDetails> {
    TypedData::new(meta_transaction_domain(token_name, token, chain_id), details)
}

pub fn permit_payload(
    details: PermitDetails,
    token_name: String,
    token_version: String,
    chain_id: u64,
    token: Address,
) -> TypedData<PermitDetails> {
    TypedData::new(permit_domain(token_name, token_version, chain_id, token), details)
}
