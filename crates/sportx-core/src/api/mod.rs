//! Chain access and contract calldata.

pub mod approvals;
pub mod chain;

pub use approvals::{encode_approve, MAX_APPROVAL};
pub use chain::{ChainReader, RpcChainReader};

#[cfg(test)]
pub use chain::MockChainReader;
