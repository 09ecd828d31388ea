//! ERC-20 approval calldata carried inside meta-transactions.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    function approve(address spender, uint256 amount) external returns (bool);
}

/// Unlimited allowance.
pub const MAX_APPROVAL: U256 = U256::MAX;

/// Calldata for `approve(spender, amount)`.
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    Bytes::from(approveCall { spender, amount }.abi_encode())
}
