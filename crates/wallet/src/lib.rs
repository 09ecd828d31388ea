//! SportX Wallets
//!
//! Signature providers for the SportX signing service: a trading wallet
//! loaded from the environment and a signer that delegates to an external
//! wallet over JSON-RPC.

pub mod delegated;
pub mod wallet;

pub use delegated::{DelegatedWalletSigner, TypedDataMethod};
pub use wallet::TradingWallet;
