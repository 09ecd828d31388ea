//! SportX Core Library
//!
//! Order, fill, cancel and approval signing for the SportX betting exchange:
//! wire types, schema validation, contract hashing, EIP-712 payloads and the
//! signing service that ties them together.

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod hashing;
pub mod odds;
pub mod salt;
pub mod signing;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
