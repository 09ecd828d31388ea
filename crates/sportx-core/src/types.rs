//! Wire and canonical data types for orders, fills, cancels and approvals.

pub mod approval;
pub mod cancel;
pub mod fill;
pub mod order;
pub(crate) mod wire;

pub use approval::*;
pub use cancel::*;
pub use fill::*;
pub use order::*;
