//! Shopping cart module.
//!
//! This crate contains the cart ledger, implemented purely as deterministic
//! in-memory state (no IO, no persistence, no errors).

pub mod ledger;

pub use ledger::{CartLedger, CartView, LineItem};
