//! Command implementations.
//!
//! Commands take the engine and an output sink explicitly so they can be
//! exercised against an in-memory store and a byte buffer.

pub mod cart;
pub mod checkout;
