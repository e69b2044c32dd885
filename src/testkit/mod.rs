//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`log`] - `OrderFilled` log builders.
//! - [`port`] - In-memory [`ReceiptLookup`](crate::port::ReceiptLookup) and
//!   [`MarketRegistry`](crate::port::MarketRegistry) implementations.
//! - [`market`] - Registry payloads with known derived ids.

pub mod log;
pub mod market;
pub mod port;
