//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the two external lookups the pipelines depend
//! on: transaction receipts and market metadata.

pub mod receipt;
pub mod registry;
