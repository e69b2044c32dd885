//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - The `ctfscan` command line
//! - [`outbound`] - JSON-RPC receipts and the Gamma market registry

pub mod inbound;
pub mod outbound;
