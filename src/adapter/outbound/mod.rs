//! Outbound adapters (driven side).

pub mod gamma;
pub mod rpc;
