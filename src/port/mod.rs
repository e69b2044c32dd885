//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────┐                                   ┌──────────────┐
//! │ RPC receipts │                                   │ Gamma market │
//! │   adapter    │                                   │   registry   │
//! └──────────────┘                                   └──────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ReceiptLookup`] - Transaction receipt logs
//! - [`MarketRegistry`] - Market metadata by slug or condition id

pub mod outbound;

pub use outbound::receipt::ReceiptLookup;
pub use outbound::registry::{MarketRegistry, RegistryMarket};
