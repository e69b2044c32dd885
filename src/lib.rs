//! ctfscan - Polymarket CTF trade and market decoder.
//!
//! Decodes `OrderFilled` logs of the CTF exchange into trades, derives
//! Conditional Tokens identifiers (condition, collection and position ids)
//! offline, and reconciles registry market records with the derived ids.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Pure types and identifier derivation, no I/O
//! - **`application`** - Trade decoding, market reconciliation and the
//!   stage-one pipeline
//! - **`port`** - Traits for the receipt source and the market registry
//! - **`adapter`** - JSON-RPC and Gamma implementations plus the CLI
//! - **`infrastructure`** - Configuration and logging
//!
//! # Example
//!
//! ```
//! use ctfscan::domain::ctf::{derive_binary_positions, BinaryMarketParams, ChainConstants};
//!
//! let params = BinaryMarketParams {
//!     oracle: Some("0x157Ce2d672854c848c9b79C49a8Cc6cc89176a49"),
//!     question_id: Some("0xabababababababababababababababababababababababababababababababab"),
//!     ..BinaryMarketParams::default()
//! };
//! let ids = derive_binary_positions(&params, &ChainConstants::polygon()).unwrap();
//! assert_ne!(ids.yes_token_id, ids.no_token_id);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
