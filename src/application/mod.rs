//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate ports
//! to implement the decoding and reconciliation use cases.

pub mod decoder;
pub mod orchestrator;
pub mod reconciler;

pub use decoder::{decode_log, decode_trades, DecodeSkip};
pub use orchestrator::{classify_tokens, fetch_trades, Stage1Pipeline, Stage1Report};
pub use reconciler::{reconcile_record, MarketReconciler};
