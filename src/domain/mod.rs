//! Exchange-agnostic domain logic.
//!
//! Pure types and functions: hex normalization, identifier newtypes, the
//! conditional-token derivation chain and the fill event schema. Nothing in
//! this module performs I/O.

pub mod ctf;
pub mod error;
pub mod event;
pub mod hex;
pub mod id;
pub mod market;
pub mod trade;

pub use ctf::{
    compute_collection_id, compute_condition_id, compute_position_id, derive_binary_positions,
    BinaryMarketParams, BinaryPositions, ChainConstants, POLYGON_USDC_E,
};
pub use error::DomainError;
pub use id::{CollectionId, ConditionId, IndexSet, PositionId, ROOT_COLLECTION_ID};
pub use market::{BinaryOutcome, IdentifierMismatch, MarketRecord, TokenMatch};
pub use trade::{RawLog, Side, TradeRecord};
