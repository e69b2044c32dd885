//! Reconciled market records.

use std::fmt;

use serde::Serialize;

use super::ctf::BINARY_OUTCOME_SLOTS;
use super::id::{ConditionId, PositionId};

/// Outcome of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOutcome {
    Yes,
    No,
}

impl fmt::Display for BinaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
        }
    }
}

/// Derived token id disagreeing with the id the registry reports.
///
/// Reported alongside the record; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierMismatch {
    pub outcome: BinaryOutcome,
    pub derived: PositionId,
    /// Registry value as it appeared in the payload.
    pub reported: String,
}

/// A market definition with locally derived token ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub condition_id: ConditionId,
    pub oracle: Option<String>,
    pub question_id: Option<String>,
    pub outcome_slot_count: u32,
    pub collateral_token: String,
    pub yes_token_id: PositionId,
    pub no_token_id: PositionId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mismatches: Vec<IdentifierMismatch>,
    /// Registry payload the record was built from.
    pub gamma: serde_json::Value,
}

impl MarketRecord {
    /// Outcome slots covered by every record; markets are binary.
    pub const OUTCOME_SLOT_COUNT: u32 = BINARY_OUTCOME_SLOTS;

    /// Which outcome, if any, a traded token belongs to.
    #[must_use]
    pub fn outcome_of(&self, token_id: &PositionId) -> Option<BinaryOutcome> {
        if *token_id == self.yes_token_id {
            Some(BinaryOutcome::Yes)
        } else if *token_id == self.no_token_id {
            Some(BinaryOutcome::No)
        } else {
            None
        }
    }

    /// True when the registry agreed with every derived token id it reported.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Classification of a traded token against a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMatch {
    Yes,
    No,
    /// Belongs to another market settled in the same transaction.
    Other,
}

impl From<Option<BinaryOutcome>> for TokenMatch {
    fn from(outcome: Option<BinaryOutcome>) -> Self {
        match outcome {
            Some(BinaryOutcome::Yes) => Self::Yes,
            Some(BinaryOutcome::No) => Self::No,
            None => Self::Other,
        }
    }
}
