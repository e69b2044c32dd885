//! Domain validation errors for identifiers and market parameters.
//!
//! These errors are returned by hex parsers and by the identifier
//! derivation engine when an input violates a width or range rule.
//!
//! # Examples
//!
//! ```
//! use ctfscan::domain::error::DomainError;
//! use ctfscan::domain::hex::parse_address;
//!
//! let result = parse_address("oracle", "0x1234");
//! assert!(matches!(
//!     result,
//!     Err(DomainError::InvalidLength { field: "oracle", expected: 20, actual: 2 })
//! ));
//! ```

use thiserror::Error;

/// Errors that occur when domain inputs are malformed or incomplete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The input is not valid hexadecimal.
    #[error("invalid input for {field}: {reason}")]
    InvalidHex {
        /// Name of the offending field.
        field: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The decoded input has the wrong byte width.
    #[error("invalid input for {field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,
        /// Required width in bytes.
        expected: usize,
        /// Width found after normalization.
        actual: usize,
    },

    /// Conditions need at least one outcome slot.
    #[error("invalid input for outcome_slot_count: must be positive, got {count}")]
    NonPositiveOutcomeSlotCount {
        /// The rejected count.
        count: u32,
    },

    /// A structurally required field was not supplied.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
}

impl DomainError {
    /// True for malformed values, false for absent ones.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::MissingField { .. })
    }
}
