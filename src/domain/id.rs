//! Conditional-token identifier types with proper encapsulation.
//!
//! Condition and collection ids are 32-byte hashes; position ids are the
//! same hash read as a big-endian uint256, because that is how the ERC-1155
//! token id is addressed on chain and in the registry.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;
use super::hex;

/// The parent of every top-level collection: 32 zero bytes.
pub const ROOT_COLLECTION_ID: CollectionId = CollectionId(B256::ZERO);

macro_rules! word_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(B256);

        impl $name {
            /// Wrap a raw 32-byte word.
            #[must_use]
            pub const fn new(word: B256) -> Self {
                Self(word)
            }

            /// Parse from hex, with or without `0x`.
            ///
            /// # Errors
            ///
            /// Returns an error when the input is not 32 bytes of hex.
            pub fn parse(value: &str) -> Result<Self, DomainError> {
                hex::parse_b256($field, value).map(Self)
            }

            /// Get the underlying word.
            #[must_use]
            pub const fn as_b256(&self) -> &B256 {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<B256> for $name {
            fn from(word: B256) -> Self {
                Self(word)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

word_id!(
    /// Identifier of a (oracle, question, outcome count) condition.
    ConditionId,
    "condition_id"
);

word_id!(
    /// Identifier of an outcome collection under a condition.
    CollectionId,
    "collection_id"
);

/// ERC-1155 position (token) identifier.
///
/// Displays as 64-digit canonical hex; [`PositionId::to_decimal`] gives the
/// decimal spelling used by CLOB registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionId(U256);

impl PositionId {
    /// Wrap a raw token id.
    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Parse a token id written in decimal or `0x` hex.
    ///
    /// # Errors
    ///
    /// Returns an error when neither spelling parses.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        hex::parse_u256("token_id", value).map(Self)
    }

    /// Get the token id as an integer.
    #[must_use]
    pub const fn as_u256(&self) -> &U256 {
        &self.0
    }

    /// Decimal rendering of the token id.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0.to_be_bytes::<32>()))
    }
}

impl FromStr for PositionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<U256> for PositionId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<B256> for PositionId {
    fn from(word: B256) -> Self {
        Self(U256::from_be_bytes(word.0))
    }
}

impl Serialize for PositionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PositionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Bitmask over outcome slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSet(u64);

impl IndexSet {
    /// Outcome slot 0 of a binary market.
    pub const YES: Self = Self(1);
    /// Outcome slot 1 of a binary market.
    pub const NO: Self = Self(2);

    /// Index set covering exactly one outcome slot; `None` past the
    /// 64-slot limit of the bitmask.
    #[must_use]
    pub const fn for_slot(slot: u32) -> Option<Self> {
        match 1u64.checked_shl(slot) {
            Some(bits) => Some(Self(bits)),
            None => None,
        }
    }

    /// Raw bitmask value.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }
}
