//! Conditional-token identifier derivation.
//!
//! Three hashes chained together map a market definition to its tradeable
//! token ids:
//!
//! ```text
//! condition  = keccak256(oracle: address ‖ question: bytes32 ‖ slots: uint256)
//! collection = keccak256(parent: bytes32 ‖ condition: bytes32 ‖ index_set: uint256)
//! position   = keccak256(collateral: address ‖ collection: bytes32)
//! ```
//!
//! Fields are tightly packed at their natural widths with no padding
//! between them. Everything here is pure.

use alloy_primitives::{address, keccak256, Address, B256, U256};
use serde::Serialize;

use super::error::DomainError;
use super::hex;
use super::id::{CollectionId, ConditionId, IndexSet, PositionId, ROOT_COLLECTION_ID};

/// Bridged USDC (USDC.e) on Polygon PoS, the default collateral token.
pub const POLYGON_USDC_E: Address = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");

/// Outcome slot count of a binary market.
pub const BINARY_OUTCOME_SLOTS: u32 = 2;

/// Byte builder mirroring the contract-side tight packing rules.
#[derive(Debug, Default)]
pub struct PackedEncoder {
    buf: Vec<u8>,
}

impl PackedEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an address as its 20 raw bytes.
    #[must_use]
    pub fn address(mut self, value: Address) -> Self {
        self.buf.extend_from_slice(value.as_slice());
        self
    }

    /// Append a bytes32 value.
    #[must_use]
    pub fn bytes32(mut self, value: B256) -> Self {
        self.buf.extend_from_slice(value.as_slice());
        self
    }

    /// Append a uint256 as 32 big-endian bytes.
    #[must_use]
    pub fn uint256(mut self, value: U256) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes::<32>());
        self
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Hash the packed bytes with keccak256.
    #[must_use]
    pub fn keccak(&self) -> B256 {
        keccak256(&self.buf)
    }
}

/// Compute the condition id for an oracle, question and outcome count.
///
/// # Errors
///
/// Returns [`DomainError::NonPositiveOutcomeSlotCount`] when
/// `outcome_slot_count` is zero.
pub fn compute_condition_id(
    oracle: Address,
    question_id: B256,
    outcome_slot_count: u32,
) -> Result<ConditionId, DomainError> {
    if outcome_slot_count == 0 {
        return Err(DomainError::NonPositiveOutcomeSlotCount {
            count: outcome_slot_count,
        });
    }
    let hash = PackedEncoder::new()
        .address(oracle)
        .bytes32(question_id)
        .uint256(U256::from(outcome_slot_count))
        .keccak();
    Ok(ConditionId::new(hash))
}

/// Hex-string front end of [`compute_condition_id`].
///
/// # Errors
///
/// Returns an error when either hex input is malformed or the slot count is
/// zero.
pub fn condition_id_from_hex(
    oracle: &str,
    question_id: &str,
    outcome_slot_count: u32,
) -> Result<ConditionId, DomainError> {
    let oracle = hex::parse_address("oracle", oracle)?;
    let question_id = hex::parse_b256("question_id", question_id)?;
    compute_condition_id(oracle, question_id, outcome_slot_count)
}

/// Compute the collection id for an index set under a condition.
#[must_use]
pub fn compute_collection_id(
    parent: CollectionId,
    condition_id: ConditionId,
    index_set: IndexSet,
) -> CollectionId {
    let hash = PackedEncoder::new()
        .bytes32(*parent.as_b256())
        .bytes32(*condition_id.as_b256())
        .uint256(U256::from(index_set.bits()))
        .keccak();
    CollectionId::new(hash)
}

/// Compute the position (ERC-1155 token) id of a collection.
#[must_use]
pub fn compute_position_id(collateral_token: Address, collection_id: CollectionId) -> PositionId {
    let hash = PackedEncoder::new()
        .address(collateral_token)
        .bytes32(*collection_id.as_b256())
        .keccak();
    PositionId::from(hash)
}

/// Deployment-specific values used when a market record leaves them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConstants {
    /// Collateral token used when none is supplied.
    pub collateral_token: Address,
    /// Oracle used when none is supplied. Only set by explicit override.
    pub oracle_fallback: Option<Address>,
}

impl ChainConstants {
    /// Polygon mainnet: USDC.e collateral, no oracle fallback.
    #[must_use]
    pub const fn polygon() -> Self {
        Self {
            collateral_token: POLYGON_USDC_E,
            oracle_fallback: None,
        }
    }
}

impl Default for ChainConstants {
    fn default() -> Self {
        Self::polygon()
    }
}

/// Optional hex inputs for a binary market derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryMarketParams<'a> {
    pub oracle: Option<&'a str>,
    pub question_id: Option<&'a str>,
    /// When set, used verbatim instead of hashing oracle and question.
    pub condition_id: Option<&'a str>,
    pub collateral_token: Option<&'a str>,
}

/// Derived ids of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryPositions {
    pub condition_id: ConditionId,
    #[serde(serialize_with = "super::trade::checksummed")]
    pub collateral_token: Address,
    pub yes_token_id: PositionId,
    pub no_token_id: PositionId,
}

/// Derive the condition id and YES/NO token ids of a binary market.
///
/// A supplied `condition_id` wins: oracle and question id are then not read
/// at all. Missing collateral falls back to `constants.collateral_token`, a
/// missing oracle to `constants.oracle_fallback`. YES is always index set 1
/// and NO index set 2, both under the root collection.
///
/// # Errors
///
/// Returns [`DomainError::MissingField`] when the condition id must be
/// computed but the oracle or question id is absent, and an invalid-input
/// error for malformed hex.
pub fn derive_binary_positions(
    params: &BinaryMarketParams<'_>,
    constants: &ChainConstants,
) -> Result<BinaryPositions, DomainError> {
    let condition_id = match params.condition_id {
        Some(raw) => ConditionId::parse(raw)?,
        None => {
            let oracle = match params.oracle {
                Some(raw) => hex::parse_address("oracle", raw)?,
                None => constants
                    .oracle_fallback
                    .ok_or(DomainError::MissingField { field: "oracle" })?,
            };
            let question_id = params
                .question_id
                .ok_or(DomainError::MissingField { field: "question_id" })?;
            let question_id = hex::parse_b256("question_id", question_id)?;
            compute_condition_id(oracle, question_id, BINARY_OUTCOME_SLOTS)?
        }
    };

    let collateral_token = match params.collateral_token {
        Some(raw) => hex::parse_address("collateral_token", raw)?,
        None => constants.collateral_token,
    };

    let yes = compute_collection_id(ROOT_COLLECTION_ID, condition_id, IndexSet::YES);
    let no = compute_collection_id(ROOT_COLLECTION_ID, condition_id, IndexSet::NO);

    Ok(BinaryPositions {
        condition_id,
        collateral_token,
        yes_token_id: compute_position_id(collateral_token, yes),
        no_token_id: compute_position_id(collateral_token, no),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    const ORACLE: &str = "0x157Ce2d672854c848c9b79C49a8Cc6cc89176a49";
    const EXPECTED_CONDITION: &str =
        "0x48fd33ed77f275cc39c2c0898d87dcf9b300e32e03f3e2aefa9950edcb7210c8";

    fn question() -> String {
        format!("0x{}", "ab".repeat(32))
    }

    #[test]
    fn packed_encoder_uses_natural_widths() {
        let packed = PackedEncoder::new()
            .address(Address::ZERO)
            .bytes32(B256::ZERO)
            .uint256(U256::from(2u64));
        assert_eq!(packed.as_bytes().len(), 20 + 32 + 32);
        assert_eq!(packed.as_bytes()[83], 2);
    }

    #[test]
    fn empty_packing_hashes_to_keccak_of_nothing() {
        assert_eq!(
            PackedEncoder::new().keccak(),
            b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn condition_id_matches_known_vector() {
        let id = condition_id_from_hex(ORACLE, &question(), 2).unwrap();
        assert_eq!(id.to_string(), EXPECTED_CONDITION);
    }

    #[test]
    fn condition_id_ignores_prefix_and_case() {
        let a = condition_id_from_hex(ORACLE, &question(), 2).unwrap();
        let b = condition_id_from_hex(
            &ORACLE[2..].to_ascii_lowercase(),
            &"AB".repeat(32),
            2,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn slot_count_changes_condition_id() {
        let two = condition_id_from_hex(ORACLE, &question(), 2).unwrap();
        let three = condition_id_from_hex(ORACLE, &question(), 3).unwrap();
        assert_ne!(two, three);
        assert_eq!(
            three.to_string(),
            "0xd8d321adfec78fa3d705a3367beeec75ccbc3e5894131f28246e32dde1148131"
        );
    }

    #[test]
    fn zero_slots_is_rejected() {
        assert_eq!(
            condition_id_from_hex(ORACLE, &question(), 0),
            Err(DomainError::NonPositiveOutcomeSlotCount { count: 0 })
        );
    }

    #[test]
    fn collection_ids_match_known_vectors() {
        let condition = ConditionId::parse(EXPECTED_CONDITION).unwrap();
        let yes = compute_collection_id(ROOT_COLLECTION_ID, condition, IndexSet::YES);
        let no = compute_collection_id(ROOT_COLLECTION_ID, condition, IndexSet::NO);
        assert_eq!(
            yes.to_string(),
            "0x34db146e2f00de562b7f280a865499ae5693049ca2d576eae6f303b6d53f1363"
        );
        assert_eq!(
            no.to_string(),
            "0xcf0d47ec4962334a999b94ea184e4c36929176486d010711f1db0dd09640bf37"
        );
    }

    #[test]
    fn binary_positions_match_known_vectors() {
        let question = question();
        let params = BinaryMarketParams {
            oracle: Some(ORACLE),
            question_id: Some(&question),
            ..Default::default()
        };
        let derived = derive_binary_positions(&params, &ChainConstants::polygon()).unwrap();

        assert_eq!(derived.condition_id.to_string(), EXPECTED_CONDITION);
        assert_eq!(derived.collateral_token, POLYGON_USDC_E);
        assert_eq!(
            derived.yes_token_id.to_string(),
            "0x25ba7569709e2653f9bb1224ccfd6ca0cb31f7111fde65d2531ecedd6bc7be83"
        );
        assert_eq!(
            derived.no_token_id.to_decimal(),
            "100748519999740729478460795997598453665553088329024919221632445846798771003616"
        );
    }

    #[test]
    fn supplied_condition_id_skips_oracle_and_question() {
        let params = BinaryMarketParams {
            oracle: Some("not hex at all"),
            question_id: None,
            condition_id: Some(&EXPECTED_CONDITION[2..]),
            collateral_token: None,
        };
        let derived = derive_binary_positions(&params, &ChainConstants::polygon()).unwrap();
        assert_eq!(derived.condition_id.to_string(), EXPECTED_CONDITION);
        assert_eq!(
            derived.yes_token_id.to_decimal(),
            "17065019298606646089556894061031952672183445282569409260276221116549190631043"
        );
    }

    #[test]
    fn missing_oracle_without_condition_is_reported() {
        let question = question();
        let params = BinaryMarketParams {
            question_id: Some(&question),
            ..Default::default()
        };
        assert_eq!(
            derive_binary_positions(&params, &ChainConstants::polygon()),
            Err(DomainError::MissingField { field: "oracle" })
        );
    }

    #[test]
    fn oracle_fallback_is_used_only_when_configured() {
        let question = question();
        let params = BinaryMarketParams {
            question_id: Some(&question),
            ..Default::default()
        };
        let constants = ChainConstants {
            oracle_fallback: Some(hex::parse_address("oracle", ORACLE).unwrap()),
            ..ChainConstants::polygon()
        };
        let derived = derive_binary_positions(&params, &constants).unwrap();
        assert_eq!(derived.condition_id.to_string(), EXPECTED_CONDITION);
    }

    #[test]
    fn collateral_override_changes_positions_not_condition() {
        let other = "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359";
        let base = BinaryMarketParams {
            condition_id: Some(EXPECTED_CONDITION),
            ..Default::default()
        };
        let overridden = BinaryMarketParams {
            collateral_token: Some(other),
            ..base
        };
        let constants = ChainConstants::polygon();
        let a = derive_binary_positions(&base, &constants).unwrap();
        let b = derive_binary_positions(&overridden, &constants).unwrap();
        assert_eq!(a.condition_id, b.condition_id);
        assert_ne!(a.yes_token_id, b.yes_token_id);
        assert_ne!(a.no_token_id, b.no_token_id);
    }

    #[test]
    fn malformed_collateral_is_invalid_input() {
        let params = BinaryMarketParams {
            condition_id: Some(EXPECTED_CONDITION),
            collateral_token: Some("0x1234"),
            ..Default::default()
        };
        let err = derive_binary_positions(&params, &ChainConstants::polygon()).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
