//! Market reconciler.
//!
//! Builds a [`MarketRecord`] from one registry payload: extracts whichever
//! inputs the registry provided, derives the binary position ids locally,
//! and cross-checks them against the token ids the registry reports. The
//! derived ids are authoritative; disagreements are reported, not fatal.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ctf::{derive_binary_positions, BinaryMarketParams, ChainConstants};
use crate::domain::error::DomainError;
use crate::domain::hex;
use crate::domain::id::PositionId;
use crate::domain::market::{BinaryOutcome, IdentifierMismatch, MarketRecord};
use crate::error::{Error, Result};
use crate::port::{MarketRegistry, RegistryMarket};

/// Looks markets up in a registry and reconciles them with derivation.
pub struct MarketReconciler<R> {
    registry: R,
    constants: ChainConstants,
}

impl<R: MarketRegistry> MarketReconciler<R> {
    #[must_use]
    pub const fn new(registry: R, constants: ChainConstants) -> Self {
        Self {
            registry,
            constants,
        }
    }

    /// Reconcile the market a slug points to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MarketNotFound`] when the registry has no match,
    /// [`Error::RegistryUnavailable`] on lookup failure, and a domain error
    /// when the record cannot be derived from.
    pub async fn reconcile_by_slug(&self, slug: &str) -> Result<MarketRecord> {
        info!(slug, registry = self.registry.registry_name(), "Looking up market");
        let raw = self
            .registry
            .market_by_slug(slug)
            .await?
            .ok_or_else(|| Error::MarketNotFound {
                key: slug.to_string(),
            })?;
        self.reconcile(raw)
    }

    /// Reconcile the market with a given condition id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::reconcile_by_slug`].
    pub async fn reconcile_by_condition_id(&self, condition_id: &str) -> Result<MarketRecord> {
        let condition_id = hex::normalize(condition_id);
        info!(
            condition_id = %condition_id,
            registry = self.registry.registry_name(),
            "Looking up market"
        );
        let raw = self
            .registry
            .market_by_condition_id(&condition_id)
            .await?
            .ok_or(Error::MarketNotFound { key: condition_id })?;
        self.reconcile(raw)
    }

    /// Reconcile an already-fetched registry payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] when known fields have the wrong type,
    /// [`DomainError::MissingField`] when neither a condition id nor an
    /// oracle is available, and an invalid-input error for malformed hex.
    pub fn reconcile(&self, raw: Value) -> Result<MarketRecord> {
        reconcile_record(raw, &self.constants)
    }
}

/// Pure reconciliation of one registry payload.
///
/// # Errors
///
/// See [`MarketReconciler::reconcile`].
pub fn reconcile_record(raw: Value, constants: &ChainConstants) -> Result<MarketRecord> {
    let fields = RegistryMarket::from_value(&raw)?.without_blanks();

    // The oracle only feeds derivation when the condition id is missing.
    let oracle = match fields.oracle() {
        Some(raw) if fields.condition_id.is_some() => match hex::parse_address("oracle", raw) {
            Ok(address) => Some(address),
            Err(err) => {
                warn!(oracle = raw, error = %err, "Ignoring unparsable registry oracle");
                None
            }
        },
        Some(raw) => Some(hex::parse_address("oracle", raw)?),
        None => constants.oracle_fallback,
    };
    if fields.condition_id.is_none() && oracle.is_none() {
        return Err(DomainError::MissingField { field: "oracle" }.into());
    }

    let oracle_hex = oracle.map(|address| address.to_checksum(None));
    let params = BinaryMarketParams {
        oracle: oracle_hex.as_deref(),
        question_id: fields.question_id.as_deref(),
        condition_id: fields.condition_id.as_deref(),
        collateral_token: fields.collateral_token.as_deref(),
    };
    let derived = derive_binary_positions(&params, constants)?;

    let mismatches = cross_check(
        &fields.clob_token_ids,
        derived.yes_token_id,
        derived.no_token_id,
    );
    if mismatches.is_empty() && fields.clob_token_ids.len() == 2 {
        debug!(condition_id = %derived.condition_id, "Registry token ids match derivation");
    }

    Ok(MarketRecord {
        condition_id: derived.condition_id,
        oracle: oracle_hex,
        question_id: fields.question_id.as_deref().map(hex::normalize),
        outcome_slot_count: MarketRecord::OUTCOME_SLOT_COUNT,
        collateral_token: derived.collateral_token.to_checksum(None),
        yes_token_id: derived.yes_token_id,
        no_token_id: derived.no_token_id,
        mismatches,
        gamma: raw,
    })
}

/// Compare registry token ids `[yes, no]` with derived ones.
///
/// Only a pair is checked; any other count carries no outcome mapping.
fn cross_check(reported: &[String], yes: PositionId, no: PositionId) -> Vec<IdentifierMismatch> {
    let [reported_yes, reported_no] = reported else {
        if !reported.is_empty() {
            debug!(count = reported.len(), "Registry token id count is not 2, skipping check");
        }
        return Vec::new();
    };

    [
        (BinaryOutcome::Yes, yes, reported_yes),
        (BinaryOutcome::No, no, reported_no),
    ]
    .into_iter()
    .filter(|(_, derived, reported)| PositionId::parse(reported).ok() != Some(*derived))
    .map(|(outcome, derived, reported)| {
        warn!(
            outcome = %outcome,
            derived = %derived,
            reported = %reported,
            "Registry token id disagrees with derivation"
        );
        IdentifierMismatch {
            outcome,
            derived,
            reported: reported.clone(),
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::market::{
        gamma_market, question_id, CONDITION_ID, NO_TOKEN_DECIMAL, NO_TOKEN_HEX, ORACLE,
        YES_TOKEN_DECIMAL, YES_TOKEN_HEX,
    };
    use crate::testkit::port::StaticRegistry;
    use serde_json::json;

    fn constants() -> ChainConstants {
        ChainConstants::polygon()
    }

    #[test]
    fn matching_registry_ids_report_no_mismatch() {
        let record = reconcile_record(gamma_market(), &constants()).unwrap();
        assert_eq!(record.condition_id.to_string(), CONDITION_ID);
        assert_eq!(record.yes_token_id.to_string(), YES_TOKEN_HEX);
        assert_eq!(record.no_token_id.to_string(), NO_TOKEN_HEX);
        assert!(record.is_consistent());
        assert_eq!(record.oracle.as_deref(), Some(ORACLE));
        assert_eq!(record.outcome_slot_count, 2);
        assert_eq!(record.gamma, gamma_market());
    }

    #[test]
    fn swapped_registry_ids_report_both_mismatches() {
        let mut raw = gamma_market();
        raw["clobTokenIds"] = json!([NO_TOKEN_DECIMAL, YES_TOKEN_DECIMAL]);

        let record = reconcile_record(raw, &constants()).unwrap();
        assert_eq!(record.yes_token_id.to_string(), YES_TOKEN_HEX);
        let outcomes: Vec<_> = record.mismatches.iter().map(|m| m.outcome).collect();
        assert_eq!(outcomes, vec![BinaryOutcome::Yes, BinaryOutcome::No]);
        assert_eq!(record.mismatches[0].reported, NO_TOKEN_DECIMAL);
    }

    #[test]
    fn hex_registry_ids_are_compared_numerically() {
        let mut raw = gamma_market();
        raw["clobTokenIds"] = json!([YES_TOKEN_HEX, NO_TOKEN_HEX.to_uppercase().replace("0X", "0x")]);
        let record = reconcile_record(raw, &constants()).unwrap();
        assert!(record.is_consistent());
    }

    #[test]
    fn unparsable_registry_id_is_a_mismatch() {
        let mut raw = gamma_market();
        raw["clobTokenIds"] = json!([YES_TOKEN_DECIMAL, "n/a"]);
        let record = reconcile_record(raw, &constants()).unwrap();
        assert_eq!(record.mismatches.len(), 1);
        assert_eq!(record.mismatches[0].outcome, BinaryOutcome::No);
    }

    #[test]
    fn single_registry_id_is_not_checked() {
        let mut raw = gamma_market();
        raw["clobTokenIds"] = json!(["1"]);
        let record = reconcile_record(raw, &constants()).unwrap();
        assert!(record.is_consistent());
    }

    #[test]
    fn condition_id_without_oracle_keeps_oracle_absent() {
        let raw = json!({ "conditionId": CONDITION_ID });
        let record = reconcile_record(raw, &constants()).unwrap();
        assert!(record.oracle.is_none());
        assert!(record.question_id.is_none());
        assert_eq!(record.yes_token_id.to_string(), YES_TOKEN_HEX);
    }

    #[test]
    fn recomputes_condition_from_oracle_and_question() {
        let raw = json!({ "questionID": question_id(), "resolvedBy": ORACLE });
        let record = reconcile_record(raw, &constants()).unwrap();
        assert_eq!(record.condition_id.to_string(), CONDITION_ID);
    }

    #[test]
    fn missing_oracle_and_condition_is_surfaced() {
        let raw = json!({ "questionID": question_id() });
        let err = reconcile_record(raw, &constants()).unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::MissingField { field: "oracle" })
        ));
    }

    #[test]
    fn malformed_oracle_is_invalid_input_when_deriving() {
        let raw = json!({ "questionID": question_id(), "oracle": "0x1234" });
        let err = reconcile_record(raw, &constants()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn malformed_oracle_beside_condition_id_is_ignored() {
        let raw = json!({ "conditionId": CONDITION_ID, "oracle": "UMA adapter" });
        let record = reconcile_record(raw, &constants()).unwrap();
        assert!(record.oracle.is_none());
        assert_eq!(record.condition_id.to_string(), CONDITION_ID);
        assert_eq!(record.yes_token_id.to_string(), YES_TOKEN_HEX);
    }

    #[tokio::test]
    async fn lookup_by_slug_reconciles_registry_record() {
        let registry = StaticRegistry::new().with_slug("will-it-rain", gamma_market());
        let reconciler = MarketReconciler::new(registry, constants());
        let record = reconciler.reconcile_by_slug("will-it-rain").await.unwrap();
        assert_eq!(record.no_token_id.to_decimal(), NO_TOKEN_DECIMAL);
    }

    #[tokio::test]
    async fn lookup_by_condition_id_normalizes_the_key() {
        let registry = StaticRegistry::new().with_condition(CONDITION_ID, gamma_market());
        let reconciler = MarketReconciler::new(registry, constants());
        let record = reconciler
            .reconcile_by_condition_id(&CONDITION_ID[2..].to_uppercase())
            .await
            .unwrap();
        assert_eq!(record.condition_id.to_string(), CONDITION_ID);
    }

    #[tokio::test]
    async fn unknown_slug_is_market_not_found() {
        let reconciler = MarketReconciler::new(StaticRegistry::new(), constants());
        let err = reconciler.reconcile_by_slug("nope").await.unwrap_err();
        assert!(matches!(err, Error::MarketNotFound { key } if key == "nope"));
    }

    #[tokio::test]
    async fn registry_failure_propagates() {
        let reconciler = MarketReconciler::new(StaticRegistry::unavailable(), constants());
        let err = reconciler.reconcile_by_slug("any").await.unwrap_err();
        assert!(matches!(err, Error::RegistryUnavailable(_)));
    }
}
