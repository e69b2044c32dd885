//! Registry port for off-chain market metadata.

use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;

/// Off-chain market registry keyed by slug or condition id.
///
/// Records are returned as raw JSON so the reconciler can keep the full
/// payload for traceability.
#[async_trait]
pub trait MarketRegistry: Send + Sync {
    /// Look up one market by its human-readable slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryUnavailable`] on network or HTTP failure.
    async fn market_by_slug(&self, slug: &str) -> Result<Option<Value>, Error>;

    /// Look up one market by condition id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryUnavailable`] on network or HTTP failure.
    async fn market_by_condition_id(&self, condition_id: &str) -> Result<Option<Value>, Error>;

    /// Registry name for logging/debugging.
    fn registry_name(&self) -> &'static str;
}

/// Fields of a registry record the reconciler relies on.
///
/// Every field is optional because registry completeness varies per
/// market. Token ids may arrive as a JSON array or as a JSON-encoded string
/// holding an array (`"[\"1\", \"2\"]"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMarket {
    #[serde(default)]
    pub condition_id: Option<String>,
    #[serde(default, rename = "questionID", alias = "questionId")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub oracle: Option<String>,
    /// Gamma's name for the resolution oracle (the UMA adapter).
    #[serde(default)]
    pub resolved_by: Option<String>,
    #[serde(default)]
    pub collateral_token: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub clob_token_ids: Vec<String>,
}

impl RegistryMarket {
    /// Build the typed view of a raw registry payload.
    ///
    /// # Errors
    ///
    /// Returns a JSON error when a known field has an unexpected type.
    pub fn from_value(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    /// Reported oracle, preferring an explicit `oracle` field.
    #[must_use]
    pub fn oracle(&self) -> Option<&str> {
        self.oracle.as_deref().or(self.resolved_by.as_deref())
    }

    /// Drop blank strings so they count as absent.
    #[must_use]
    pub fn without_blanks(self) -> Self {
        Self {
            condition_id: non_empty(self.condition_id),
            question_id: non_empty(self.question_id),
            oracle: non_empty(self.oracle),
            resolved_by: non_empty(self.resolved_by),
            collateral_token: non_empty(self.collateral_token),
            clob_token_ids: self.clob_token_ids,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => serde_json::from_str::<Vec<String>>(&s).map_err(de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_gamma_shaped_payload() {
        let raw = json!({
            "conditionId": "0xabc",
            "questionID": "0xdef",
            "resolvedBy": "0x157Ce2d672854c848c9b79C49a8Cc6cc89176a49",
            "clobTokenIds": "[\"1\", \"2\"]",
            "volume": "12.5"
        });
        let market = RegistryMarket::from_value(&raw).unwrap();
        assert_eq!(market.condition_id.as_deref(), Some("0xabc"));
        assert_eq!(market.question_id.as_deref(), Some("0xdef"));
        assert_eq!(
            market.oracle(),
            Some("0x157Ce2d672854c848c9b79C49a8Cc6cc89176a49")
        );
        assert_eq!(market.clob_token_ids, vec!["1", "2"]);
    }

    #[test]
    fn accepts_token_ids_as_array() {
        let raw = json!({ "clobTokenIds": ["10", 20] });
        let market = RegistryMarket::from_value(&raw).unwrap();
        assert_eq!(market.clob_token_ids, vec!["10", "20"]);
    }

    #[test]
    fn unused_registry_fields_are_ignored() {
        let raw = json!({ "slug": "will-it-rain", "question": "Will it rain?", "conditionId": "0x01" });
        let market = RegistryMarket::from_value(&raw).unwrap();
        assert_eq!(
            market,
            RegistryMarket {
                condition_id: Some("0x01".into()),
                ..RegistryMarket::default()
            }
        );
    }

    #[test]
    fn missing_fields_are_absent() {
        let market = RegistryMarket::from_value(&json!({})).unwrap();
        assert_eq!(market, RegistryMarket::default());
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let raw = json!({ "oracle": "", "resolvedBy": "0x01", "conditionId": "  ", "clobTokenIds": "" });
        let market = RegistryMarket::from_value(&raw).unwrap().without_blanks();
        assert_eq!(market.oracle(), Some("0x01"));
        assert!(market.condition_id.is_none());
        assert!(market.clob_token_ids.is_empty());
    }
}
