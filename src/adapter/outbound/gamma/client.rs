//! Gamma REST API client.
//!
//! Market metadata lives at `gamma-api.polymarket.com`. User-facing slugs
//! usually name an *event* (which groups one or more markets), so slug
//! lookups query `/events` first and only fall back to `/markets`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::infrastructure::config::registry::RegistryConfig;
use crate::port::MarketRegistry;

/// HTTP client for the Gamma market registry.
pub struct GammaRegistry {
    http: HttpClient,
    base_url: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl GammaRegistry {
    /// Create a client with default HTTP settings and no retries.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.gamma_api_url.clone(),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    fn endpoint(&self, path: &str, key: &str, value: &str) -> Result<Url> {
        let base = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        Url::parse_with_params(&base, [(key, value)])
            .map_err(|e| Error::RegistryUnavailable(format!("bad registry url {base}: {e}")))
    }

    /// GET a JSON document; `Ok(None)` on 404.
    async fn get_with_retry(&self, url: &Url) -> Result<Option<Value>> {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(unavailable(url, &err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            if response.status() == StatusCode::NOT_FOUND {
                debug!(url = %url, "Registry returned 404");
                return Ok(None);
            }

            let response = match response.error_for_status() {
                Ok(response) => response,
                Err(err) => {
                    let server_side = err.status().is_some_and(|s| s.is_server_error());
                    if attempt >= max_attempts || !server_side {
                        return Err(unavailable(url, &err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            match response.json::<Value>().await {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(unavailable(url, &err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            let delay = self.retry_backoff_ms.saturating_mul(u64::from(attempt));
            sleep(Duration::from_millis(delay)).await;
        }
    }
}

fn unavailable(url: &Url, err: &reqwest::Error) -> Error {
    Error::RegistryUnavailable(format!("GET {url}: {err}"))
}

/// First market of the first event in an `/events` response.
pub(crate) fn first_event_market(body: Value) -> Option<Value> {
    let Value::Array(events) = body else {
        return None;
    };
    let mut event = events.into_iter().next()?;
    match event.get_mut("markets")?.take() {
        Value::Array(markets) => markets.into_iter().next(),
        _ => None,
    }
}

/// First element of a `/markets` response, or the object itself.
pub(crate) fn first_market(body: Value) -> Option<Value> {
    match body {
        Value::Array(markets) => markets.into_iter().next(),
        object @ Value::Object(_) => Some(object),
        _ => None,
    }
}

#[async_trait]
impl MarketRegistry for GammaRegistry {
    async fn market_by_slug(&self, slug: &str) -> Result<Option<Value>> {
        let url = self.endpoint("events", "slug", slug)?;
        info!(url = %url, "Fetching event (Gamma)");
        if let Some(market) = self.get_with_retry(&url).await?.and_then(first_event_market) {
            return Ok(Some(market));
        }

        let url = self.endpoint("markets", "slug", slug)?;
        debug!(url = %url, "No event for slug, trying markets");
        Ok(self.get_with_retry(&url).await?.and_then(first_market))
    }

    async fn market_by_condition_id(&self, condition_id: &str) -> Result<Option<Value>> {
        let url = self.endpoint("markets", "condition_id", condition_id)?;
        info!(url = %url, "Fetching market (Gamma)");
        Ok(self.get_with_retry(&url).await?.and_then(first_market))
    }

    fn registry_name(&self) -> &'static str {
        "gamma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_response_yields_first_market() {
        let body = json!([
            { "slug": "event", "markets": [{ "conditionId": "0x01" }, { "conditionId": "0x02" }] },
            { "slug": "other", "markets": [{ "conditionId": "0x03" }] }
        ]);
        assert_eq!(first_event_market(body), Some(json!({ "conditionId": "0x01" })));
    }

    #[test]
    fn event_without_markets_yields_nothing() {
        assert_eq!(first_event_market(json!([{ "slug": "event" }])), None);
        assert_eq!(first_event_market(json!([{ "markets": [] }])), None);
        assert_eq!(first_event_market(json!([])), None);
        assert_eq!(first_event_market(json!({ "markets": [{}] })), None);
    }

    #[test]
    fn markets_response_accepts_list_or_object() {
        assert_eq!(first_market(json!([{ "a": 1 }, { "a": 2 }])), Some(json!({ "a": 1 })));
        assert_eq!(first_market(json!({ "a": 1 })), Some(json!({ "a": 1 })));
        assert_eq!(first_market(json!([])), None);
        assert_eq!(first_market(json!("nope")), None);
    }

    #[test]
    fn endpoint_encodes_query_values() {
        let registry = GammaRegistry::new("https://gamma.example/");
        let url = registry.endpoint("events", "slug", "a b&c").unwrap();
        assert_eq!(url.as_str(), "https://gamma.example/events?slug=a+b%26c");
    }

    #[test]
    fn from_config_keeps_retry_settings() {
        let config = RegistryConfig {
            retry_max_attempts: 5,
            retry_backoff_ms: 10,
            ..RegistryConfig::default()
        };
        let registry = GammaRegistry::from_config(&config);
        assert_eq!(registry.retry_max_attempts, 5);
        assert_eq!(registry.base_url, "https://gamma-api.polymarket.com");
    }

    #[tokio::test]
    async fn unreachable_registry_is_unavailable() {
        let registry = GammaRegistry::new("http://127.0.0.1:9");
        let err = registry.market_by_condition_id("0x01").await.unwrap_err();
        assert!(matches!(err, Error::RegistryUnavailable(_)));
    }
}
