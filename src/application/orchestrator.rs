//! Stage-one pipeline: decode a transaction's fills and, optionally,
//! reconcile a market and classify the traded tokens against it.
//!
//! Each stage fails independently; the report carries whatever succeeded
//! plus a per-stage error string.

use alloy_primitives::B256;
use serde::Serialize;
use tracing::{info, warn};

use super::decoder::decode_trades;
use super::reconciler::MarketReconciler;
use crate::domain::id::PositionId;
use crate::domain::market::{MarketRecord, TokenMatch};
use crate::domain::trade::TradeRecord;
use crate::error::Result;
use crate::port::{MarketRegistry, ReceiptLookup};

/// How one traded token relates to the looked-up market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClassification {
    pub token_id: PositionId,
    #[serde(rename = "match")]
    pub matches: TokenMatch,
}

/// Best-effort result of a stage-one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stage1Report {
    pub tx_hash: B256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<Vec<TradeRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub token_matches: Vec<TokenClassification>,
}

/// Top-level JSON document: `{"stage1": {...}}`.
#[derive(Debug, Serialize)]
pub struct Stage1Output<'a> {
    pub stage1: &'a Stage1Report,
}

impl Stage1Report {
    #[must_use]
    pub fn as_output(&self) -> Stage1Output<'_> {
        Stage1Output { stage1: self }
    }
}

/// Decode a transaction's trades through a receipt lookup.
///
/// # Errors
///
/// Propagates the lookup's error; decoding itself never fails.
pub async fn fetch_trades<L: ReceiptLookup>(lookup: &L, tx_hash: B256) -> Result<Vec<TradeRecord>> {
    info!(tx_hash = %tx_hash, backend = lookup.backend_name(), "Fetching receipt");
    let logs = lookup.receipt_logs(tx_hash).await?;
    Ok(decode_trades(tx_hash, &logs))
}

/// Classify each distinct traded token, in first-seen order.
#[must_use]
pub fn classify_tokens(trades: &[TradeRecord], market: &MarketRecord) -> Vec<TokenClassification> {
    let mut seen: Vec<PositionId> = Vec::new();
    for trade in trades {
        if !seen.contains(&trade.token_id) {
            seen.push(trade.token_id);
        }
    }

    seen.into_iter()
        .map(|token_id| {
            let matches = TokenMatch::from(market.outcome_of(&token_id));
            match matches {
                TokenMatch::Yes => info!(token_id = %token_id, "Token matches YES"),
                TokenMatch::No => info!(token_id = %token_id, "Token matches NO"),
                TokenMatch::Other => info!(
                    token_id = %token_id,
                    "Token matches neither outcome (another market in the same tx)"
                ),
            }
            TokenClassification { token_id, matches }
        })
        .collect()
}

/// Receipt lookup and market reconciler wired together.
pub struct Stage1Pipeline<L, R> {
    receipts: L,
    reconciler: MarketReconciler<R>,
}

impl<L, R> Stage1Pipeline<L, R>
where
    L: ReceiptLookup,
    R: MarketRegistry,
{
    #[must_use]
    pub const fn new(receipts: L, reconciler: MarketReconciler<R>) -> Self {
        Self {
            receipts,
            reconciler,
        }
    }

    /// Run both stages. Never fails; errors land in the report.
    pub async fn run(&self, tx_hash: B256, slug: Option<&str>) -> Stage1Report {
        let mut report = Stage1Report {
            tx_hash,
            ..Stage1Report::default()
        };

        match fetch_trades(&self.receipts, tx_hash).await {
            Ok(trades) => {
                info!(count = trades.len(), "Found trades");
                report.trades = Some(trades);
            }
            Err(err) => {
                warn!(error = %err, "Trade decoding failed");
                report.trades_error = Some(err.to_string());
            }
        }

        if let Some(slug) = slug {
            match self.reconciler.reconcile_by_slug(slug).await {
                Ok(market) => {
                    if let Some(trades) = report.trades.as_deref() {
                        report.token_matches = classify_tokens(trades, &market);
                    }
                    report.market = Some(market);
                }
                Err(err) => {
                    warn!(error = %err, slug, "Market decoding failed");
                    report.market_error = Some(err.to_string());
                }
            }
        }

        report
    }
}
