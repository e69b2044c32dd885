//! Trade log decoder.
//!
//! Turns the raw logs of one transaction into [`TradeRecord`]s. Only
//! `OrderFilled` logs qualify; anything else is skipped entry by entry so a
//! single odd log never aborts the whole decode.
//!
//! Two domain rules apply on top of plain ABI decoding:
//!
//! - The exchange contract emits one extra aggregate fill per match in which
//!   the taker is the exchange itself. Those are dropped.
//! - Asset id `0` is the collateral leg. A maker spending collateral is
//!   buying outcome tokens; otherwise the maker is selling them.

use std::fmt;

use alloy_primitives::{B256, U256};
use alloy_sol_types::SolEvent;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::domain::event::OrderFilled;
use crate::domain::id::PositionId;
use crate::domain::trade::{RawLog, Side, TradeRecord};

/// Why a log entry did not produce a trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeSkip {
    /// Anonymous log without a signature topic.
    NoTopics,
    /// Some other event.
    UnknownEvent(B256),
    /// Right signature, undecodable topics or data.
    Malformed(String),
    /// Aggregate fill whose taker is the emitting exchange.
    SelfTrade,
}

impl fmt::Display for DecodeSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTopics => write!(f, "log has no topics"),
            Self::UnknownEvent(topic) => write!(f, "unrecognized event {topic}"),
            Self::Malformed(reason) => write!(f, "malformed OrderFilled: {reason}"),
            Self::SelfTrade => write!(f, "taker is the exchange (aggregate fill)"),
        }
    }
}

/// Decode every qualifying fill of a transaction, preserving log order.
#[must_use]
pub fn decode_trades(tx_hash: B256, logs: &[RawLog]) -> Vec<TradeRecord> {
    let trades: Vec<TradeRecord> = logs
        .iter()
        .filter_map(|log| match decode_log(tx_hash, log) {
            Ok(trade) => Some(trade),
            Err(reason) => {
                debug!(
                    tx_hash = %tx_hash,
                    log_index = ?log.log_index,
                    reason = %reason,
                    "Skipping log"
                );
                None
            }
        })
        .collect();

    debug!(
        tx_hash = %tx_hash,
        logs = logs.len(),
        trades = trades.len(),
        "Decoded trades"
    );
    trades
}

/// Decode a single log into a trade.
///
/// # Errors
///
/// Returns the [`DecodeSkip`] reason when the log is not a real fill.
pub fn decode_log(tx_hash: B256, log: &RawLog) -> Result<TradeRecord, DecodeSkip> {
    let topic0 = log.topics.first().ok_or(DecodeSkip::NoTopics)?;
    if *topic0 != OrderFilled::SIGNATURE_HASH {
        return Err(DecodeSkip::UnknownEvent(*topic0));
    }

    let event = OrderFilled::decode_raw_log(log.topics.iter().copied(), &log.data)
        .map_err(|e| DecodeSkip::Malformed(e.to_string()))?;

    let exchange = log.address;
    if event.taker == exchange {
        return Err(DecodeSkip::SelfTrade);
    }

    let (side, token, price) = if event.makerAssetId.is_zero() {
        (
            Side::Buy,
            event.takerAssetId,
            ratio(event.makerAmountFilled, event.takerAmountFilled),
        )
    } else {
        (
            Side::Sell,
            event.makerAssetId,
            ratio(event.takerAmountFilled, event.makerAmountFilled),
        )
    };

    trace!(log_index = ?log.log_index, side = %side, price = %price, "Decoded fill");

    Ok(TradeRecord {
        tx_hash,
        log_index: log.log_index,
        exchange,
        maker: event.maker,
        taker: event.taker,
        maker_asset_id: event.makerAssetId,
        taker_asset_id: event.takerAssetId,
        maker_amount: event.makerAmountFilled,
        taker_amount: event.takerAmountFilled,
        price,
        token_id: PositionId::new(token),
        side,
    })
}

/// Mantissa width of [`Decimal`].
const DECIMAL_MANTISSA_BITS: usize = 96;

/// Collateral per token as a decimal, normalized to minimal digits.
///
/// Operands wider than the decimal mantissa are shifted right by the same
/// amount first, which keeps the ratio to about 28 significant digits. A
/// zero denominator, or a quotient beyond the decimal range, yields zero so
/// the fill is still reported.
fn ratio(numerator: U256, denominator: U256) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    let shift = numerator
        .bit_len()
        .max(denominator.bit_len())
        .saturating_sub(DECIMAL_MANTISSA_BITS);
    if shift > 0 {
        debug!(%numerator, %denominator, shift, "Scaling wide fill amounts");
    }

    let (Some(num), Some(den)) = (to_decimal(numerator >> shift), to_decimal(denominator >> shift))
    else {
        return Decimal::ZERO;
    };
    num.checked_div(den)
        .map_or(Decimal::ZERO, |price| price.normalize())
}

fn to_decimal(value: U256) -> Option<Decimal> {
    let value: u128 = value.try_into().ok()?;
    Decimal::try_from_i128_with_scale(i128::try_from(value).ok()?, 0).ok()
}
