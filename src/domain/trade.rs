//! Raw event logs and the trade records decoded from them.

use std::fmt;

use alloy_primitives::{Address, Bytes, B256, U256};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::id::PositionId;

/// One log entry of a transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLog {
    /// Emitting contract.
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    /// Position within the block; absent for pending receipts.
    pub log_index: Option<u64>,
}

/// Direction of a fill from the maker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Maker pays collateral and receives outcome tokens.
    Buy,
    /// Maker pays outcome tokens and receives collateral.
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// A decoded order fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRecord {
    pub tx_hash: B256,
    pub log_index: Option<u64>,
    #[serde(serialize_with = "checksummed")]
    pub exchange: Address,
    #[serde(serialize_with = "checksummed")]
    pub maker: Address,
    #[serde(serialize_with = "checksummed")]
    pub taker: Address,
    #[serde(serialize_with = "decimal_string")]
    pub maker_asset_id: U256,
    #[serde(serialize_with = "decimal_string")]
    pub taker_asset_id: U256,
    #[serde(serialize_with = "decimal_string")]
    pub maker_amount: U256,
    #[serde(serialize_with = "decimal_string")]
    pub taker_amount: U256,
    /// Collateral paid per outcome token.
    pub price: Decimal,
    pub token_id: PositionId,
    pub side: Side,
}

pub(crate) fn checksummed<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

fn decimal_string<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
