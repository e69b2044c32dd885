//! Builders for raw receipt logs.
//!
//! Encodes `OrderFilled` logs word by word so decoder tests exercise the
//! same topic/data layout a node returns.

use alloy_primitives::{address, Address, Bytes, B256, U256};
use alloy_sol_types::SolEvent;

use crate::domain::event::OrderFilled;
use crate::domain::trade::RawLog;

/// Exchange address used when a test does not pick one.
pub const EXCHANGE: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
/// Maker address used when a test does not pick one.
pub const MAKER: Address = address!("0101010101010101010101010101010101010101");
/// Taker address used when a test does not pick one.
pub const TAKER: Address = address!("0202020202020202020202020202020202020202");

/// Encode an `OrderFilled` log.
///
/// `values` are `[makerAssetId, takerAssetId, makerAmountFilled,
/// takerAmountFilled, fee]`.
pub fn order_filled(exchange: Address, maker: Address, taker: Address, values: [u64; 5]) -> RawLog {
    FillBuilder::new()
        .exchange(exchange)
        .maker(maker)
        .taker(taker)
        .maker_asset(values[0])
        .taker_asset(values[1])
        .maker_amount(values[2])
        .taker_amount(values[3])
        .fee(values[4])
        .build()
}

/// Fluent builder for a single fill log.
///
/// Defaults describe a BUY of token 7 at 0.5.
#[derive(Debug, Clone)]
pub struct FillBuilder {
    exchange: Address,
    order_hash: B256,
    maker: Address,
    taker: Address,
    maker_asset: U256,
    taker_asset: U256,
    maker_amount: U256,
    taker_amount: U256,
    fee: U256,
    log_index: Option<u64>,
}

impl Default for FillBuilder {
    fn default() -> Self {
        Self {
            exchange: EXCHANGE,
            order_hash: B256::repeat_byte(0xaa),
            maker: MAKER,
            taker: TAKER,
            maker_asset: U256::ZERO,
            taker_asset: U256::from(7u64),
            maker_amount: U256::from(1_000_000u64),
            taker_amount: U256::from(2_000_000u64),
            fee: U256::ZERO,
            log_index: Some(0),
        }
    }
}

impl FillBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exchange(mut self, exchange: Address) -> Self {
        self.exchange = exchange;
        self
    }

    pub fn maker(mut self, maker: Address) -> Self {
        self.maker = maker;
        self
    }

    pub fn taker(mut self, taker: Address) -> Self {
        self.taker = taker;
        self
    }

    pub fn maker_asset(mut self, id: u64) -> Self {
        self.maker_asset = U256::from(id);
        self
    }

    pub fn taker_asset(mut self, id: u64) -> Self {
        self.taker_asset = U256::from(id);
        self
    }

    /// Use a full-width token id (e.g. a derived position id).
    pub fn token(mut self, id: U256) -> Self {
        if self.maker_asset.is_zero() {
            self.taker_asset = id;
        } else {
            self.maker_asset = id;
        }
        self
    }

    pub fn maker_amount(mut self, amount: u64) -> Self {
        self.maker_amount = U256::from(amount);
        self
    }

    pub fn taker_amount(mut self, amount: u64) -> Self {
        self.taker_amount = U256::from(amount);
        self
    }

    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = U256::from(fee);
        self
    }

    pub fn log_index(mut self, index: u64) -> Self {
        self.log_index = Some(index);
        self
    }

    pub fn build(self) -> RawLog {
        let mut data = Vec::with_capacity(5 * 32);
        for word in [
            self.maker_asset,
            self.taker_asset,
            self.maker_amount,
            self.taker_amount,
            self.fee,
        ] {
            data.extend_from_slice(&word.to_be_bytes::<32>());
        }

        RawLog {
            address: self.exchange,
            topics: vec![
                OrderFilled::SIGNATURE_HASH,
                self.order_hash,
                self.maker.into_word(),
                self.taker.into_word(),
            ],
            data: Bytes::from(data),
            log_index: self.log_index,
        }
    }
}

/// A log some other contract emitted (e.g. an ERC-1155 transfer).
pub fn foreign_log(log_index: u64) -> RawLog {
    RawLog {
        address: Address::repeat_byte(0x4d),
        topics: vec![B256::repeat_byte(0xc3), B256::ZERO],
        data: Bytes::from(vec![0u8; 64]),
        log_index: Some(log_index),
    }
}
