//! In-memory implementations of the outbound ports.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy_primitives::B256;
use async_trait::async_trait;
use serde_json::Value;

use crate::domain::trade::RawLog;
use crate::error::{Error, Result};
use crate::port::{MarketRegistry, ReceiptLookup};

/// Receipt lookup serving canned logs per transaction hash.
#[derive(Debug, Default)]
pub struct StaticReceipts {
    receipts: HashMap<B256, Vec<RawLog>>,
    calls: Mutex<Vec<B256>>,
}

impl StaticReceipts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_receipt(mut self, tx_hash: B256, logs: Vec<RawLog>) -> Self {
        self.receipts.insert(tx_hash, logs);
        self
    }

    /// Hashes requested so far, in call order.
    pub fn calls(&self) -> Vec<B256> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ReceiptLookup for StaticReceipts {
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Vec<RawLog>> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(tx_hash),
            Err(poisoned) => poisoned.into_inner().push(tx_hash),
        }
        self.receipts
            .get(&tx_hash)
            .cloned()
            .ok_or(Error::ReceiptNotFound { tx_hash })
    }

    fn backend_name(&self) -> &'static str {
        "static"
    }
}

/// Registry serving canned market payloads.
#[derive(Debug, Default)]
pub struct StaticRegistry {
    by_slug: HashMap<String, Value>,
    by_condition: HashMap<String, Value>,
    unavailable: bool,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a market under its slug.
    pub fn with_slug(mut self, slug: &str, market: Value) -> Self {
        self.by_slug.insert(slug.to_string(), market);
        self
    }

    /// Register a market under its condition id (normalized hex).
    pub fn with_condition(mut self, condition_id: &str, market: Value) -> Self {
        self.by_condition
            .insert(crate::domain::hex::normalize(condition_id), market);
        self
    }

    /// Fail every lookup as if the registry were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::RegistryUnavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketRegistry for StaticRegistry {
    async fn market_by_slug(&self, slug: &str) -> Result<Option<Value>> {
        self.check()?;
        Ok(self.by_slug.get(slug).cloned())
    }

    async fn market_by_condition_id(&self, condition_id: &str) -> Result<Option<Value>> {
        self.check()?;
        Ok(self
            .by_condition
            .get(&crate::domain::hex::normalize(condition_id))
            .cloned())
    }

    fn registry_name(&self) -> &'static str {
        "static"
    }
}
