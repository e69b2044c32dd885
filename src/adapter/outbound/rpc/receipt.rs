//! Receipt lookup over Ethereum JSON-RPC.

use std::time::Duration;

use alloy_primitives::B256;
use alloy_provider::{Provider, ProviderBuilder};
use async_trait::async_trait;
use tracing::debug;

use crate::domain::trade::RawLog;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::rpc::RpcConfig;
use crate::port::ReceiptLookup;

/// `eth_getTransactionReceipt` against a single HTTP node.
#[derive(Debug, Clone)]
pub struct RpcReceiptLookup {
    rpc_url: url::Url,
    timeout: Duration,
}

impl RpcReceiptLookup {
    /// # Errors
    ///
    /// Returns a config error when the node URL does not parse.
    #[allow(clippy::result_large_err)]
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let rpc_url: url::Url =
            rpc_url
                .parse()
                .map_err(|e: url::ParseError| ConfigError::InvalidValue {
                    field: "rpc.url",
                    reason: e.to_string(),
                })?;
        Ok(Self { rpc_url, timeout })
    }

    /// # Errors
    ///
    /// Same as [`Self::new`].
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &RpcConfig) -> Result<Self> {
        Self::new(&config.url, Duration::from_millis(config.timeout_ms))
    }
}

#[async_trait]
impl ReceiptLookup for RpcReceiptLookup {
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Vec<RawLog>> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());

        let receipt = tokio::time::timeout(self.timeout, provider.get_transaction_receipt(tx_hash))
            .await
            .map_err(|_| Error::Rpc(format!("receipt lookup timed out after {:?}", self.timeout)))?
            .map_err(|e| Error::Rpc(format!("Failed to get receipt: {e}")))?
            .ok_or(Error::ReceiptNotFound { tx_hash })?;

        let logs: Vec<RawLog> = receipt
            .inner
            .logs()
            .iter()
            .map(|log| RawLog {
                address: log.address(),
                topics: log.topics().to_vec(),
                data: log.data().data.clone(),
                log_index: log.log_index,
            })
            .collect();

        debug!(tx_hash = %tx_hash, logs = logs.len(), "Fetched receipt");
        Ok(logs)
    }

    fn backend_name(&self) -> &'static str {
        "json-rpc"
    }
}
