//! Receipt port for transaction log retrieval.

use alloy_primitives::B256;
use async_trait::async_trait;

use crate::domain::trade::RawLog;
use crate::error::Error;

/// Source of already-mined transaction receipts.
///
/// Implementations perform a single lookup per call; retry and timeout
/// policy belongs to the implementation, not the caller.
#[async_trait]
pub trait ReceiptLookup: Send + Sync {
    /// Fetch the logs of a transaction, in receipt order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReceiptNotFound`] when the network does not know the
    /// hash, and [`Error::Rpc`] for transport failures.
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Vec<RawLog>, Error>;

    /// Backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
