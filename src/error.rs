use alloy_primitives::B256;
use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed or missing identifier inputs.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("market not found in registry: {key}")]
    MarketNotFound { key: String },

    #[error("market registry unavailable: {0}")]
    RegistryUnavailable(String),

    #[error("transaction receipt not found: {tx_hash}")]
    ReceiptNotFound { tx_hash: B256 },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the caller supplied a malformed value.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_invalid_input())
    }
}
