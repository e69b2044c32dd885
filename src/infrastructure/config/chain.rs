//! Chain deployment constants.

use serde::Deserialize;

use crate::domain::ctf::{ChainConstants, POLYGON_USDC_E};
use crate::domain::hex;
use crate::error::{ConfigError, Result};

/// Deployment-specific addresses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainConfig {
    /// Default collateral token. Overridden by `CTF_COLLATERAL_TOKEN`.
    #[serde(default = "default_collateral_token")]
    pub collateral_token: String,
    /// Oracle to assume when a registry record has none.
    ///
    /// Unset by default: a missing oracle is reported, not guessed.
    /// Overridden by `CTF_ORACLE_FALLBACK`.
    #[serde(default)]
    pub oracle_fallback: Option<String>,
}

fn default_collateral_token() -> String {
    POLYGON_USDC_E.to_checksum(None)
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            collateral_token: default_collateral_token(),
            oracle_fallback: None,
        }
    }
}

impl ChainConfig {
    /// Parse the configured addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed address.
    #[allow(clippy::result_large_err)]
    pub fn constants(&self) -> Result<ChainConstants> {
        let collateral_token = hex::parse_address("collateral_token", &self.collateral_token)
            .map_err(|e| ConfigError::InvalidValue {
                field: "collateral_token",
                reason: e.to_string(),
            })?;
        let oracle_fallback = self
            .oracle_fallback
            .as_deref()
            .map(|raw| {
                hex::parse_address("oracle_fallback", raw).map_err(|e| ConfigError::InvalidValue {
                    field: "oracle_fallback",
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(ChainConstants {
            collateral_token,
            oracle_fallback,
        })
    }
}
