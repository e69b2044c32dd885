//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is read from an optional TOML file; every section has
//! defaults, and a handful of deployment values can be overridden from the
//! environment (`RPC_URL`, `GAMMA_API_URL`, `CTF_COLLATERAL_TOKEN`,
//! `CTF_ORACLE_FALLBACK`).
//!
//! # Example
//!
//! ```no_run
//! use ctfscan::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("ctfscan.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::path::Path;

use super::chain::ChainConfig;
use super::logging::LoggingConfig;
use super::registry::RegistryConfig;
use super::rpc::RpcConfig;
use crate::domain::ctf::ChainConstants;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// JSON-RPC node for receipt lookups.
    #[serde(default)]
    pub rpc: RpcConfig,

    /// Market registry HTTP settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Deployment addresses used by identifier derivation.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reads one variable from the process environment.
fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Config {
    /// Parse configuration from TOML content, applying process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, process_env)
    }

    /// Parse configuration from TOML content with an explicit environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(&env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when given, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::parse_toml(""),
        }
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        let set = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = set("RPC_URL") {
            self.rpc.url = url;
        }
        if let Some(url) = set("GAMMA_API_URL") {
            self.registry.gamma_api_url = url;
        }
        if let Some(token) = set("CTF_COLLATERAL_TOKEN") {
            self.chain.collateral_token = token;
        }
        if let Some(oracle) = set("CTF_ORACLE_FALLBACK") {
            self.chain.oracle_fallback = Some(oracle);
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.rpc.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "rpc.url" }.into());
        }
        if let Err(e) = url::Url::parse(&self.rpc.url) {
            return Err(ConfigError::InvalidValue {
                field: "rpc.url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.rpc.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rpc.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.registry.gamma_api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "registry.gamma_api_url",
            }
            .into());
        }
        if let Err(e) = url::Url::parse(&self.registry.gamma_api_url) {
            return Err(ConfigError::InvalidValue {
                field: "registry.gamma_api_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.registry.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registry.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.registry.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registry.retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        self.chain.constants()?;
        Ok(())
    }

    /// Chain constants for identifier derivation.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed configured addresses; unreachable
    /// after successful loading.
    #[allow(clippy::result_large_err)]
    pub fn chain_constants(&self) -> Result<ChainConstants> {
        self.chain.constants()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
