//! JSON-RPC endpoint configuration.

use serde::Deserialize;

/// Node endpoint used for receipt lookups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RpcConfig {
    /// HTTP(S) JSON-RPC URL. Overridden by `RPC_URL`.
    #[serde(default = "default_rpc_url")]
    pub url: String,
    /// Upper bound on a single receipt lookup, in milliseconds.
    #[serde(default = "default_rpc_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_rpc_url() -> String {
    "https://polygon-rpc.com".into()
}

const fn default_rpc_timeout_ms() -> u64 {
    10_000
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            timeout_ms: default_rpc_timeout_ms(),
        }
    }
}
