//! JSON-RPC node adapters.

mod receipt;

pub use receipt::RpcReceiptLookup;
