//! Infrastructure configuration modules.

pub mod chain;
pub mod logging;
pub mod registry;
pub mod rpc;
pub mod settings;

pub use settings::Config;
