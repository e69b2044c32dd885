//! Command-line interface definitions.
//!
//! Defines the `ctfscan` CLI structure using `clap`. Every subcommand prints
//! one JSON document to stdout; logs go to stderr.

use alloy_primitives::B256;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::hex;

/// Polymarket CTF trade and market decoder
#[derive(Parser, Debug)]
#[command(name = "ctfscan")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the ctfscan CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a transaction's fills and optionally check them against a market
    Stage1(Stage1Args),

    /// Decode the OrderFilled trades of one transaction
    Trades(TradesArgs),

    /// Look a market up in the registry and derive its token ids
    Market(MarketArgs),

    /// Derive condition and position ids offline
    Derive(DeriveArgs),
}

/// Arguments for the `stage1` command.
#[derive(Args, Debug)]
pub struct Stage1Args {
    /// Transaction hash to decode
    #[arg(long, value_parser = parse_tx_hash)]
    pub tx_hash: B256,

    /// Event or market slug for the registry lookup
    #[arg(long)]
    pub event_slug: Option<String>,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `trades` command.
#[derive(Args, Debug)]
pub struct TradesArgs {
    /// Transaction hash to decode
    #[arg(long, value_parser = parse_tx_hash)]
    pub tx_hash: B256,

    /// Also write the JSON output to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `market` command.
#[derive(Args, Debug)]
pub struct MarketArgs {
    /// Market or event slug
    #[arg(long, conflicts_with = "condition_id", required_unless_present = "condition_id")]
    pub market_slug: Option<String>,

    /// Condition id (bytes32 hex)
    #[arg(long)]
    pub condition_id: Option<String>,

    /// Also write the JSON output to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `derive` command.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Oracle address (required unless --condition-id is given)
    #[arg(long)]
    pub oracle: Option<String>,

    /// Question id (bytes32 hex)
    #[arg(long)]
    pub question_id: Option<String>,

    /// Known condition id; skips hashing oracle and question
    #[arg(long)]
    pub condition_id: Option<String>,

    /// Collateral token address [default: configured collateral]
    #[arg(long)]
    pub collateral: Option<String>,
}

fn parse_tx_hash(value: &str) -> Result<B256, String> {
    hex::parse_b256("tx_hash", value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_stage1_with_globals() {
        let hash = format!("0x{}", "ab".repeat(32));
        let cli = Cli::try_parse_from([
            "ctfscan", "-vv", "stage1", "--tx-hash", &hash, "--event-slug", "rain",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Stage1(args) = cli.command else {
            panic!("expected stage1");
        };
        assert_eq!(args.tx_hash, B256::repeat_byte(0xab));
        assert_eq!(args.event_slug.as_deref(), Some("rain"));
    }

    #[test]
    fn rejects_short_tx_hash() {
        assert!(Cli::try_parse_from(["ctfscan", "trades", "--tx-hash", "0x1234"]).is_err());
    }

    #[test]
    fn market_needs_exactly_one_key() {
        assert!(Cli::try_parse_from(["ctfscan", "market"]).is_err());
        assert!(Cli::try_parse_from([
            "ctfscan", "market", "--market-slug", "a", "--condition-id", "0x01",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["ctfscan", "market", "--market-slug", "a"]).is_ok());
    }
}
