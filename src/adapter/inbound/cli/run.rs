//! Subcommand handlers.
//!
//! Builds the outbound adapters from [`Config`] and hands them to the
//! application services.

use alloy_primitives::B256;
use serde::Serialize;
use tracing::info;

use super::command::{Commands, DeriveArgs, MarketArgs, Stage1Args, TradesArgs};
use super::output::emit;
use crate::adapter::outbound::gamma::GammaRegistry;
use crate::adapter::outbound::rpc::RpcReceiptLookup;
use crate::application::orchestrator::{fetch_trades, Stage1Pipeline};
use crate::application::reconciler::MarketReconciler;
use crate::domain::ctf::{derive_binary_positions, BinaryMarketParams};
use crate::domain::error::DomainError;
use crate::domain::trade::TradeRecord;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Output of `ctfscan trades`.
#[derive(Debug, Serialize)]
struct TradesOutput {
    tx_hash: B256,
    trades: Vec<TradeRecord>,
}

/// Dispatch one parsed subcommand.
///
/// # Errors
///
/// Returns the first failure of the selected command. `stage1` only fails
/// on adapter construction or output errors; stage failures are reported
/// inside the document.
pub async fn execute(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Stage1(args) => stage1(args, config).await,
        Commands::Trades(args) => trades(args, config).await,
        Commands::Market(args) => market(args, config).await,
        Commands::Derive(args) => derive(&args, config),
    }
}

async fn stage1(args: Stage1Args, config: &Config) -> Result<()> {
    let receipts = RpcReceiptLookup::from_config(&config.rpc)?;
    let reconciler = reconciler(config)?;
    let pipeline = Stage1Pipeline::new(receipts, reconciler);

    let report = pipeline.run(args.tx_hash, args.event_slug.as_deref()).await;
    emit(&report.as_output(), args.output.as_deref())
}

async fn trades(args: TradesArgs, config: &Config) -> Result<()> {
    let receipts = RpcReceiptLookup::from_config(&config.rpc)?;
    let trades = fetch_trades(&receipts, args.tx_hash).await?;
    info!(count = trades.len(), "Found trades");

    let output = TradesOutput {
        tx_hash: args.tx_hash,
        trades,
    };
    emit(&output, args.output.as_deref())
}

async fn market(args: MarketArgs, config: &Config) -> Result<()> {
    let reconciler = reconciler(config)?;
    let record = match (&args.market_slug, &args.condition_id) {
        (Some(slug), _) => reconciler.reconcile_by_slug(slug).await?,
        (None, Some(condition_id)) => reconciler.reconcile_by_condition_id(condition_id).await?,
        (None, None) => return Err(DomainError::MissingField { field: "market_slug" }.into()),
    };
    emit(&record, args.output.as_deref())
}

fn derive(args: &DeriveArgs, config: &Config) -> Result<()> {
    let params = BinaryMarketParams {
        oracle: args.oracle.as_deref(),
        question_id: args.question_id.as_deref(),
        condition_id: args.condition_id.as_deref(),
        collateral_token: args.collateral.as_deref(),
    };
    let positions = derive_binary_positions(&params, &config.chain_constants()?)?;
    emit(&positions, None)
}

fn reconciler(config: &Config) -> Result<MarketReconciler<GammaRegistry>> {
    let registry = GammaRegistry::from_config(&config.registry);
    Ok(MarketReconciler::new(registry, config.chain_constants()?))
}
