use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ctfscan::adapter::inbound::cli::command::Cli;
use ctfscan::adapter::inbound::cli::run;
use ctfscan::infrastructure::config::Config;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fatal error");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    config.logging = config.logging.with_verbosity(cli.verbose, cli.quiet);
    config.init_logging();
    debug!(rpc = %config.rpc.url, registry = %config.registry.gamma_api_url, "Configuration loaded");

    run::execute(cli.command, &config).await?;
    Ok(())
}
