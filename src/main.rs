//! token-deployer
//!
//! ```text
//!   signer ──▶ artifact ──▶ deploy tx ──▶ confirmation ──▶ name() ──▶ stdout
//!   (env key   (factory     (one send)    (receipt poll)   (one call)
//!    or node)   lookup)
//! ```
//!
//! Exit code 0 on success, 1 on any failure with the error on stderr.

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

use token_deployer::blockchain::{BlockchainClient, DeployError, DeployResult, Wallet};
use token_deployer::cli::Cli;
use token_deployer::config;
use token_deployer::contract::Artifacts;
use token_deployer::observability::logging;
use token_deployer::{deploy, DeploymentReport};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            tracing::info!(
                deployer = %report.deployer,
                contract = %report.contract_name,
                address = %report.address,
                tx_hash = %report.tx_hash,
                block_number = report.block_number,
                token_name = %report.token_name,
                "Deployment complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> DeployResult<DeploymentReport> {
    let log_handle = logging::init();

    let config = cli.load_config()?;
    if let Some(handle) = &log_handle {
        handle.set_level(&config.observability.log_level);
    }

    let (network_name, network) = config::select_network(&config, cli.network.as_deref())?;
    tracing::info!(
        network = network_name,
        rpc_url = %network.rpc_url,
        contract = %config.contract.name,
        artifacts = %config.contract.artifacts_dir.display(),
        "Configuration loaded"
    );

    let wallet = Wallet::from_env()?;
    let client = BlockchainClient::connect(network.clone(), wallet).await?;

    let artifacts = Artifacts::new(config.contract.artifacts_dir.clone());
    deploy::run(
        &client,
        &artifacts,
        &config.contract.name,
        &mut std::io::stdout(),
    )
    .await
}

fn report_error(err: &DeployError) {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("Caused by: {cause}");
        source = cause.source();
    }
}
