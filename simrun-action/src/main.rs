//! Simrun CI step
//!
//! Queues a simulation run on the evaluation service and, unless told not to
//! wait, polls it to completion and fails the pipeline when the run fails or
//! scores below the threshold.
//!
//! Architecture:
//! - Configuration: step inputs from flags or `INPUT_*` environment variables
//! - Submitter: one queue request, never retried
//! - Poller: bounded-time polling and verdict evaluation
//! - Outputs: step outputs and the failure signal for the CI runner

mod config;
mod error;
mod outputs;
mod poller;
mod report;
mod step;
mod submitter;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Cli, Config};
use crate::outputs::StepOutputs;
use simrun_client::{SimulationApi, SimulationClient};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries outputs and workflow commands
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "simrun=info,simrun_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            StepOutputs::fail(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(cli);
    config.validate()?;
    info!(
        "Loaded configuration: api_url={}, agent_id={}, wait_for_results={}",
        config.api_url, config.request.agent_id, config.wait_for_results
    );

    let http_client = simrun_client::http_client(config.request_timeout)
        .context("Failed to build HTTP client")?;
    let api: Arc<dyn SimulationApi> = Arc::new(SimulationClient::with_client(
        config.api_url.clone(),
        config.api_key.clone(),
        http_client,
    ));

    let outputs = StepOutputs::from_env();

    if let Some(outcome) = step::run_step(&config, api, &outputs).await? {
        if !outcome.verdict.is_success() {
            anyhow::bail!(outcome.verdict.message());
        }
    }

    Ok(())
}
