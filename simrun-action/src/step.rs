//! Step orchestration
//!
//! configuration → submit → (optional) poll until terminal → evaluate → outputs

use simrun_client::SimulationApi;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::ActionError;
use crate::outputs::StepOutputs;
use crate::poller::{PollOutcome, RunPoller};
use crate::report;
use crate::submitter::Submitter;

/// Runs the step against `api`
///
/// The `run_id` output is written as soon as the run is queued, so it stays
/// visible even when polling later fails. `status` and `score` are written
/// only once polling reaches a terminal snapshot.
///
/// # Returns
/// The poll outcome, or `None` when waiting is disabled
pub async fn run_step(
    config: &Config,
    api: Arc<dyn SimulationApi>,
    outputs: &StepOutputs,
) -> Result<Option<PollOutcome>, ActionError> {
    let handle = Submitter::new(Arc::clone(&api))
        .submit(&config.request)
        .await?;
    outputs.set("run_id", &handle.run_id)?;

    if !config.wait_for_results {
        info!("Not waiting for results of run {}", handle.run_id);
        return Ok(None);
    }

    let poller = RunPoller::new(api, config.poll_interval, config.timeout);
    let outcome = poller
        .poll_and_evaluate(&handle.run_id, config.min_score)
        .await?;

    outputs.set("status", &outcome.snapshot.status_text)?;
    outputs.set("score", &format!("{:.2}", outcome.snapshot.score()))?;

    if config.print_summary {
        report::print_summary(&outcome.snapshot, &outcome.verdict);
    }

    Ok(Some(outcome))
}
