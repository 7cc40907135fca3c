//! Run poller
//!
//! Queries the results of a queued run until it reaches a terminal status or
//! the time budget runs out, then evaluates the last snapshot.
//!
//! The first query is sent immediately; the poll interval is slept only after
//! a non-terminal snapshot. The budget is checked before each query, so a slow
//! request that crosses the deadline completes and only the next query is
//! skipped. Any transport or parse error ends polling at once.

use simrun_client::SimulationApi;
use simrun_core::domain::run::RunSnapshot;
use simrun_core::domain::verdict::Verdict;
use std::sync::Arc;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::ActionError;

/// Last snapshot of a finished run and its verdict
#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub snapshot: RunSnapshot,
    pub verdict: Verdict,
}

/// Polls the evaluation service for the results of one run
pub struct RunPoller {
    api: Arc<dyn SimulationApi>,
    poll_interval: Duration,
    timeout: Duration,
}

impl RunPoller {
    /// Creates a new run poller
    pub fn new(api: Arc<dyn SimulationApi>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            api,
            poll_interval,
            timeout,
        }
    }

    /// Polls until `run_id` is terminal and evaluates it against `min_score`
    pub async fn poll_and_evaluate(
        &self,
        run_id: &str,
        min_score: f64,
    ) -> Result<PollOutcome, ActionError> {
        let snapshot = self.wait_for_terminal(run_id).await?;
        let verdict = Verdict::evaluate(&snapshot, min_score);

        if verdict.is_success() {
            info!("{}", verdict.message());
        } else {
            warn!("{}", verdict.message());
        }

        Ok(PollOutcome { snapshot, verdict })
    }

    /// Polls until `run_id` reports a terminal status
    pub async fn wait_for_terminal(&self, run_id: &str) -> Result<RunSnapshot, ActionError> {
        info!(
            "Waiting for simulation run {} (interval: {:?}, timeout: {:?})",
            run_id, self.poll_interval, self.timeout
        );

        let start = Instant::now();

        loop {
            if start.elapsed() > self.timeout {
                return Err(ActionError::Timeout {
                    run_id: run_id.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                });
            }

            let snapshot = self
                .api
                .retrieve_results(run_id)
                .await
                .map_err(|e| ActionError::from_poll(run_id, e))?;

            info!(
                "Run {} status: {} ({}/{} passed, {} failed, score {:.2}%)",
                run_id,
                snapshot.status,
                snapshot.passed_tests,
                snapshot.total_tests,
                snapshot.failed_tests,
                snapshot.score()
            );

            if snapshot.is_terminal() {
                return Ok(snapshot);
            }

            debug!("Run {} not finished, sleeping {:?}", run_id, self.poll_interval);
            time::sleep(self.poll_interval).await;
        }
    }
}
