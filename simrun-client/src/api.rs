//! Service trait for the evaluation API

use async_trait::async_trait;
use simrun_core::domain::run::{JobHandle, RunSnapshot};
use simrun_core::dto::run::QueueRunRequest;

use crate::SimulationClient;
use crate::error::Result;

/// Operations the CI step needs from the evaluation service
///
/// Implemented by [`SimulationClient`]; callers depend on the trait so the
/// submit/poll logic can run against any backend.
#[async_trait]
pub trait SimulationApi: Send + Sync {
    /// Queue a new simulation run
    async fn queue_run(&self, request: &QueueRunRequest) -> Result<JobHandle>;

    /// Retrieve the current results of a run
    async fn retrieve_results(&self, run_id: &str) -> Result<RunSnapshot>;
}

#[async_trait]
impl SimulationApi for SimulationClient {
    async fn queue_run(&self, request: &QueueRunRequest) -> Result<JobHandle> {
        SimulationClient::queue_run(self, request).await
    }

    async fn retrieve_results(&self, run_id: &str) -> Result<RunSnapshot> {
        SimulationClient::retrieve_results(self, run_id).await
    }
}
