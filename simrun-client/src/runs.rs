//! Simulation run endpoints

use simrun_core::domain::run::{JobHandle, RunSnapshot};
use simrun_core::dto::run::{QueueRunRequest, QueueRunResponse, RunResultsResponse};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{API_KEY_HEADER, SimulationClient};

impl SimulationClient {
    /// Queue a new simulation run
    ///
    /// Sends exactly one request; a failure is returned as-is and never retried,
    /// since queueing the same run twice would create two runs.
    ///
    /// # Arguments
    /// * `request` - The run to queue
    ///
    /// # Returns
    /// A handle carrying the run identifier and its initial status
    pub async fn queue_run(&self, request: &QueueRunRequest) -> Result<JobHandle> {
        self.ensure_api_key()?;

        let url = format!("{}/v1/queue-simulation-run", self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let body: QueueRunResponse = self.handle_response(response).await?;
        Ok(body.into())
    }

    /// Retrieve the current results of a run
    ///
    /// # Arguments
    /// * `run_id` - The run identifier returned by [`SimulationClient::queue_run`]
    ///
    /// # Returns
    /// A fresh snapshot of the run
    pub async fn retrieve_results(&self, run_id: &str) -> Result<RunSnapshot> {
        self.ensure_api_key()?;

        let url = self.results_url(run_id);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let body: RunResultsResponse = self.handle_response(response).await?;
        Ok(body.result)
    }

    fn results_url(&self, run_id: &str) -> String {
        format!(
            "{}/v1/retrieve-simulation-results/{}",
            self.base_url,
            urlencoding::encode(run_id)
        )
    }

    fn ensure_api_key(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(ClientError::InvalidRequest(
                "API key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
