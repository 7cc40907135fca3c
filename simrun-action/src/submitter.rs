//! Run submitter
//!
//! Queues the simulation run. Exactly one request is sent; failures are not
//! retried because queueing is not idempotent on the service side.

use simrun_client::{ClientError, SimulationApi};
use simrun_core::domain::run::JobHandle;
use simrun_core::dto::run::QueueRunRequest;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::ActionError;

/// Queues simulation runs against the evaluation service
pub struct Submitter {
    api: Arc<dyn SimulationApi>,
}

impl Submitter {
    pub fn new(api: Arc<dyn SimulationApi>) -> Self {
        Self { api }
    }

    /// Queues `request` and returns the handle of the new run
    pub async fn submit(&self, request: &QueueRunRequest) -> Result<JobHandle, ActionError> {
        if request.agent_id.is_empty() {
            return Err(ActionError::Configuration(
                "agent_id is required".to_string(),
            ));
        }

        info!("Queueing simulation run for agent {}", request.agent_id);

        match self.api.queue_run(request).await {
            Ok(handle) => {
                info!(
                    "Queued simulation run {} (status: {})",
                    handle.run_id, handle.status
                );
                Ok(handle)
            }
            Err(e) => {
                error!("{}: {}", failure_kind(&e), e);
                Err(ActionError::from_submit(e))
            }
        }
    }
}

/// Short description of who is at fault for a failed queue request
fn failure_kind(e: &ClientError) -> &'static str {
    if e.is_client_error() {
        "Queue request rejected by the evaluation service"
    } else if e.is_server_error() {
        "Evaluation service failed to queue the run"
    } else {
        "Queue request failed"
    }
}
