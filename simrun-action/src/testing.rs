//! In-memory evaluation service used by the step's tests

use async_trait::async_trait;
use simrun_client::{ClientError, SimulationApi};
use simrun_core::domain::run::{JobHandle, RunSnapshot, RunStatus};
use simrun_core::dto::run::QueueRunRequest;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted service: answers queue requests with a fixed result and results
/// queries from a queue of responses
///
/// Once the results queue runs dry every query reports `running`.
pub struct ScriptedApi {
    queue_result: Mutex<Option<Result<JobHandle, ClientError>>>,
    results: Mutex<VecDeque<Result<RunSnapshot, ClientError>>>,
    latency: Duration,
    submitted: Mutex<Vec<QueueRunRequest>>,
    queue_calls: AtomicUsize,
    results_calls: AtomicUsize,
}

impl ScriptedApi {
    /// Service that accepts the queue request as `run_id`
    pub fn queued(run_id: &str) -> Self {
        Self::with_queue_result(Ok(JobHandle {
            run_id: run_id.to_string(),
            status: RunStatus::Queued,
        }))
    }

    /// Service that rejects the queue request
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::with_queue_result(Err(ClientError::api_error(status, body)))
    }

    fn with_queue_result(result: Result<JobHandle, ClientError>) -> Self {
        Self {
            queue_result: Mutex::new(Some(result)),
            results: Mutex::new(VecDeque::new()),
            latency: Duration::ZERO,
            submitted: Mutex::new(Vec::new()),
            queue_calls: AtomicUsize::new(0),
            results_calls: AtomicUsize::new(0),
        }
    }

    /// Queues snapshots with the given statuses, 10 tests each
    pub fn with_statuses(self, statuses: &[&str], passed: u64) -> Self {
        {
            let mut results = self.results.lock().unwrap();
            for status in statuses {
                results.push_back(Ok(snapshot(status, passed, 10)));
            }
        }
        self
    }

    /// Queues an arbitrary results response
    pub fn with_result(self, result: Result<RunSnapshot, ClientError>) -> Self {
        self.results.lock().unwrap().push_back(result);
        self
    }

    /// Makes every results query take `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn queue_calls(&self) -> usize {
        self.queue_calls.load(Ordering::SeqCst)
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<QueueRunRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

/// Snapshot for run `run-1` with `passed` of `total` tests passing
pub fn snapshot(status: &str, passed: u64, total: u64) -> RunSnapshot {
    RunSnapshot {
        run_id: "run-1".to_string(),
        summary: format!("{} of {} passed", passed, total),
        status: RunStatus::parse(status),
        status_text: status.to_string(),
        total_tests: total,
        passed_tests: passed,
        failed_tests: total - passed,
        completed_tests: total,
        incompleted_tests: 0,
    }
}

#[async_trait]
impl SimulationApi for ScriptedApi {
    async fn queue_run(&self, request: &QueueRunRequest) -> Result<JobHandle, ClientError> {
        self.queue_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(request.clone());
        self.queue_result
            .lock()
            .unwrap()
            .take()
            .expect("queue_run called more than once")
    }

    async fn retrieve_results(&self, _run_id: &str) -> Result<RunSnapshot, ClientError> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let next = self.results.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(snapshot("running", 0, 10)))
    }
}
