//! Simulation run domain types

use serde::{Deserialize, Serialize};

/// Status reported by the evaluation service for a simulation run
///
/// Parsing is case-insensitive. Values outside the known set are kept
/// verbatim in [`RunStatus::Unrecognized`] and treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Queued,
    Running,
    Completed,
    Success,
    Failed,
    Cancelled,
    Error,
    Unrecognized(String),
}

impl RunStatus {
    /// Parse a status string reported by the service
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "queued" => RunStatus::Queued,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "success" => RunStatus::Success,
            "failed" => RunStatus::Failed,
            "cancelled" => RunStatus::Cancelled,
            "error" => RunStatus::Error,
            _ => RunStatus::Unrecognized(raw.to_string()),
        }
    }

    /// Whether no further state change is expected from the service
    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    /// Terminal states that count as a successful run
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Success)
    }

    /// Terminal states that count as a failed run
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Error
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Error => "error",
            RunStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for RunStatus {
    fn from(raw: String) -> Self {
        RunStatus::parse(&raw)
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to a queued simulation run
///
/// Created once by submission and kept for the rest of the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub run_id: String,
    pub status: RunStatus,
}

/// One status query result for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRunSnapshot")]
pub struct RunSnapshot {
    #[serde(rename = "id")]
    pub run_id: String,
    pub summary: String,
    #[serde(skip_serializing)]
    pub status: RunStatus,
    /// Status exactly as the service reported it
    #[serde(rename = "status")]
    pub status_text: String,
    pub total_tests: u64,
    pub passed_tests: u64,
    pub failed_tests: u64,
    pub completed_tests: u64,
    pub incompleted_tests: u64,
}

#[derive(Deserialize)]
struct WireRunSnapshot {
    #[serde(rename = "id", alias = "run_id")]
    run_id: String,
    #[serde(default)]
    summary: String,
    status: String,
    #[serde(default)]
    total_tests: u64,
    #[serde(default)]
    passed_tests: u64,
    #[serde(default)]
    failed_tests: u64,
    #[serde(default)]
    completed_tests: u64,
    #[serde(default)]
    incompleted_tests: u64,
}

impl From<WireRunSnapshot> for RunSnapshot {
    fn from(wire: WireRunSnapshot) -> Self {
        RunSnapshot {
            run_id: wire.run_id,
            summary: wire.summary,
            status: RunStatus::parse(&wire.status),
            status_text: wire.status,
            total_tests: wire.total_tests,
            passed_tests: wire.passed_tests,
            failed_tests: wire.failed_tests,
            completed_tests: wire.completed_tests,
            incompleted_tests: wire.incompleted_tests,
        }
    }
}

impl RunSnapshot {
    /// Percentage of tests that passed
    pub fn score(&self) -> f64 {
        score(self.passed_tests, self.total_tests)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Percentage of `passed` over `total`, or 0 when nothing ran
pub fn score(passed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (passed as f64 / total as f64) * 100.0
}
