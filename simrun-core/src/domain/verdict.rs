//! Final verdict for a finished simulation run

use crate::domain::run::{RunSnapshot, RunStatus};

/// Outcome of evaluating the last snapshot of a run against a threshold
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Run succeeded and the score met the threshold
    Passed { score: f64, min_score: f64 },
    /// Run ended in a status other than `completed` or `success`
    StatusFailure { run_id: String, status: RunStatus },
    /// Run succeeded but scored below the threshold
    BelowThreshold { score: f64, min_score: f64 },
}

impl Verdict {
    /// Evaluate a terminal snapshot
    ///
    /// The status check comes first: a failed run is a failure whatever its score.
    pub fn evaluate(snapshot: &RunSnapshot, min_score: f64) -> Self {
        if !snapshot.status.is_success() {
            return Verdict::StatusFailure {
                run_id: snapshot.run_id.clone(),
                status: snapshot.status.clone(),
            };
        }

        let score = snapshot.score();
        if score < min_score {
            Verdict::BelowThreshold { score, min_score }
        } else {
            Verdict::Passed { score, min_score }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Passed { .. })
    }

    /// Human-readable message for logs and the CI failure signal
    pub fn message(&self) -> String {
        match self {
            Verdict::Passed { score, min_score } => format!(
                "Score {:.2}% meets the minimum threshold of {:.2}%",
                score, min_score
            ),
            Verdict::StatusFailure { run_id, status } => format!(
                "Simulation run {} finished with status '{}'",
                run_id, status
            ),
            Verdict::BelowThreshold { score, min_score } => format!(
                "Score {:.2}% is below the minimum threshold of {:.2}%",
                score, min_score
            ),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
