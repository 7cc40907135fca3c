//! Step error types
//!
//! Every variant here is fatal: it aborts the step before final outputs are
//! produced. A failed run or a low score is a [`Verdict`], not an error.
//!
//! [`Verdict`]: simrun_core::domain::verdict::Verdict

use simrun_client::ClientError;
use thiserror::Error;

/// Fatal errors raised while running the step
#[derive(Debug, Error)]
pub enum ActionError {
    /// Missing or invalid input; raised before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The service rejected the queue request
    #[error("Failed to queue simulation run (status {status}): {body}")]
    Submission { status: u16, body: String },

    /// A response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    ResponseParse(String),

    /// The request never got a response
    #[error("Request to evaluation service failed: {0}")]
    Transport(String),

    /// The service rejected a results query
    #[error("Failed to retrieve results for run {run_id} (status {status}): {body}")]
    Api {
        run_id: String,
        status: u16,
        body: String,
    },

    /// Polling exceeded its time budget
    #[error("Timed out after {timeout_secs}s waiting for simulation run {run_id}")]
    Timeout { run_id: String, timeout_secs: u64 },

    /// Writing step outputs failed
    #[error("Failed to write step output: {0}")]
    Output(#[from] std::io::Error),
}

impl ActionError {
    /// Maps a client error raised by the queue request
    pub fn from_submit(err: ClientError) -> Self {
        match err {
            ClientError::ApiError { status, message } => Self::Submission {
                status,
                body: message,
            },
            other => Self::from_common(other),
        }
    }

    /// Maps a client error raised by a results query for `run_id`
    pub fn from_poll(run_id: &str, err: ClientError) -> Self {
        match err {
            ClientError::ApiError { status, message } => Self::Api {
                run_id: run_id.to_string(),
                status,
                body: message,
            },
            other => Self::from_common(other),
        }
    }

    fn from_common(err: ClientError) -> Self {
        match err {
            ClientError::ParseError(message) => Self::ResponseParse(message),
            ClientError::InvalidRequest(message) => Self::Configuration(message),
            ClientError::RequestFailed(e) => Self::Transport(e.to_string()),
            ClientError::ApiError { status, message } => Self::Transport(format!(
                "unexpected status {}: {}",
                status, message
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_api_error_is_submission() {
        let err = ActionError::from_submit(ClientError::api_error(500, "boom"));
        assert!(matches!(err, ActionError::Submission { status: 500, ref body } if body == "boom"));
    }

    #[test]
    fn test_poll_api_error_names_run() {
        let err = ActionError::from_poll("run-3", ClientError::api_error(404, "gone"));
        assert_eq!(
            err.to_string(),
            "Failed to retrieve results for run run-3 (status 404): gone"
        );
    }

    #[test]
    fn test_parse_error_kept_distinct() {
        let err = ActionError::from_poll("run-3", ClientError::ParseError("bad json".into()));
        assert!(matches!(err, ActionError::ResponseParse(_)));

        let err = ActionError::from_submit(ClientError::ParseError("bad json".into()));
        assert!(matches!(err, ActionError::ResponseParse(_)));
    }

    #[test]
    fn test_timeout_message() {
        let err = ActionError::Timeout {
            run_id: "run-9".to_string(),
            timeout_secs: 1500,
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 1500s waiting for simulation run run-9"
        );
    }
}
