//! Simulation run DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run::{JobHandle, RunSnapshot, RunStatus};

/// Request to queue a new simulation run
///
/// Optional fields are always serialized, as `null` when absent, so the
/// service can tell "not provided" apart from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueRunRequest {
    pub agent_id: String,
    pub prompt_id: Option<String>,
    pub knowledge_base_id: Option<String>,
    pub participant_ids: Option<Vec<String>>,
    pub phone_number: Option<String>,
    pub sip_uri: Option<String>,
}

/// Response to a queue request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueRunResponse {
    #[serde(alias = "run_id")]
    pub id: String,
    pub status: RunStatus,
}

impl From<QueueRunResponse> for JobHandle {
    fn from(response: QueueRunResponse) -> Self {
        JobHandle {
            run_id: response.id,
            status: response.status,
        }
    }
}

/// Response to a results query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResultsResponse {
    pub result: RunSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_optionals_serialize_as_null() {
        let request = QueueRunRequest {
            agent_id: "agent-1".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "agent_id": "agent-1",
                "prompt_id": null,
                "knowledge_base_id": null,
                "participant_ids": null,
                "phone_number": null,
                "sip_uri": null,
            })
        );
    }

    #[test]
    fn test_queue_response_into_handle() {
        let response: QueueRunResponse =
            serde_json::from_value(json!({"run_id": "abc", "status": "QUEUED"})).unwrap();
        let handle = JobHandle::from(response);
        assert_eq!(handle.run_id, "abc");
        assert_eq!(handle.status, RunStatus::Queued);
    }

    #[test]
    fn test_queue_response_requires_id() {
        let parsed = serde_json::from_value::<QueueRunResponse>(json!({"status": "queued"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_results_response_nested_snapshot() {
        let response: RunResultsResponse = serde_json::from_value(json!({
            "result": {
                "id": "abc",
                "summary": "3 of 4 passed",
                "status": "completed",
                "total_tests": 4,
                "passed_tests": 3,
                "failed_tests": 1,
                "completed_tests": 4,
                "incompleted_tests": 0
            }
        }))
        .unwrap();
        assert_eq!(response.result.run_id, "abc");
        assert_eq!(response.result.score(), 75.0);
    }
}
