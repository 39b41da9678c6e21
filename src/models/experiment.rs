//! Experiment aggregate request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::models::NetworkResponse;

/// Experiment status label.
///
/// Not a driven state machine: update sets it directly, but it must always
/// be one of these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentStatus {
    Pending,
    Complete,
    Error,
}

impl ExperimentStatus {
    /// Parse a status from its stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "COMPLETE" => Some(Self::Complete),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Get status as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Complete => "COMPLETE",
            Self::Error => "ERROR",
        }
    }
}

/// One sequence specification supplied on create or update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SequenceInput {
    /// Network profile used as topology.
    pub topology_id: i32,
    /// Network profile used as disruption profile.
    pub disruption_profile_id: i32,
    /// Opaque key/value encoding parameters, stored as-is.
    pub encoding_parameters: JsonValue,
}

/// A sequence as returned to clients, with its network profiles resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SequenceResponse {
    pub sequence_id: i32,
    pub topology: Option<NetworkResponse>,
    pub disruption_profile: Option<NetworkResponse>,
    pub encoding_parameters: JsonValue,
}

/// Request body for creating an experiment with its initial sequences.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateExperimentRequest {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub sequences: Vec<SequenceInput>,
}

/// Request body for partially updating an experiment.
///
/// Omitted fields are left untouched (PATCH semantics, not full replace).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateExperimentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ExperimentStatus>,
    #[serde(default)]
    pub add_sequences: Vec<SequenceInput>,
    #[serde(default)]
    pub remove_sequence_ids: Vec<i32>,
}

/// The fully hydrated experiment aggregate.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExperimentResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub owner_id: i32,
    pub status: ExperimentStatus,
    pub created_at: DateTime<Utc>,
    pub sequences: Vec<SequenceResponse>,
}

/// Status-only view of an experiment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExperimentStatusResponse {
    pub status: ExperimentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ExperimentStatus::Pending,
            ExperimentStatus::Complete,
            ExperimentStatus::Error,
        ] {
            assert_eq!(ExperimentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ExperimentStatus::parse("RUNNING"), None);
    }

    #[test]
    fn test_status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ExperimentStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }

    #[test]
    fn test_update_request_defaults() {
        let req: UpdateExperimentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.description.is_none());
        assert!(req.status.is_none());
        assert!(req.add_sequences.is_empty());
        assert!(req.remove_sequence_ids.is_empty());
    }

    #[test]
    fn test_create_request_parses_nested_sequences() {
        let req: CreateExperimentRequest = serde_json::from_str(
            r#"{
                "name": "Exp1",
                "description": "h264 baseline",
                "sequences": [
                    {
                        "topology_id": 1,
                        "disruption_profile_id": 2,
                        "encoding_parameters": {"codec": "h264"}
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(req.sequences.len(), 1);
        assert_eq!(req.sequences[0].encoding_parameters["codec"], "h264");
    }
}
