//! Domain models and request/response types.

use serde::Serialize;
use utoipa::ToSchema;

pub mod encoder;
pub mod experiment;
pub mod network;
pub mod user;
pub mod video;

// Re-export commonly used types
pub use encoder::{EncoderInput, EncoderResponse};
pub use experiment::{
    CreateExperimentRequest, ExperimentResponse, ExperimentStatus, ExperimentStatusResponse,
    SequenceInput, SequenceResponse, UpdateExperimentRequest,
};
pub use network::{NetworkInput, NetworkResponse};
pub use user::{AuthenticatedUser, Role};
pub use video::VideoResponse;

/// Informational acknowledgement returned by mutating endpoints that have
/// no richer payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Ack {
            message: message.into(),
        }
    }
}
