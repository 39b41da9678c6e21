//! Encoder catalog request/response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::encoder;

/// Input for creating or updating an encoder entry.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EncoderInput {
    pub name: String,
    pub encoder_type: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub scalable: bool,
    pub layer_count: Option<i32>,
    pub path: Option<String>,
    pub filename: Option<String>,
    #[serde(default)]
    pub mode_file_required: bool,
    #[serde(default)]
    pub seq_file_required: bool,
    #[serde(default)]
    pub layers_file_required: bool,
}

/// An encoder catalog entry as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EncoderResponse {
    pub id: i32,
    pub name: String,
    pub encoder_type: Option<String>,
    pub comment: Option<String>,
    pub scalable: bool,
    pub layer_count: Option<i32>,
    pub path: Option<String>,
    pub filename: Option<String>,
    pub mode_file_required: bool,
    pub seq_file_required: bool,
    pub layers_file_required: bool,
}

impl From<encoder::Model> for EncoderResponse {
    fn from(m: encoder::Model) -> Self {
        EncoderResponse {
            id: m.id,
            name: m.name,
            encoder_type: m.encoder_type,
            comment: m.comment,
            scalable: m.scalable,
            layer_count: m.layer_count,
            path: m.path,
            filename: m.filename,
            mode_file_required: m.mode_file_required,
            seq_file_required: m.seq_file_required,
            layers_file_required: m.layers_file_required,
        }
    }
}
