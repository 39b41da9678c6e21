//! Input video request/response types.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::input_video;

/// An uploaded source video as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VideoResponse {
    pub id: i32,
    pub group_id: Option<i32>,
    pub filename: String,
    pub video_type: Option<String>,
    pub frame_rate: Option<i32>,
    pub resolution: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<input_video::Model> for VideoResponse {
    fn from(m: input_video::Model) -> Self {
        VideoResponse {
            id: m.id,
            group_id: m.group_id,
            filename: m.filename,
            video_type: m.video_type,
            frame_rate: m.frame_rate,
            resolution: m.resolution,
            created_at: m.created_at,
        }
    }
}
