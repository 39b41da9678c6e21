//! Database queries for input videos.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::entity::input_video::{self, Entity as InputVideo};
use crate::error::{AppError, AppResult};

use super::DbPool;

/// Metadata recorded alongside an uploaded video file.
pub struct NewVideo {
    pub group_id: Option<i32>,
    pub filename: String,
    pub path: String,
    pub video_type: Option<String>,
    pub frame_rate: Option<i32>,
    pub resolution: Option<String>,
}

impl DbPool {
    pub async fn list_videos(&self) -> AppResult<Vec<input_video::Model>> {
        InputVideo::find()
            .order_by_asc(input_video::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list videos: {}", e)))
    }

    pub async fn get_video_by_id(&self, id: i32) -> AppResult<Option<input_video::Model>> {
        InputVideo::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get video: {}", e)))
    }

    pub async fn insert_video(&self, new: NewVideo) -> AppResult<input_video::Model> {
        input_video::ActiveModel {
            group_id: Set(new.group_id),
            filename: Set(new.filename),
            path: Set(new.path),
            video_type: Set(new.video_type),
            frame_rate: Set(new.frame_rate),
            resolution: Set(new.resolution),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.connection())
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert video: {}", e)))
    }

    pub async fn delete_video(&self, id: i32) -> AppResult<()> {
        InputVideo::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete video: {}", e)))?;
        Ok(())
    }
}
