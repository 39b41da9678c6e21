//! Input video upload, download and deletion.

use std::path::Path;

use tracing::info;

use crate::db::videos::NewVideo;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::VideoResponse;
use crate::services::storage::Storage;

/// Optional metadata accepted alongside a video upload.
#[derive(Debug, Default)]
pub struct VideoMetadata {
    pub group_id: Option<i32>,
    pub video_type: Option<String>,
    pub frame_rate: Option<i32>,
    pub resolution: Option<String>,
}

/// Store an uploaded source video and record it in the catalog.
pub async fn upload(
    pool: &DbPool,
    storage: &Storage,
    filename: &str,
    data: &[u8],
    meta: VideoMetadata,
) -> AppResult<VideoResponse> {
    Storage::validate_filename(filename)?;

    let path = storage.put_video(filename, data).await?;

    // The stored name may carry a collision suffix; record what is on disk.
    let stored_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
        .to_string();

    let model = match pool
        .insert_video(NewVideo {
            group_id: meta.group_id,
            filename: stored_name.clone(),
            path: path.to_string_lossy().into_owned(),
            video_type: meta.video_type,
            frame_rate: meta.frame_rate,
            resolution: meta.resolution,
        })
        .await
    {
        Ok(model) => model,
        Err(e) => {
            let _ = storage.remove(&path).await;
            return Err(e);
        }
    };

    info!("Video '{}' uploaded (id {})", stored_name, model.id);

    Ok(VideoResponse::from(model))
}

/// Read a video's file contents for download.
pub async fn download(
    pool: &DbPool,
    storage: &Storage,
    id: i32,
) -> AppResult<(String, Vec<u8>)> {
    let video = pool
        .get_video_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

    let data = storage.read(Path::new(&video.path)).await?;
    Ok((video.filename, data))
}

/// Delete a video from the catalog and from disk.
pub async fn delete(pool: &DbPool, storage: &Storage, id: i32) -> AppResult<()> {
    let video = pool
        .get_video_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

    pool.delete_video(id).await?;
    storage.remove(Path::new(&video.path)).await?;

    info!("Video '{}' (id {}) deleted", video.filename, id);

    Ok(())
}
