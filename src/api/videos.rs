//! Input video API handlers.

use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::read_file_field;
use crate::auth::{AuthUser, require_minimum_role};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{Ack, Role, VideoResponse};
use crate::services::storage::Storage;
use crate::services::videos::{self, VideoMetadata};

/// Optional metadata accepted alongside a video upload.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VideoUploadQuery {
    pub group_id: Option<i32>,
    pub video_type: Option<String>,
    pub frame_rate: Option<i32>,
    pub resolution: Option<String>,
}

/// List uploaded source videos.
#[utoipa::path(
    get,
    path = "/api/v1/videos",
    tag = "Videos",
    responses(
        (status = 200, description = "Videos", body = Vec<VideoResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_videos(_auth: AuthUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let videos: Vec<VideoResponse> = pool
        .list_videos()
        .await?
        .into_iter()
        .map(VideoResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(videos))
}

/// Upload a source video with optional metadata.
#[utoipa::path(
    post,
    path = "/api/v1/videos",
    tag = "Videos",
    params(VideoUploadQuery),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video stored", body = VideoResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn upload_video(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    config: web::Data<Config>,
    query: web::Query<VideoUploadQuery>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let (filename, data) = read_file_field(&mut payload, config.max_upload_size).await?;
    let query = query.into_inner();

    let response = videos::upload(
        &pool,
        &storage,
        &filename,
        &data,
        VideoMetadata {
            group_id: query.group_id,
            video_type: query.video_type,
            frame_rate: query.frame_rate,
            resolution: query.resolution,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(response))
}

/// Get one video catalog entry.
#[utoipa::path(
    get,
    path = "/api/v1/videos/{video_id}",
    tag = "Videos",
    params(("video_id" = i32, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video", body = VideoResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Video not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_video(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let video = pool
        .get_video_by_id(id)
        .await?
        .ok_or_else(|| crate::error::AppError::NotFound(format!("Video {} not found", id)))?;
    Ok(HttpResponse::Ok().json(VideoResponse::from(video)))
}

/// Download a source video file.
#[utoipa::path(
    get,
    path = "/api/v1/videos/{video_id}/file",
    tag = "Videos",
    params(("video_id" = i32, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video file", content_type = "application/octet-stream"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Video not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn download_video(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let (filename, data) = videos::download(&pool, &storage, path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(data))
}

/// Delete a source video. Requires the super admin role.
#[utoipa::path(
    delete,
    path = "/api/v1/videos/{video_id}",
    tag = "Videos",
    params(("video_id" = i32, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video deleted", body = Ack),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
        (status = 404, description = "Video not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_video(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::SuperAdmin)?;
    videos::delete(&pool, &storage, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Ack::new("Video deleted successfully".to_string())))
}

/// Configure video routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/videos")
            .route(web::get().to(list_videos))
            .route(web::post().to(upload_video)),
    )
    .service(
        web::resource("/videos/{video_id}")
            .route(web::get().to(get_video))
            .route(web::delete().to(delete_video)),
    )
    .service(web::resource("/videos/{video_id}/file").route(web::get().to(download_video)));
}
