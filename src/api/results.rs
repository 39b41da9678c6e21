//! Result file API handlers.

use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};

use crate::api::read_file_field;
use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Ack;
use crate::services::results;
use crate::services::storage::Storage;

/// Upload one result file for an experiment.
///
/// Accepts multipart form data with a single file. A filename may appear at
/// most once per experiment.
#[utoipa::path(
    post,
    path = "/api/v1/experiments/{experiment_id}/results",
    tag = "Results",
    params(("experiment_id" = i32, Path, description = "Experiment ID")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Result file stored", body = Ack),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Experiment not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate filename", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn upload_result(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    config: web::Data<Config>,
    path: web::Path<i32>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let experiment_id = path.into_inner();
    let (filename, data) = read_file_field(&mut payload, config.max_upload_size).await?;

    let ack = results::upload(&pool, &storage, &auth.user, experiment_id, &filename, &data).await?;
    Ok(HttpResponse::Created().json(ack))
}

/// Download all result files of an experiment as one zip archive.
#[utoipa::path(
    get,
    path = "/api/v1/experiments/{experiment_id}/results",
    tag = "Results",
    params(("experiment_id" = i32, Path, description = "Experiment ID")),
    responses(
        (status = 200, description = "Zip archive of all result files", content_type = "application/zip"),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Experiment or files not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn download_results(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let archive = results::download(&pool, &storage, &auth.user, path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(archive.filename)],
        })
        .body(archive.data))
}

/// Configure result file routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/experiments/{experiment_id}/results")
            .route(web::get().to(download_results))
            .route(web::post().to(upload_result)),
    );
}
