//! Experiment API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{Ack, CreateExperimentRequest, UpdateExperimentRequest};
use crate::services::experiments;
use crate::services::storage::Storage;

/// Create an experiment with its initial sequences.
#[utoipa::path(
    post,
    path = "/api/v1/experiments",
    tag = "Experiments",
    request_body = CreateExperimentRequest,
    responses(
        (status = 201, description = "Experiment created", body = crate::models::ExperimentResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 409, description = "Experiment name already taken", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn create_experiment(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    body: web::Json<CreateExperimentRequest>,
) -> AppResult<HttpResponse> {
    let response = experiments::create(&pool, &auth.user, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

/// List experiments visible to the caller.
///
/// Admins and super admins see every experiment; other users see their own.
#[utoipa::path(
    get,
    path = "/api/v1/experiments",
    tag = "Experiments",
    responses(
        (status = 200, description = "Experiments", body = Vec<crate::models::ExperimentResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_experiments(auth: AuthUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let response = experiments::list(&pool, &auth.user).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Get one experiment with its sequences.
#[utoipa::path(
    get,
    path = "/api/v1/experiments/{experiment_id}",
    tag = "Experiments",
    params(("experiment_id" = i32, Path, description = "Experiment ID")),
    responses(
        (status = 200, description = "Experiment", body = crate::models::ExperimentResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Experiment not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_experiment(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let response = experiments::get(&pool, &auth.user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Get the status of an experiment.
#[utoipa::path(
    get,
    path = "/api/v1/experiments/{experiment_id}/status",
    tag = "Experiments",
    params(("experiment_id" = i32, Path, description = "Experiment ID")),
    responses(
        (status = 200, description = "Experiment status", body = crate::models::ExperimentStatusResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Experiment not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_experiment_status(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let response = experiments::get_status(&pool, &auth.user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Partially update an experiment and its sequence set.
#[utoipa::path(
    put,
    path = "/api/v1/experiments/{experiment_id}",
    tag = "Experiments",
    params(("experiment_id" = i32, Path, description = "Experiment ID")),
    request_body = UpdateExperimentRequest,
    responses(
        (status = 200, description = "Updated experiment", body = crate::models::ExperimentResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Experiment not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Experiment name already taken", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn update_experiment(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<UpdateExperimentRequest>,
) -> AppResult<HttpResponse> {
    let response =
        experiments::update(&pool, &auth.user, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Delete an experiment, its sequences and its stored result files.
#[utoipa::path(
    delete,
    path = "/api/v1/experiments/{experiment_id}",
    tag = "Experiments",
    params(("experiment_id" = i32, Path, description = "Experiment ID")),
    responses(
        (status = 200, description = "Experiment deleted", body = Ack),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Experiment not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_experiment(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    experiments::delete(&pool, &storage, &auth.user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Ack::new("Experiment deleted successfully".to_string())))
}

/// Configure experiment routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/experiments")
            .route(web::get().to(list_experiments))
            .route(web::post().to(create_experiment)),
    )
    .service(
        web::resource("/experiments/{experiment_id}")
            .route(web::get().to(get_experiment))
            .route(web::put().to(update_experiment))
            .route(web::delete().to(delete_experiment)),
    )
    .service(
        web::resource("/experiments/{experiment_id}/status")
            .route(web::get().to(get_experiment_status)),
    );
}
