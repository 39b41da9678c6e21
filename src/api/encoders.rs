//! Encoder catalog API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::{AuthUser, require_minimum_role};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Ack, EncoderInput, EncoderResponse, Role};

async fn load_encoder(pool: &DbPool, id: i32) -> AppResult<crate::entity::encoder::Model> {
    pool.get_encoder_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Encoder {} not found", id)))
}

/// List encoder catalog entries.
#[utoipa::path(
    get,
    path = "/api/v1/encoders",
    tag = "Encoders",
    responses(
        (status = 200, description = "Encoders", body = Vec<EncoderResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_encoders(_auth: AuthUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let encoders: Vec<EncoderResponse> = pool
        .list_encoders()
        .await?
        .into_iter()
        .map(EncoderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(encoders))
}

/// Get one encoder entry.
#[utoipa::path(
    get,
    path = "/api/v1/encoders/{encoder_id}",
    tag = "Encoders",
    params(("encoder_id" = i32, Path, description = "Encoder ID")),
    responses(
        (status = 200, description = "Encoder", body = EncoderResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Encoder not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_encoder(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let encoder = load_encoder(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(EncoderResponse::from(encoder)))
}

/// Register an encoder. Requires the admin role.
#[utoipa::path(
    post,
    path = "/api/v1/encoders",
    tag = "Encoders",
    request_body = EncoderInput,
    responses(
        (status = 201, description = "Encoder created", body = EncoderResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
        (status = 409, description = "Encoder name already taken", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn create_encoder(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    body: web::Json<EncoderInput>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::Admin)?;
    let encoder = pool.insert_encoder(&body.into_inner()).await?;
    Ok(HttpResponse::Created().json(EncoderResponse::from(encoder)))
}

/// Replace an encoder entry. Requires the admin role.
#[utoipa::path(
    put,
    path = "/api/v1/encoders/{encoder_id}",
    tag = "Encoders",
    params(("encoder_id" = i32, Path, description = "Encoder ID")),
    request_body = EncoderInput,
    responses(
        (status = 200, description = "Encoder updated", body = EncoderResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
        (status = 404, description = "Encoder not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Encoder name already taken", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn update_encoder(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<EncoderInput>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::Admin)?;
    let current = load_encoder(&pool, path.into_inner()).await?;
    let updated = pool.update_encoder(current, &body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(EncoderResponse::from(updated)))
}

/// Delete an encoder entry. Requires the admin role.
#[utoipa::path(
    delete,
    path = "/api/v1/encoders/{encoder_id}",
    tag = "Encoders",
    params(("encoder_id" = i32, Path, description = "Encoder ID")),
    responses(
        (status = 200, description = "Encoder deleted", body = Ack),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
        (status = 404, description = "Encoder not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_encoder(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::Admin)?;
    let id = path.into_inner();
    load_encoder(&pool, id).await?;
    pool.delete_encoder(id).await?;
    Ok(HttpResponse::Ok().json(Ack::new("Encoder deleted successfully".to_string())))
}

/// Configure encoder routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/encoders")
            .route(web::get().to(list_encoders))
            .route(web::post().to(create_encoder)),
    )
    .service(
        web::resource("/encoders/{encoder_id}")
            .route(web::get().to(get_encoder))
            .route(web::put().to(update_encoder))
            .route(web::delete().to(delete_encoder)),
    );
}
