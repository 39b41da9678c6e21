//! Network profile API handlers.

use actix_web::{HttpResponse, web};

use crate::auth::{AuthUser, require_minimum_role};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Ack, NetworkInput, NetworkResponse, Role};

async fn load_network(pool: &DbPool, id: i32) -> AppResult<crate::entity::network::Model> {
    pool.get_network_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Network {} not found", id)))
}

/// List network profiles.
#[utoipa::path(
    get,
    path = "/api/v1/networks",
    tag = "Networks",
    responses(
        (status = 200, description = "Network profiles", body = Vec<NetworkResponse>),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn list_networks(_auth: AuthUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let networks: Vec<NetworkResponse> = pool
        .list_networks()
        .await?
        .into_iter()
        .map(NetworkResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(networks))
}

/// Get one network profile.
#[utoipa::path(
    get,
    path = "/api/v1/networks/{network_id}",
    tag = "Networks",
    params(("network_id" = i32, Path, description = "Network ID")),
    responses(
        (status = 200, description = "Network profile", body = NetworkResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "Network not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn get_network(
    _auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let network = load_network(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(NetworkResponse::from(network)))
}

/// Create a network profile. Requires the admin role.
#[utoipa::path(
    post,
    path = "/api/v1/networks",
    tag = "Networks",
    request_body = NetworkInput,
    responses(
        (status = 201, description = "Network created", body = NetworkResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn create_network(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    body: web::Json<NetworkInput>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::Admin)?;
    let network = pool.insert_network(&body.into_inner()).await?;
    Ok(HttpResponse::Created().json(NetworkResponse::from(network)))
}

/// Replace a network profile. Requires the admin role.
#[utoipa::path(
    put,
    path = "/api/v1/networks/{network_id}",
    tag = "Networks",
    params(("network_id" = i32, Path, description = "Network ID")),
    request_body = NetworkInput,
    responses(
        (status = 200, description = "Network updated", body = NetworkResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
        (status = 404, description = "Network not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn update_network(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<NetworkInput>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::Admin)?;
    let current = load_network(&pool, path.into_inner()).await?;
    let updated = pool.update_network(current, &body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(NetworkResponse::from(updated)))
}

/// Delete a network profile. Requires the super admin role.
#[utoipa::path(
    delete,
    path = "/api/v1/networks/{network_id}",
    tag = "Networks",
    params(("network_id" = i32, Path, description = "Network ID")),
    responses(
        (status = 200, description = "Network deleted", body = Ack),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 403, description = "Insufficient role", body = crate::error::ErrorResponse),
        (status = 404, description = "Network not found", body = crate::error::ErrorResponse),
    ),
    security(("bearer_token" = []))
)]
pub async fn delete_network(
    auth: AuthUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    require_minimum_role(&auth.user, Role::SuperAdmin)?;
    let id = path.into_inner();
    load_network(&pool, id).await?;
    pool.delete_network(id).await?;
    Ok(HttpResponse::Ok().json(Ack::new("Network deleted successfully".to_string())))
}

/// Configure network routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/networks")
            .route(web::get().to(list_networks))
            .route(web::post().to(create_network)),
    )
    .service(
        web::resource("/networks/{network_id}")
            .route(web::get().to(get_network))
            .route(web::put().to(update_network))
            .route(web::delete().to(delete_network)),
    );
}
