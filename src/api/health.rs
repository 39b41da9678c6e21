//! Liveness and readiness probes.
//!
//! `/health` answers as long as the process runs. `/ready` verifies the two
//! dependencies every request path needs: the Postgres connection and the
//! uploads root that result files and videos are written under.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::Config;
use crate::db::DbPool;

/// Liveness probe response.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Readiness probe response, one marker per checked dependency.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    storage: &'static str,
}

/// Liveness probe: 200 whenever the process is up.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness probe: 200 once the database answers and the uploads root exists.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service can take traffic", body = ReadyResponse),
        (status = 503, description = "A dependency is unavailable", body = ReadyResponse)
    )
)]
#[get("/ready")]
pub async fn ready(pool: web::Data<DbPool>, config: web::Data<Config>) -> HttpResponse {
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    let database_ok = pool.connection().query_one_raw(stmt).await.is_ok();

    let storage_ok = tokio::fs::try_exists(&config.uploads_dir)
        .await
        .unwrap_or(false);

    let response = ReadyResponse {
        status: if database_ok && storage_ok {
            "ready"
        } else {
            "not_ready"
        },
        database: if database_ok { "connected" } else { "unavailable" },
        storage: if storage_ok { "available" } else { "missing" },
    };

    if database_ok && storage_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_rt::test]
    async fn test_health_reports_running() {
        let app = test::init_service(App::new().service(health)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }
}
