//! Liveness and readiness probes.
//!
//! `/health` answers as long as the process serves requests. `/ready` also
//! touches the database and the asset backend, since uploads need both.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::services::Orchestrator;

/// Liveness payload.
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
}

/// Per-dependency readiness.
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    storage: &'static str,
}

fn probe_label(ok: bool) -> &'static str {
    if ok { "connected" } else { "unavailable" }
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is up", body = HealthResponse)
    )
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 200 when both the database and the asset store answer, else 503.
#[utoipa::path(
    get,
    path = "/api/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Ready to accept uploads", body = ReadyResponse),
        (status = 503, description = "A dependency is down", body = ReadyResponse)
    )
)]
pub async fn ready(
    pool: web::Data<DbPool>,
    orchestrator: web::Data<Orchestrator>,
) -> HttpResponse {
    let database = pool.ping().await;
    if let Err(ref e) = database {
        warn!(error = %e, "Database readiness probe failed");
    }
    let storage = orchestrator.check_storage().await;
    if let Err(ref e) = storage {
        warn!(error = %e, "Storage readiness probe failed");
    }

    let body = ReadyResponse {
        status: if database.is_ok() && storage.is_ok() {
            "ready"
        } else {
            "not_ready"
        },
        database: probe_label(database.is_ok()),
        storage: probe_label(storage.is_ok()),
    };

    if database.is_ok() && storage.is_ok() {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/ready").route(web::get().to(ready)));
}
