//! Design gallery API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    ApiResponse, DesignDetail, DesignGroup, DesignListQuery, DesignStats, OwnerQuery,
    SelectDesignRequest, SelectDesignResponse,
};
use crate::services::{Orchestrator, gallery};

/// List a user's designs grouped by upload.
#[utoipa::path(
    get,
    path = "/api/designs/{userId}",
    tag = "Designs",
    params(
        ("userId" = Uuid, Path, description = "Participant id"),
        DesignListQuery,
    ),
    responses(
        (status = 200, description = "Designs grouped by upload", body = Vec<DesignGroup>),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_designs(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    query: web::Query<DesignListQuery>,
) -> AppResult<HttpResponse> {
    let groups = gallery::list_designs(&pool, path.into_inner(), &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(groups)))
}

/// Get one of the user's designs with its original photo.
#[utoipa::path(
    get,
    path = "/api/designs/detail/{designId}",
    tag = "Designs",
    params(
        ("designId" = Uuid, Path, description = "Design id"),
        OwnerQuery,
    ),
    responses(
        (status = 200, description = "Design detail", body = DesignDetail),
        (status = 404, description = "Design not found for this user", body = crate::error::ErrorResponse),
    )
)]
pub async fn design_detail(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    query: web::Query<OwnerQuery>,
) -> AppResult<HttpResponse> {
    let detail = gallery::design_detail(&pool, path.into_inner(), query.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(detail)))
}

/// Upload and design totals for a user.
#[utoipa::path(
    get,
    path = "/api/designs/stats/{userId}",
    tag = "Designs",
    params(("userId" = Uuid, Path, description = "Participant id")),
    responses(
        (status = 200, description = "Design statistics", body = DesignStats),
    )
)]
pub async fn design_stats(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let stats = gallery::design_stats(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

/// Mark one of the user's designs as selected.
///
/// Selection is kept by the client; the server verifies ownership only.
#[utoipa::path(
    put,
    path = "/api/designs/{designId}/select",
    tag = "Designs",
    params(("designId" = Uuid, Path, description = "Design id")),
    request_body = SelectDesignRequest,
    responses(
        (status = 200, description = "Selection acknowledged", body = SelectDesignResponse),
        (status = 404, description = "Design not found for this user", body = crate::error::ErrorResponse),
    )
)]
pub async fn select_design(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<SelectDesignRequest>,
) -> AppResult<HttpResponse> {
    let selected = gallery::select_design(&pool, path.into_inner(), body.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Design selected successfully",
        selected,
    )))
}

/// Delete one of the user's designs and its file. Interior uploads and
/// designs built on a storefront design are deleted with it.
#[utoipa::path(
    delete,
    path = "/api/designs/{designId}",
    tag = "Designs",
    params(
        ("designId" = Uuid, Path, description = "Design id"),
        OwnerQuery,
    ),
    responses(
        (status = 200, description = "Design deleted"),
        (status = 404, description = "Design not found for this user", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_design(
    orchestrator: web::Data<Orchestrator>,
    path: web::Path<Uuid>,
    query: web::Query<OwnerQuery>,
) -> AppResult<HttpResponse> {
    let design_id = path.into_inner();
    let deleted_designs = orchestrator.delete_design(design_id, query.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Design deleted successfully",
        serde_json::json!({ "designId": design_id, "deletedDesigns": deleted_designs }),
    )))
}

/// Configure design routes. Fixed segments are registered before `{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/designs/detail/{design_id}").route(web::get().to(design_detail)))
        .service(web::resource("/designs/stats/{user_id}").route(web::get().to(design_stats)))
        .service(
            web::resource("/designs/interior/{design_id}/select")
                .route(web::put().to(select_design)),
        )
        .service(web::resource("/designs/{design_id}/select").route(web::put().to(select_design)))
        // GET takes a user id, DELETE a design id
        .service(
            web::resource("/designs/{id}")
                .route(web::get().to(list_designs))
                .route(web::delete().to(delete_design)),
        );
}
