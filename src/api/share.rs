//! Social share API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    ApiResponse, ContestEntryView, ShareLeaderboard, ShareLeaderboardQuery, ShareRequest,
    ShareResponse, ShareStats, UserShare, UserSharesQuery,
};
use crate::services::{ContestSite, sharing};

/// Log a share and return the contest link with per-platform share URLs.
#[utoipa::path(
    post,
    path = "/api/share",
    tag = "Share",
    request_body = ShareRequest,
    responses(
        (status = 200, description = "Share logged", body = ShareResponse),
        (status = 400, description = "Missing or malformed fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Design not found for this user", body = crate::error::ErrorResponse),
    )
)]
pub async fn log_share(
    pool: web::Data<DbPool>,
    site: web::Data<ContestSite>,
    body: web::Json<ShareRequest>,
) -> AppResult<HttpResponse> {
    let share = sharing::log_share(&pool, &site, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Share logged successfully",
        share,
    )))
}

/// Public view of a shared contest entry.
#[utoipa::path(
    get,
    path = "/api/share/contest/{shareCode}",
    tag = "Share",
    params(("shareCode" = String, Path, description = "Share code")),
    responses(
        (status = 200, description = "Contest entry", body = ContestEntryView),
        (status = 404, description = "Unknown share code", body = crate::error::ErrorResponse),
    )
)]
pub async fn contest_entry(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let entry = sharing::contest_entry(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(entry)))
}

/// A user's shares, newest first.
#[utoipa::path(
    get,
    path = "/api/share/user/{userId}",
    tag = "Share",
    params(
        ("userId" = Uuid, Path, description = "Participant id"),
        UserSharesQuery,
    ),
    responses(
        (status = 200, description = "Shares", body = Vec<UserShare>),
    )
)]
pub async fn user_shares(
    pool: web::Data<DbPool>,
    site: web::Data<ContestSite>,
    path: web::Path<Uuid>,
    query: web::Query<UserSharesQuery>,
) -> AppResult<HttpResponse> {
    let shares = sharing::user_shares(&pool, &site, path.into_inner(), &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(shares)))
}

/// Participants ranked by contest-entry share count.
#[utoipa::path(
    get,
    path = "/api/share/leaderboard",
    tag = "Share",
    params(ShareLeaderboardQuery),
    responses(
        (status = 200, description = "Share leaderboard", body = ShareLeaderboard),
    )
)]
pub async fn leaderboard(
    pool: web::Data<DbPool>,
    query: web::Query<ShareLeaderboardQuery>,
) -> AppResult<HttpResponse> {
    let board = sharing::leaderboard(&pool, query.limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(board)))
}

/// Overall sharing statistics.
#[utoipa::path(
    get,
    path = "/api/share/stats",
    tag = "Share",
    responses(
        (status = 200, description = "Share statistics", body = ShareStats),
    )
)]
pub async fn stats(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let stats = sharing::stats(&pool).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

/// Configure share routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/share").route(web::post().to(log_share)))
        .service(web::resource("/share/contest/{share_code}").route(web::get().to(contest_entry)))
        .service(web::resource("/share/user/{user_id}").route(web::get().to(user_shares)))
        .service(web::resource("/share/leaderboard").route(web::get().to(leaderboard)))
        .service(web::resource("/share/stats").route(web::get().to(stats)));
}
