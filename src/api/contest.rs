//! Contest submission API handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    ApiResponse, CheckSubmissionQuery, ExistingSubmission, LeaderboardQuery, LeaderboardResponse,
    SubmissionResponse, SubmitRequest,
};
use crate::services::contest;

/// Result of `check-submission`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionCheck {
    pub has_submission: bool,
    pub submission: Option<ExistingSubmission>,
}

/// Submit a storefront/interior pair to the contest.
///
/// Resubmitting replaces the user's previous entry.
#[utoipa::path(
    post,
    path = "/api/contest/submit",
    tag = "Contest",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission recorded", body = SubmissionResponse),
        (status = 400, description = "Missing or malformed fields", body = crate::error::ErrorResponse),
        (status = 403, description = "Invalid designs", body = crate::error::ErrorResponse),
    )
)]
pub async fn submit(
    pool: web::Data<DbPool>,
    body: web::Json<SubmitRequest>,
) -> AppResult<HttpResponse> {
    let submission = contest::submit(&pool, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Contest entry submitted successfully",
        submission,
    )))
}

/// Check whether the user already submitted this exact pair.
#[utoipa::path(
    get,
    path = "/api/contest/check-submission",
    tag = "Contest",
    params(CheckSubmissionQuery),
    responses(
        (status = 200, description = "Existing submission, if any", body = SubmissionCheck),
        (status = 400, description = "Missing or malformed parameters", body = crate::error::ErrorResponse),
    )
)]
pub async fn check_submission(
    pool: web::Data<DbPool>,
    query: web::Query<CheckSubmissionQuery>,
) -> AppResult<HttpResponse> {
    let submission = contest::check_existing(&pool, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(SubmissionCheck {
        has_submission: submission.is_some(),
        submission,
    })))
}

/// Most recent contest submissions.
#[utoipa::path(
    get,
    path = "/api/contest/leaderboard",
    tag = "Contest",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Recent submissions", body = LeaderboardResponse),
    )
)]
pub async fn leaderboard(
    pool: web::Data<DbPool>,
    query: web::Query<LeaderboardQuery>,
) -> AppResult<HttpResponse> {
    let board = contest::leaderboard(&pool, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(board)))
}

/// Public view of a submission by its code.
#[utoipa::path(
    get,
    path = "/api/contest/submission/{submissionId}",
    tag = "Contest",
    params(("submissionId" = String, Path, description = "Submission code")),
    responses(
        (status = 200, description = "Submission", body = SubmissionResponse),
        (status = 404, description = "Unknown code", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_submission(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let submission = contest::get_by_code(&pool, &path).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(submission)))
}

/// A user's submissions (zero or one).
#[utoipa::path(
    get,
    path = "/api/contest/submissions/{userId}",
    tag = "Contest",
    params(("userId" = Uuid, Path, description = "Participant id")),
    responses(
        (status = 200, description = "Submissions", body = Vec<SubmissionResponse>),
    )
)]
pub async fn user_submissions(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let submissions = contest::list_for_user(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(submissions)))
}

/// Configure contest routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/contest/submit").route(web::post().to(submit)))
        .service(
            web::resource("/contest/check-submission").route(web::get().to(check_submission)),
        )
        .service(web::resource("/contest/leaderboard").route(web::get().to(leaderboard)))
        .service(
            web::resource("/contest/submission/{submission_id}")
                .route(web::get().to(get_submission)),
        )
        .service(
            web::resource("/contest/submissions/{user_id}").route(web::get().to(user_submissions)),
        );
}
