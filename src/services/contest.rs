//! Contest submission workflow.
//!
//! A user holds at most one live submission: submitting again overwrites the
//! existing entry in place with a fresh code and timestamp.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::db::submissions::NewSubmission;
use crate::entity::{contest_submission, generated_design};
use crate::error::{AppError, AppResult};
use crate::models::{
    CheckSubmissionQuery, DesignType, ExistingSubmission, LeaderboardEntry, LeaderboardQuery,
    LeaderboardResponse, SubmissionResponse, SubmissionStatus, SubmitRequest, SubmittedDesign,
};

/// Human-shareable submission code: `JK-<unix millis>-<8 upper hex>`.
pub fn generate_submission_code(now: DateTime<Utc>) -> String {
    format!(
        "JK-{}-{}",
        now.timestamp_millis(),
        hex::encode_upper(rand::random::<[u8; 4]>())
    )
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn canonical_tag(design_type: &str) -> String {
    DesignType::parse(design_type)
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| design_type.to_string())
}

fn submitted_design(id: Uuid, design: Option<&generated_design::Model>) -> SubmittedDesign {
    SubmittedDesign {
        design_id: id,
        design_type: design.map(|d| canonical_tag(&d.design_type)),
        filename: design.map(|d| d.filename.clone()),
        file_path: design.map(|d| d.stored_path.clone()),
    }
}

fn to_response(
    row: contest_submission::Model,
    designs: &HashMap<Uuid, generated_design::Model>,
) -> SubmissionResponse {
    SubmissionResponse {
        storefront_design: submitted_design(
            row.storefront_design_id,
            designs.get(&row.storefront_design_id),
        ),
        interior_design: submitted_design(
            row.interior_design_id,
            designs.get(&row.interior_design_id),
        ),
        submission_id: row.submission_id,
        user_id: row.user_id,
        dealership_name: row.dealership_name,
        sap_code: row.sap_code,
        mobile_number: row.mobile_number,
        status: row.status,
        submitted_at: row.submitted_at,
    }
}

async fn load_designs(
    db: &DbPool,
    rows: &[contest_submission::Model],
) -> AppResult<HashMap<Uuid, generated_design::Model>> {
    let ids: Vec<Uuid> = rows
        .iter()
        .flat_map(|r| [r.storefront_design_id, r.interior_design_id])
        .collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(db
        .get_designs_by_ids(ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect())
}

/// Submit (or resubmit) a storefront/interior pair.
///
/// A pair that is missing, owned by someone else, or carries the wrong
/// interior flag is rejected with one `Forbidden` error.
pub async fn submit(db: &DbPool, req: SubmitRequest) -> AppResult<SubmissionResponse> {
    let (storefront, interior) = db
        .verify_design_pair(req.storefront_design_id, req.interior_design_id, req.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Forbidden(
                "Invalid designs: both designs must belong to you, one storefront and one interior"
                    .to_string(),
            )
        })?;

    // Contact fields omitted from the request fall back to the stored profile.
    let user = db.get_user_by_id(req.user_id).await?;
    let dealership_name = clean(req.dealership_name)
        .or_else(|| user.as_ref().and_then(|u| u.dealership_name.clone()));
    let sap_code = clean(req.sap_code).or_else(|| user.as_ref().map(|u| u.sap_code.clone()));
    let mobile_number = clean(req.mobile_number)
        .or_else(|| user.as_ref().and_then(|u| u.mobile_number.clone()));

    let now = Utc::now();
    let row = db
        .upsert_submission(NewSubmission {
            user_id: req.user_id,
            storefront_design_id: storefront.id,
            interior_design_id: interior.id,
            dealership_name,
            sap_code,
            mobile_number,
            submission_id: generate_submission_code(now),
            submitted_at: now,
        })
        .await?;

    info!(
        user_id = %row.user_id,
        submission_id = %row.submission_id,
        storefront_design_id = %storefront.id,
        interior_design_id = %interior.id,
        "Contest submission recorded"
    );

    let designs = HashMap::from([(storefront.id, storefront), (interior.id, interior)]);
    Ok(to_response(row, &designs))
}

/// The user's submission for exactly this pair, if one exists.
pub async fn check_existing(
    db: &DbPool,
    query: &CheckSubmissionQuery,
) -> AppResult<Option<ExistingSubmission>> {
    Ok(db
        .find_submission_for_pair(
            query.user_id,
            query.storefront_design_id,
            query.interior_design_id,
        )
        .await?
        .map(ExistingSubmission::from))
}

/// Public view of a submission by its code. Contact details are withheld.
pub async fn get_by_code(db: &DbPool, code: &str) -> AppResult<SubmissionResponse> {
    let row = db
        .get_submission_by_code(code)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission".to_string()))?;

    let designs = load_designs(db, std::slice::from_ref(&row)).await?;
    let mut response = to_response(row, &designs);
    response.mobile_number = None;
    Ok(response)
}

/// A user's submissions: zero or one entries.
pub async fn list_for_user(db: &DbPool, user_id: Uuid) -> AppResult<Vec<SubmissionResponse>> {
    let rows: Vec<_> = db.get_submission_for_user(user_id).await?.into_iter().collect();
    let designs = load_designs(db, &rows).await?;
    Ok(rows.into_iter().map(|r| to_response(r, &designs)).collect())
}

/// Most recent submissions, newest first.
pub async fn leaderboard(db: &DbPool, query: &LeaderboardQuery) -> AppResult<LeaderboardResponse> {
    let status = query
        .status
        .as_deref()
        .unwrap_or(SubmissionStatus::Submitted.as_str());
    let rows = db.list_submissions(status, query.clamped_limit()).await?;
    let designs = load_designs(db, &rows).await?;

    let submissions: Vec<LeaderboardEntry> = rows
        .into_iter()
        .map(|r| LeaderboardEntry {
            storefront_design_type: designs
                .get(&r.storefront_design_id)
                .map(|d| canonical_tag(&d.design_type)),
            interior_design_type: designs
                .get(&r.interior_design_id)
                .map(|d| canonical_tag(&d.design_type)),
            submission_id: r.submission_id,
            dealership_name: r.dealership_name,
            sap_code: r.sap_code,
            status: r.status,
            submitted_at: r.submitted_at,
        })
        .collect();

    Ok(LeaderboardResponse {
        total_submissions: submissions.len(),
        submissions,
    })
}
