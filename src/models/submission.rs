//! Contest submission DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::contest_submission;

/// Body for `POST /contest/submit`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub user_id: Uuid,
    pub storefront_design_id: Uuid,
    pub interior_design_id: Uuid,
    #[serde(default)]
    pub dealership_name: Option<String>,
    #[serde(default)]
    pub sap_code: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// Query for `GET /contest/check-submission`.
#[derive(Debug, Clone, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CheckSubmissionQuery {
    pub user_id: Uuid,
    pub storefront_design_id: Uuid,
    pub interior_design_id: Uuid,
}

/// Query for `GET /contest/leaderboard`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaderboardQuery {
    /// Maximum entries (default 50, capped at 500)
    pub limit: Option<u64>,
    /// Submission status filter (default "submitted")
    pub status: Option<String>,
}

impl LeaderboardQuery {
    pub fn clamped_limit(&self) -> u64 {
        self.limit.unwrap_or(50).clamp(1, 500)
    }
}

/// Compact reference to one of the two designs in an entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedDesign {
    pub design_id: Uuid,
    pub design_type: Option<String>,
    pub filename: Option<String>,
    pub file_path: Option<String>,
}

/// Full contest entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: String,
    pub user_id: Uuid,
    pub dealership_name: Option<String>,
    pub sap_code: Option<String>,
    pub mobile_number: Option<String>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub storefront_design: SubmittedDesign,
    pub interior_design: SubmittedDesign,
}

/// Existing entry for a given pair, as seen by `check-submission`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSubmission {
    pub submission_id: String,
    pub submitted_at: DateTime<Utc>,
    pub dealership_name: Option<String>,
    pub sap_code: Option<String>,
    pub mobile_number: Option<String>,
}

impl From<contest_submission::Model> for ExistingSubmission {
    fn from(m: contest_submission::Model) -> Self {
        Self {
            submission_id: m.submission_id,
            submitted_at: m.submitted_at,
            dealership_name: m.dealership_name,
            sap_code: m.sap_code,
            mobile_number: m.mobile_number,
        }
    }
}

/// Leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub submission_id: String,
    pub dealership_name: Option<String>,
    pub sap_code: Option<String>,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub storefront_design_type: Option<String>,
    pub interior_design_type: Option<String>,
}

/// `GET /contest/leaderboard` payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub total_submissions: usize,
    pub submissions: Vec<LeaderboardEntry>,
}
