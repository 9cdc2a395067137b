//! Share log DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::design::DesignSummary;
use super::upload::UploadSummary;

/// Body for `POST /share`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub user_id: Uuid,
    pub design_id: Uuid,
    /// Free-form platform tag; "unknown" when omitted
    #[serde(default)]
    pub platform: Option<String>,
}

/// Pre-built per-platform share URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SharingUrls {
    pub facebook: String,
    pub twitter: String,
    pub whatsapp: String,
    pub linkedin: String,
    pub telegram: String,
}

/// Message content the links are built from.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub title: String,
    pub text: String,
    pub url: String,
    pub hashtags: Vec<String>,
}

/// Result of logging a share.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub share_id: Uuid,
    pub share_code: String,
    pub contest_url: String,
    pub share_content: ShareContent,
    pub sharing_urls: SharingUrls,
    pub design: DesignSummary,
}

/// Public participant fields (no contact details).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub dealership_name: Option<String>,
}

/// Public view of a shared contest entry, addressed by share code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContestEntryView {
    pub share_code: String,
    pub platform: String,
    pub shared_at: DateTime<Utc>,
    pub is_contest_entry: bool,
    pub design: DesignSummary,
    pub original_image: Option<UploadSummary>,
    pub participant: Participant,
}

/// Query for `GET /share/user/{userId}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct UserSharesQuery {
    pub platform: Option<String>,
    #[serde(default)]
    pub contest_only: bool,
}

/// One of a user's shares.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserShare {
    pub share_id: Uuid,
    pub share_code: String,
    pub design_id: Uuid,
    pub platform: String,
    pub shared_at: DateTime<Utc>,
    pub is_contest_entry: bool,
    pub design_type: Option<String>,
    pub file_path: Option<String>,
    pub contest_url: String,
}

/// Query for `GET /share/leaderboard`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShareLeaderboardQuery {
    pub limit: Option<usize>,
}

/// Aggregated share activity for one participant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLeaderboardEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub dealership_name: Option<String>,
    pub total_shares: u64,
    pub unique_designs: u64,
    pub platforms_used: u64,
    pub latest_share: DateTime<Utc>,
}

/// `GET /share/leaderboard` payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareLeaderboard {
    pub leaderboard: Vec<ShareLeaderboardEntry>,
    pub total_participants: usize,
}

/// Count of contest shares on one platform.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCount {
    pub platform: String,
    pub count: u64,
}

/// `GET /share/stats` payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareStats {
    pub total_shares: u64,
    pub unique_users: u64,
    pub unique_designs: u64,
    pub shares_by_platform: Vec<PlatformCount>,
}
