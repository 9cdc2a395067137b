//! Domain models and API DTOs.

use serde::{Deserialize, Serialize};

pub mod design;
pub mod design_type;
pub mod share;
pub mod submission;
pub mod upload;
pub mod user;

// Re-export commonly used types
pub use design::{
    DesignDetail, DesignGroup, DesignListQuery, DesignStats, DesignSummary, DesignTypeCount,
    GenerateRequest, GenerateResponse, GenerateSingleRequest, GenerationStatus,
    OptionalOwnerQuery, SelectDesignRequest, SelectDesignResponse,
};
pub use design_type::{DesignType, ProcessingStatus, SubmissionStatus, UploadType};
pub use share::{
    ContestEntryView, Participant, PlatformCount, ShareContent, ShareLeaderboard,
    ShareLeaderboardEntry, ShareLeaderboardQuery, ShareRequest, ShareResponse, ShareStats,
    SharingUrls, UserShare, UserSharesQuery,
};
pub use submission::{
    CheckSubmissionQuery, ExistingSubmission, LeaderboardEntry, LeaderboardQuery,
    LeaderboardResponse, SubmissionResponse, SubmitRequest, SubmittedDesign,
};
pub use upload::{OwnerQuery, UploadResponse, UploadSummary};
pub use user::{UserInfo, UserProfile};

/// Success envelope shared by every endpoint: `{success, message?, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}
