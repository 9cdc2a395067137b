//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Facade Contest Server",
        version = "0.1.0",
        description = "API server for shop photo uploads, AI facade and interior designs, contest entries and social sharing"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Upload endpoints
        api::uploads::upload_storefront,
        api::uploads::upload_interior,
        api::uploads::list_uploads,
        api::uploads::delete_upload,
        // Generation endpoints
        api::generate::generate,
        api::generate::generate_interior,
        api::generate::generate_single,
        api::generate::generation_status,
        // Design endpoints
        api::designs::list_designs,
        api::designs::design_detail,
        api::designs::design_stats,
        api::designs::select_design,
        api::designs::delete_design,
        // Contest endpoints
        api::contest::submit,
        api::contest::check_submission,
        api::contest::leaderboard,
        api::contest::get_submission,
        api::contest::user_submissions,
        // Share endpoints
        api::share::log_share,
        api::share::contest_entry,
        api::share::user_shares,
        api::share::leaderboard,
        api::share::stats,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Uploads
            models::UserInfo,
            models::UploadResponse,
            models::UploadSummary,
            // Designs
            models::DesignType,
            models::UploadType,
            models::ProcessingStatus,
            models::GenerateRequest,
            models::GenerateSingleRequest,
            models::GenerateResponse,
            models::GenerationStatus,
            models::DesignSummary,
            models::DesignGroup,
            models::DesignDetail,
            models::DesignTypeCount,
            models::DesignStats,
            models::SelectDesignRequest,
            models::SelectDesignResponse,
            // Contest
            models::SubmissionStatus,
            models::SubmitRequest,
            models::SubmittedDesign,
            models::SubmissionResponse,
            models::ExistingSubmission,
            models::LeaderboardEntry,
            models::LeaderboardResponse,
            api::contest::SubmissionCheck,
            // Share
            models::ShareRequest,
            models::ShareContent,
            models::SharingUrls,
            models::ShareResponse,
            models::Participant,
            models::ContestEntryView,
            models::UserShare,
            models::ShareLeaderboardEntry,
            models::ShareLeaderboard,
            models::PlatformCount,
            models::ShareStats,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Uploads", description = "Storefront and interior photo uploads"),
        (name = "Generation", description = "Design generation"),
        (name = "Designs", description = "Design gallery"),
        (name = "Contest", description = "Contest submissions"),
        (name = "Share", description = "Social sharing and contest links")
    )
)]
pub struct ApiDoc;
