//! Generated design DTOs and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::design_type::DesignType;
use super::upload::UploadSummary;
use crate::entity::generated_design;

/// Request body for `POST /generate` and `POST /generate/interior`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub upload_id: Uuid,
    /// Required when the upload has an owner
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Styles to produce; all four when omitted or empty
    #[serde(default)]
    pub design_types: Option<Vec<DesignType>>,
}

impl GenerateRequest {
    /// Requested styles, deduplicated, defaulting to every style.
    pub fn styles(&self) -> Vec<DesignType> {
        let mut styles: Vec<DesignType> = Vec::new();
        for t in self.design_types.iter().flatten() {
            if !styles.contains(t) {
                styles.push(*t);
            }
        }
        if styles.is_empty() {
            DesignType::ALL.to_vec()
        } else {
            styles
        }
    }
}

/// Request body for `POST /generate/single`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSingleRequest {
    pub upload_id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub design_type: DesignType,
}

/// One design variant as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignSummary {
    pub design_id: Uuid,
    pub upload_id: Uuid,
    pub user_id: Option<Uuid>,
    pub design_type: String,
    pub design_label: Option<String>,
    pub filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub prompt: Option<String>,
    pub processing_status: String,
    pub is_interior: bool,
    pub storefront_design_id: Option<Uuid>,
    pub generated_at: DateTime<Utc>,
}

impl From<generated_design::Model> for DesignSummary {
    fn from(m: generated_design::Model) -> Self {
        // Stored tags may predate the canonical naming.
        let parsed = DesignType::parse(&m.design_type);
        Self {
            design_id: m.id,
            upload_id: m.upload_id,
            user_id: m.user_id,
            design_type: parsed
                .map(|t| t.as_str().to_string())
                .unwrap_or(m.design_type),
            design_label: parsed.map(|t| t.label().to_string()),
            filename: m.filename,
            file_path: m.stored_path,
            file_size: m.file_size,
            width: m.width,
            height: m.height,
            prompt: m.ai_prompt,
            processing_status: m.processing_status,
            is_interior: m.is_interior,
            storefront_design_id: m.storefront_design_id,
            generated_at: m.created_at,
        }
    }
}

/// Response of the generation endpoints (completed styles only).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub upload_id: Uuid,
    pub user_id: Option<Uuid>,
    pub original_image: String,
    pub generated_designs: Vec<DesignSummary>,
}

/// Filters for `GET /designs/{userId}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct DesignListQuery {
    pub upload_id: Option<Uuid>,
    pub design_type: Option<DesignType>,
    pub is_interior: Option<bool>,
}

/// Designs of one upload, as grouped by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignGroup {
    pub upload_id: Uuid,
    pub original_image: Option<UploadSummary>,
    pub designs: Vec<DesignSummary>,
}

/// Single design with its source photo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignDetail {
    pub design: DesignSummary,
    pub original_image: Option<UploadSummary>,
}

/// Count of designs for one style.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignTypeCount {
    pub design_type: String,
    pub count: u64,
}

/// Per-user design statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DesignStats {
    pub total_designs: u64,
    pub total_uploads: u64,
    pub storefront_designs: u64,
    pub interior_designs: u64,
    pub designs_by_type: Vec<DesignTypeCount>,
}

/// Body for `PUT /designs/{designId}/select`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectDesignRequest {
    pub user_id: Uuid,
}

/// Acknowledged selection. Selection lives on the client; nothing is stored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectDesignResponse {
    pub design_id: Uuid,
    pub design_type: String,
    pub is_interior: bool,
    pub selected: bool,
}

/// Progress of generation for one upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatus {
    pub upload_id: Uuid,
    pub user_id: Option<Uuid>,
    pub is_complete: bool,
    pub total_designs: u32,
    pub completed_designs: u32,
    pub designs: Vec<DesignSummary>,
}

/// Optional `?userId=` for endpoints that also serve anonymous uploads.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct OptionalOwnerQuery {
    pub user_id: Option<Uuid>,
}
