//! Upload DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::upload;

/// Result of a successful photo upload.
///
/// `userId` is the authoritative server id; clients must use it for every
/// following call instead of any locally generated placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub upload_id: Uuid,
    pub user_id: Option<Uuid>,
    pub file_path: String,
    pub original_name: String,
    pub file_size: i64,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub upload_type: String,
    pub storefront_design_id: Option<Uuid>,
}

/// Upload as listed for a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub upload_id: Uuid,
    pub user_id: Option<Uuid>,
    pub original_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub upload_type: String,
    pub storefront_design_id: Option<Uuid>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<upload::Model> for UploadSummary {
    fn from(m: upload::Model) -> Self {
        Self {
            upload_id: m.id,
            user_id: m.user_id,
            original_name: m.original_name,
            file_path: m.stored_path,
            file_size: m.file_size,
            mime_type: m.mime_type,
            upload_type: m.upload_type,
            storefront_design_id: m.storefront_design_id,
            uploaded_at: m.created_at,
        }
    }
}

/// `?userId=` ownership parameter used by delete and detail endpoints.
#[derive(Debug, Clone, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Uuid,
}
