//! Database operations for uploaded photos.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::generated_design::{self, Entity as GeneratedDesign};
use crate::entity::upload::{self, ActiveModel, Entity as Upload};
use crate::error::{AppError, AppResult};
use crate::models::UploadType;

use super::DbPool;
use super::designs::RemovedRows;

/// Fields for a new upload row.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub user_id: Option<Uuid>,
    pub original_name: String,
    pub stored_filename: String,
    pub stored_path: String,
    pub storage_key: String,
    pub file_size: i64,
    pub mime_type: String,
    pub upload_type: UploadType,
    pub storefront_design_id: Option<Uuid>,
}

impl DbPool {
    /// Insert an upload row.
    pub async fn insert_upload(&self, new: NewUpload) -> AppResult<upload::Model> {
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(new.user_id),
            original_name: Set(new.original_name),
            stored_filename: Set(new.stored_filename),
            stored_path: Set(new.stored_path),
            storage_key: Set(new.storage_key),
            file_size: Set(new.file_size),
            mime_type: Set(new.mime_type),
            upload_type: Set(new.upload_type.as_str().to_string()),
            storefront_design_id: Set(new.storefront_design_id),
            created_at: Set(Utc::now()),
        };

        // Constraint violations surface as Conflict / NotFound.
        Ok(model.insert(self.connection()).await?)
    }

    /// Get an upload by ID.
    pub async fn get_upload(&self, id: Uuid) -> AppResult<Option<upload::Model>> {
        Upload::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get upload: {}", e)))
    }

    /// List a user's uploads, newest first.
    pub async fn list_uploads_for_user(&self, user_id: Uuid) -> AppResult<Vec<upload::Model>> {
        Upload::find()
            .filter(upload::Column::UserId.eq(user_id))
            .order_by_desc(upload::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list uploads: {}", e)))
    }

    /// Get uploads by IDs (used to attach originals to design listings).
    pub async fn get_uploads_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<upload::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Upload::find()
            .filter(upload::Column::Id.is_in(ids))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get uploads: {}", e)))
    }

    /// Delete an upload owned by `user_id`. Its designs go with it through the
    /// cascade, as do interior uploads built on any of its storefront designs.
    /// Every removed row is returned so the caller can remove the assets.
    pub async fn delete_upload_for_user(
        &self,
        upload_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<(upload::Model, RemovedRows)> {
        let upload = Upload::find_by_id(upload_id)
            .filter(upload::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get upload: {}", e)))?
            .ok_or_else(|| AppError::NotFound("Upload".to_string()))?;

        let designs = GeneratedDesign::find()
            .filter(generated_design::Column::UploadId.eq(upload_id))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list upload designs: {}", e)))?;

        let storefront_ids = designs
            .iter()
            .filter(|d| !d.is_interior)
            .map(|d| d.id)
            .collect();
        let dependents = self.delete_interior_dependents(storefront_ids).await?;

        Upload::delete_by_id(upload_id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete upload: {}", e)))?;

        let mut removed = RemovedRows {
            uploads: dependents.uploads,
            designs,
        };
        removed.designs.extend(dependents.designs);
        Ok((upload, removed))
    }
}
