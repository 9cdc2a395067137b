//! Database operations for generated designs.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::generated_design::{self, ActiveModel, Entity as GeneratedDesign};
use crate::entity::upload::{self, Entity as Upload};
use crate::error::{AppError, AppResult};
use crate::models::{DesignListQuery, DesignType, ProcessingStatus};

use super::DbPool;

/// Fields for a new design row.
#[derive(Debug, Clone)]
pub struct NewDesign {
    pub upload_id: Uuid,
    pub user_id: Option<Uuid>,
    pub design_type: DesignType,
    pub filename: String,
    pub stored_path: String,
    pub storage_key: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub ai_prompt: String,
    pub is_interior: bool,
    pub storefront_design_id: Option<Uuid>,
}

/// Rows removed by a delete, returned so the caller can remove their assets.
#[derive(Debug, Default)]
pub struct RemovedRows {
    pub uploads: Vec<upload::Model>,
    pub designs: Vec<generated_design::Model>,
}

impl DbPool {
    /// Insert a completed design row.
    pub async fn insert_design(&self, new: NewDesign) -> AppResult<generated_design::Model> {
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            upload_id: Set(new.upload_id),
            user_id: Set(new.user_id),
            design_type: Set(new.design_type.as_str().to_string()),
            filename: Set(new.filename),
            stored_path: Set(new.stored_path),
            storage_key: Set(new.storage_key),
            file_size: Set(new.file_size),
            width: Set(new.width),
            height: Set(new.height),
            ai_prompt: Set(Some(new.ai_prompt)),
            processing_status: Set(ProcessingStatus::Completed.as_str().to_string()),
            is_interior: Set(new.is_interior),
            storefront_design_id: Set(new.storefront_design_id),
            created_at: Set(Utc::now()),
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Get a design by ID without an ownership check (public views only).
    pub async fn get_design(&self, id: Uuid) -> AppResult<Option<generated_design::Model>> {
        GeneratedDesign::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get design: {}", e)))
    }

    /// Get a design only if it belongs to `user_id`.
    pub async fn get_design_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<generated_design::Model>> {
        GeneratedDesign::find_by_id(id)
            .filter(generated_design::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get design: {}", e)))
    }

    /// Get designs by IDs.
    pub async fn get_designs_by_ids(
        &self,
        ids: Vec<Uuid>,
    ) -> AppResult<Vec<generated_design::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        GeneratedDesign::find()
            .filter(generated_design::Column::Id.is_in(ids))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get designs: {}", e)))
    }

    /// List a user's designs, newest first, with optional filters.
    pub async fn list_designs_for_user(
        &self,
        user_id: Uuid,
        query: &DesignListQuery,
    ) -> AppResult<Vec<generated_design::Model>> {
        let mut select =
            GeneratedDesign::find().filter(generated_design::Column::UserId.eq(user_id));

        if let Some(upload_id) = query.upload_id {
            select = select.filter(generated_design::Column::UploadId.eq(upload_id));
        }

        if let Some(design_type) = query.design_type {
            select = select
                .filter(generated_design::Column::DesignType.is_in(design_type.stored_tags()));
        }

        if let Some(is_interior) = query.is_interior {
            select = select.filter(generated_design::Column::IsInterior.eq(is_interior));
        }

        select
            .order_by_desc(generated_design::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list designs: {}", e)))
    }

    /// List every design generated from one upload.
    pub async fn list_designs_for_upload(
        &self,
        upload_id: Uuid,
    ) -> AppResult<Vec<generated_design::Model>> {
        GeneratedDesign::find()
            .filter(generated_design::Column::UploadId.eq(upload_id))
            .order_by_asc(generated_design::Column::CreatedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list upload designs: {}", e)))
    }

    /// Get a storefront (non-interior) design owned by `user_id`.
    pub async fn get_storefront_design_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<generated_design::Model>> {
        GeneratedDesign::find_by_id(id)
            .filter(generated_design::Column::UserId.eq(user_id))
            .filter(generated_design::Column::IsInterior.eq(false))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get storefront design: {}", e)))
    }

    /// Resolve a (storefront, interior) pair owned by `user_id` in one query.
    ///
    /// Returns `None` when either design is missing, belongs to someone else,
    /// or carries the wrong interior flag. Callers do not distinguish these.
    pub async fn verify_design_pair(
        &self,
        storefront_id: Uuid,
        interior_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<(generated_design::Model, generated_design::Model)>> {
        if storefront_id == interior_id {
            return Ok(None);
        }

        let rows = GeneratedDesign::find()
            .filter(generated_design::Column::Id.is_in([storefront_id, interior_id]))
            .filter(generated_design::Column::UserId.eq(user_id))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to verify design pair: {}", e)))?;

        let storefront = rows
            .iter()
            .find(|d| d.id == storefront_id && !d.is_interior)
            .cloned();
        let interior = rows
            .iter()
            .find(|d| d.id == interior_id && d.is_interior)
            .cloned();

        Ok(storefront.zip(interior))
    }

    /// Delete a design owned by `user_id`. A storefront design takes its
    /// interior uploads and their designs with it. The target design is
    /// always the first entry of `designs`.
    pub async fn delete_design_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<RemovedRows> {
        let design = self
            .get_design_for_user(id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Design".to_string()))?;

        let dependents = if design.is_interior {
            RemovedRows::default()
        } else {
            self.delete_interior_dependents(vec![design.id]).await?
        };

        GeneratedDesign::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete design: {}", e)))?;

        let mut designs = vec![design];
        designs.extend(dependents.designs);
        Ok(RemovedRows {
            uploads: dependents.uploads,
            designs,
        })
    }

    /// Delete every interior upload and design that hangs off one of
    /// `storefront_ids`. Interior designs never have dependents of their own.
    pub(crate) async fn delete_interior_dependents(
        &self,
        storefront_ids: Vec<Uuid>,
    ) -> AppResult<RemovedRows> {
        if storefront_ids.is_empty() {
            return Ok(RemovedRows::default());
        }

        let uploads = Upload::find()
            .filter(upload::Column::StorefrontDesignId.is_in(storefront_ids.clone()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list interior uploads: {}", e)))?;
        let upload_ids: Vec<Uuid> = uploads.iter().map(|u| u.id).collect();

        let designs = GeneratedDesign::find()
            .filter(
                Condition::any()
                    .add(generated_design::Column::StorefrontDesignId.is_in(storefront_ids))
                    .add(generated_design::Column::UploadId.is_in(upload_ids.clone())),
            )
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list interior designs: {}", e)))?;

        if !designs.is_empty() {
            GeneratedDesign::delete_many()
                .filter(generated_design::Column::Id.is_in(designs.iter().map(|d| d.id)))
                .exec(self.connection())
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to delete interior designs: {}", e))
                })?;
        }

        if !upload_ids.is_empty() {
            Upload::delete_many()
                .filter(upload::Column::Id.is_in(upload_ids))
                .exec(self.connection())
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to delete interior uploads: {}", e))
                })?;
        }

        Ok(RemovedRows { uploads, designs })
    }
}
