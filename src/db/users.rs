//! Database operations for users.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Entity as User};
use crate::error::{AppError, AppResult};
use crate::models::UserProfile;

use super::DbPool;

impl DbPool {
    /// Find a user by SAP code.
    pub async fn find_user_by_sap_code(&self, sap_code: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::SapCode.eq(sap_code))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user by SAP code: {}", e)))
    }

    /// Find a user by ID.
    pub async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))
    }

    /// Insert a user or, when the SAP code is already known, overwrite its
    /// mutable fields and bump `updated_at`. Always returns the stored row.
    ///
    /// Runs as a single `INSERT .. ON CONFLICT (sap_code) DO UPDATE`, so two
    /// concurrent uploads with the same SAP code still leave one row.
    pub async fn upsert_user(&self, profile: &UserProfile) -> AppResult<user::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            dealership_name: Set(profile.dealership_name.clone()),
            sap_code: Set(profile.sap_code.clone()),
            mobile_number: Set(profile.mobile_number.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        User::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::SapCode)
                    .update_columns([
                        user::Column::DealershipName,
                        user::Column::MobileNumber,
                        user::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert user: {}", e)))?;

        let stored = self
            .find_user_by_sap_code(&profile.sap_code)
            .await?
            .ok_or_else(|| AppError::Database("Failed to fetch upserted user".to_string()))?;

        debug!(user_id = %stored.id, sap_code = %stored.sap_code, "User upserted");

        Ok(stored)
    }

    /// Get users by IDs.
    pub async fn get_users_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        User::find()
            .filter(user::Column::Id.is_in(ids))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get users: {}", e)))
    }

    /// Count users (diagnostics and tests).
    pub async fn count_users(&self) -> AppResult<u64> {
        use sea_orm::PaginatorTrait;

        User::find()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count users: {}", e)))
    }
}
