//! Database operations for contest submissions.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

use crate::entity::contest_submission::{self, ActiveModel, Entity as ContestSubmission};
use crate::error::{AppError, AppResult};
use crate::models::SubmissionStatus;

use super::DbPool;

/// Fields written on every submit.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: Uuid,
    pub storefront_design_id: Uuid,
    pub interior_design_id: Uuid,
    pub dealership_name: Option<String>,
    pub sap_code: Option<String>,
    pub mobile_number: Option<String>,
    pub submission_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl DbPool {
    /// Insert the user's submission, or overwrite the existing one in place.
    ///
    /// `user_id` is unique, so concurrent submits for the same user serialize
    /// at the database and the last write wins.
    pub async fn upsert_submission(
        &self,
        new: NewSubmission,
    ) -> AppResult<contest_submission::Model> {
        let user_id = new.user_id;

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(new.user_id),
            storefront_design_id: Set(new.storefront_design_id),
            interior_design_id: Set(new.interior_design_id),
            dealership_name: Set(new.dealership_name),
            sap_code: Set(new.sap_code),
            mobile_number: Set(new.mobile_number),
            submission_id: Set(new.submission_id),
            status: Set(SubmissionStatus::Submitted.as_str().to_string()),
            submitted_at: Set(new.submitted_at),
        };

        ContestSubmission::insert(model)
            .on_conflict(
                OnConflict::column(contest_submission::Column::UserId)
                    .update_columns([
                        contest_submission::Column::StorefrontDesignId,
                        contest_submission::Column::InteriorDesignId,
                        contest_submission::Column::DealershipName,
                        contest_submission::Column::SapCode,
                        contest_submission::Column::MobileNumber,
                        contest_submission::Column::SubmissionId,
                        contest_submission::Column::Status,
                        contest_submission::Column::SubmittedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await?;

        self.get_submission_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to fetch upserted submission".to_string()))
    }

    /// The user's live submission, if any.
    pub async fn get_submission_for_user(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<contest_submission::Model>> {
        ContestSubmission::find()
            .filter(contest_submission::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get submission: {}", e)))
    }

    /// The user's submission, only if it holds exactly this pair.
    pub async fn find_submission_for_pair(
        &self,
        user_id: Uuid,
        storefront_design_id: Uuid,
        interior_design_id: Uuid,
    ) -> AppResult<Option<contest_submission::Model>> {
        ContestSubmission::find()
            .filter(contest_submission::Column::UserId.eq(user_id))
            .filter(contest_submission::Column::StorefrontDesignId.eq(storefront_design_id))
            .filter(contest_submission::Column::InteriorDesignId.eq(interior_design_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to check submission: {}", e)))
    }

    /// Look up a submission by its public code.
    pub async fn get_submission_by_code(
        &self,
        code: &str,
    ) -> AppResult<Option<contest_submission::Model>> {
        ContestSubmission::find()
            .filter(contest_submission::Column::SubmissionId.eq(code))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get submission: {}", e)))
    }

    /// Most recent submissions with the given status.
    pub async fn list_submissions(
        &self,
        status: &str,
        limit: u64,
    ) -> AppResult<Vec<contest_submission::Model>> {
        ContestSubmission::find()
            .filter(contest_submission::Column::Status.eq(status))
            .order_by_desc(contest_submission::Column::SubmittedAt)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list submissions: {}", e)))
    }

    /// Count submission rows for a user (0 or 1).
    pub async fn count_submissions_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        ContestSubmission::find()
            .filter(contest_submission::Column::UserId.eq(user_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count submissions: {}", e)))
    }
}
