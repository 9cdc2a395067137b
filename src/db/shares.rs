//! Database operations for the share log.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::share::{self, ActiveModel, Entity as Share};
use crate::error::{AppError, AppResult};

use super::DbPool;

/// Contest-share activity of one participant.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ParticipantActivity {
    pub user_id: Uuid,
    pub total_shares: i64,
    pub unique_designs: i64,
    pub platforms_used: i64,
    pub latest_share: DateTime<Utc>,
}

/// Contest-share totals across all participants.
#[derive(Debug, Clone, Default, FromQueryResult)]
pub struct ShareTotals {
    pub total_shares: i64,
    pub unique_users: i64,
    pub unique_designs: i64,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PlatformActivity {
    pub platform: String,
    pub count: i64,
}

impl DbPool {
    /// Append a share entry.
    pub async fn insert_share(
        &self,
        user_id: Uuid,
        design_id: Uuid,
        platform: &str,
        share_code: &str,
    ) -> AppResult<share::Model> {
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            design_id: Set(design_id),
            share_platform: Set(platform.to_string()),
            contest_entry: Set(true),
            share_code: Set(share_code.to_string()),
            shared_at: Set(Utc::now()),
        };

        Ok(model.insert(self.connection()).await?)
    }

    /// Look up a share by its public code.
    pub async fn get_share_by_code(&self, code: &str) -> AppResult<Option<share::Model>> {
        Share::find()
            .filter(share::Column::ShareCode.eq(code))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get share: {}", e)))
    }

    /// A user's shares, newest first.
    pub async fn list_shares_for_user(
        &self,
        user_id: Uuid,
        platform: Option<&str>,
        contest_only: bool,
    ) -> AppResult<Vec<share::Model>> {
        let mut select = Share::find().filter(share::Column::UserId.eq(user_id));

        if let Some(platform) = platform {
            select = select.filter(share::Column::SharePlatform.eq(platform));
        }

        if contest_only {
            select = select.filter(share::Column::ContestEntry.eq(true));
        }

        select
            .order_by_desc(share::Column::SharedAt)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list shares: {}", e)))
    }

    /// Participants ranked by contest shares, then by most recent share.
    pub async fn rank_share_participants(&self, limit: u64) -> AppResult<Vec<ParticipantActivity>> {
        let total_shares = Expr::col(share::Column::Id).count();
        let latest_share = Expr::col(share::Column::SharedAt).max();

        Share::find()
            .select_only()
            .column(share::Column::UserId)
            .column_as(total_shares.clone(), "total_shares")
            .column_as(Expr::col(share::Column::DesignId).count_distinct(), "unique_designs")
            .column_as(Expr::col(share::Column::SharePlatform).count_distinct(), "platforms_used")
            .column_as(latest_share.clone(), "latest_share")
            .filter(share::Column::ContestEntry.eq(true))
            .group_by(share::Column::UserId)
            .order_by_desc(total_shares)
            .order_by_desc(latest_share)
            .order_by_asc(share::Column::UserId)
            .limit(limit)
            .into_model::<ParticipantActivity>()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to rank share participants: {}", e)))
    }

    /// Number of users with at least one contest share.
    pub async fn count_share_participants(&self) -> AppResult<u64> {
        let count: Option<i64> = Share::find()
            .select_only()
            .column_as(Expr::col(share::Column::UserId).count_distinct(), "count")
            .filter(share::Column::ContestEntry.eq(true))
            .into_tuple()
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count share participants: {}", e)))?;

        Ok(count.unwrap_or(0) as u64)
    }

    /// Contest-share totals.
    pub async fn share_totals(&self) -> AppResult<ShareTotals> {
        let totals = Share::find()
            .select_only()
            .column_as(Expr::col(share::Column::Id).count(), "total_shares")
            .column_as(Expr::col(share::Column::UserId).count_distinct(), "unique_users")
            .column_as(Expr::col(share::Column::DesignId).count_distinct(), "unique_designs")
            .filter(share::Column::ContestEntry.eq(true))
            .into_model::<ShareTotals>()
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load share totals: {}", e)))?;

        Ok(totals.unwrap_or_default())
    }

    /// Contest shares per platform, busiest first, ties alphabetical.
    pub async fn shares_by_platform(&self) -> AppResult<Vec<PlatformActivity>> {
        let count = Expr::col(share::Column::Id).count();

        Share::find()
            .select_only()
            .column_as(share::Column::SharePlatform, "platform")
            .column_as(count.clone(), "count")
            .filter(share::Column::ContestEntry.eq(true))
            .group_by(share::Column::SharePlatform)
            .order_by_desc(count)
            .order_by_asc(share::Column::SharePlatform)
            .into_model::<PlatformActivity>()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count shares by platform: {}", e)))
    }
}
