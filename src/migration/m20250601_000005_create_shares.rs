//! Create shares table (append-only share log).

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users::Users;
use super::m20250601_000003_create_generated_designs::GeneratedDesigns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shares::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Shares::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Shares::UserId).uuid().not_null())
                    .col(ColumnDef::new(Shares::DesignId).uuid().not_null())
                    .col(ColumnDef::new(Shares::SharePlatform).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Shares::ContestEntry)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Shares::ShareCode).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Shares::SharedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Shares::Table, Shares::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Shares::Table, Shares::DesignId)
                            .to(GeneratedDesigns::Table, GeneratedDesigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shares_code_unique")
                    .table(Shares::Table)
                    .col(Shares::ShareCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shares_user")
                    .table(Shares::Table)
                    .col(Shares::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shares::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shares {
    Table,
    Id,
    UserId,
    DesignId,
    SharePlatform,
    ContestEntry,
    ShareCode,
    SharedAt,
}
