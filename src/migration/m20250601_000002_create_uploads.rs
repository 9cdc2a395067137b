//! Create uploads table.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Uploads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Uploads::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Uploads::UserId).uuid())
                    .col(ColumnDef::new(Uploads::OriginalName).string_len(255).not_null())
                    .col(ColumnDef::new(Uploads::StoredFilename).string_len(255).not_null())
                    .col(ColumnDef::new(Uploads::StoredPath).string_len(1024).not_null())
                    .col(ColumnDef::new(Uploads::StorageKey).string_len(1024).not_null())
                    .col(ColumnDef::new(Uploads::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Uploads::MimeType).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Uploads::UploadType)
                            .string_len(20)
                            .not_null()
                            .default("storefront"),
                    )
                    // Validated in the application; designs may be deleted independently
                    .col(ColumnDef::new(Uploads::StorefrontDesignId).uuid())
                    .col(
                        ColumnDef::new(Uploads::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Uploads::Table, Uploads::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_uploads_user")
                    .table(Uploads::Table)
                    .col(Uploads::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Uploads::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Uploads {
    Table,
    Id,
    UserId,
    OriginalName,
    StoredFilename,
    StoredPath,
    StorageKey,
    FileSize,
    MimeType,
    UploadType,
    StorefrontDesignId,
    CreatedAt,
}
