//! Create generated_designs table.
//!
//! Interior variants point back at the storefront design they complement.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_users::Users;
use super::m20250601_000002_create_uploads::Uploads;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GeneratedDesigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneratedDesigns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeneratedDesigns::UploadId).uuid().not_null())
                    .col(ColumnDef::new(GeneratedDesigns::UserId).uuid())
                    .col(
                        ColumnDef::new(GeneratedDesigns::DesignType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneratedDesigns::Filename)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneratedDesigns::StoredPath)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneratedDesigns::StorageKey)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneratedDesigns::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GeneratedDesigns::Width).integer())
                    .col(ColumnDef::new(GeneratedDesigns::Height).integer())
                    .col(ColumnDef::new(GeneratedDesigns::AiPrompt).text())
                    .col(
                        ColumnDef::new(GeneratedDesigns::ProcessingStatus)
                            .string_len(20)
                            .not_null()
                            .default("completed"),
                    )
                    .col(
                        ColumnDef::new(GeneratedDesigns::IsInterior)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(GeneratedDesigns::StorefrontDesignId).uuid())
                    .col(
                        ColumnDef::new(GeneratedDesigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneratedDesigns::Table, GeneratedDesigns::UploadId)
                            .to(Uploads::Table, Uploads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneratedDesigns::Table, GeneratedDesigns::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GeneratedDesigns::Table, GeneratedDesigns::StorefrontDesignId)
                            .to(GeneratedDesigns::Table, GeneratedDesigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generated_designs_upload")
                    .table(GeneratedDesigns::Table)
                    .col(GeneratedDesigns::UploadId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_generated_designs_user_interior")
                    .table(GeneratedDesigns::Table)
                    .col(GeneratedDesigns::UserId)
                    .col(GeneratedDesigns::IsInterior)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GeneratedDesigns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GeneratedDesigns {
    Table,
    Id,
    UploadId,
    UserId,
    DesignType,
    Filename,
    StoredPath,
    StorageKey,
    FileSize,
    Width,
    Height,
    AiPrompt,
    ProcessingStatus,
    IsInterior,
    StorefrontDesignId,
    CreatedAt,
}
