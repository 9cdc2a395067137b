//! Create contest_submissions table.
//!
//! `user_id` is unique: resubmission overwrites the existing row via ON CONFLICT.

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
                    .table(ContestSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContestSubmissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContestSubmissions::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ContestSubmissions::StorefrontDesignId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContestSubmissions::InteriorDesignId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ContestSubmissions::DealershipName).string_len(255))
                    .col(ColumnDef::new(ContestSubmissions::SapCode).string_len(64))
                    .col(ColumnDef::new(ContestSubmissions::MobileNumber).string_len(32))
                    .col(
                        ColumnDef::new(ContestSubmissions::SubmissionId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContestSubmissions::Status)
                            .string_len(20)
                            .not_null()
                            .default("submitted"),
                    )
                    .col(
                        ColumnDef::new(ContestSubmissions::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ContestSubmissions::Table, ContestSubmissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ContestSubmissions::Table,
                                ContestSubmissions::StorefrontDesignId,
                            )
                            .to(GeneratedDesigns::Table, GeneratedDesigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                ContestSubmissions::Table,
                                ContestSubmissions::InteriorDesignId,
                            )
                            .to(GeneratedDesigns::Table, GeneratedDesigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contest_submissions_user_unique")
                    .table(ContestSubmissions::Table)
                    .col(ContestSubmissions::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contest_submissions_code_unique")
                    .table(ContestSubmissions::Table)
                    .col(ContestSubmissions::SubmissionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contest_submissions_status")
                    .table(ContestSubmissions::Table)
                    .col(ContestSubmissions::Status)
                    .col(ContestSubmissions::SubmittedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContestSubmissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ContestSubmissions {
    Table,
    Id,
    UserId,
    StorefrontDesignId,
    InteriorDesignId,
    DealershipName,
    SapCode,
    MobileNumber,
    SubmissionId,
    Status,
    SubmittedAt,
}
