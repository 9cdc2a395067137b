//! Uploaded source photograph (storefront or interior).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "uploads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub original_name: String,
    pub stored_filename: String,
    /// Public reference: `/uploads/<file>` or an object storage URL
    pub stored_path: String,
    /// Asset store key used to read the bytes back
    pub storage_key: String,
    pub file_size: i64,
    pub mime_type: String,
    pub upload_type: String,
    pub storefront_design_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::generated_design::Entity")]
    GeneratedDesign,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::generated_design::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedDesign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
