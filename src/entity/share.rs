//! Append-only social share log entry.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub design_id: Uuid,
    pub share_platform: String,
    pub contest_entry: bool,
    #[sea_orm(unique)]
    pub share_code: String,
    pub shared_at: DateTimeUtc,
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
    #[sea_orm(
        belongs_to = "super::generated_design::Entity",
        from = "Column::DesignId",
        to = "super::generated_design::Column::Id",
        on_delete = "Cascade"
    )]
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
