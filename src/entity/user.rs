//! Contest participant, deduplicated by SAP code.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub dealership_name: Option<String>,
    #[sea_orm(unique)]
    pub sap_code: String,
    pub mobile_number: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::upload::Entity")]
    Upload,
    #[sea_orm(has_many = "super::generated_design::Entity")]
    GeneratedDesign,
}

impl Related<super::upload::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Upload.def()
    }
}

impl Related<super::generated_design::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneratedDesign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
