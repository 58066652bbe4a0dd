use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

/// Sea-ORM entity for the `requests` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub requestor_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ItemRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            requestor_id: model.requestor_id,
            created: model.created,
        }
    }
}
