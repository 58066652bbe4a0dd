use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            item_id: model.item_id,
            author_id: model.author_id,
            created: model.created,
        }
    }
}
