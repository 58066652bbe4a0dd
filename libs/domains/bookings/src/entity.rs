use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

use crate::models::{Booking, BookingStatus};

/// Sea-ORM entity for the `bookings` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            start: model.start_date,
            end: model.end_date,
            item_id: model.item_id,
            booker_id: model.booker_id,
            status: model.status,
        }
    }
}
