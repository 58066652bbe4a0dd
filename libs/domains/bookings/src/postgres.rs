use async_trait::async_trait;
use axum_helpers::PageParams;
use chrono::NaiveDateTime;
use database::BaseRepository;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};

use crate::{
    entity,
    error::{BookingError, BookingResult},
    models::{Booking, BookingStatus, NewBooking},
    repository::BookingRepository,
};

pub struct PgBookingRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: PageParams,
    ) -> BookingResult<Vec<Booking>> {
        let models = query
            .order_by_desc(entity::Column::StartDate)
            .order_by_desc(entity::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    fn approved_of(item_id: i64) -> Select<entity::Entity> {
        entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .filter(entity::Column::Status.eq(BookingStatus::Approved))
    }
}

fn db_error(err: DbErr) -> BookingError {
    BookingError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: NewBooking) -> BookingResult<Booking> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            start_date: Set(booking.start),
            end_date: Set(booking.end),
            item_id: Set(booking.item_id),
            booker_id: Set(booking.booker_id),
            status: Set(BookingStatus::Waiting),
        };

        let model = self.base.insert(active_model).await.map_err(db_error)?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(Into::into))
    }

    async fn list_by_booker(&self, booker_id: i64, page: PageParams) -> BookingResult<Vec<Booking>> {
        let query = entity::Entity::find().filter(entity::Column::BookerId.eq(booker_id));
        self.fetch_page(query, page).await
    }

    async fn list_by_items(
        &self,
        item_ids: &[i64],
        page: PageParams,
    ) -> BookingResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query =
            entity::Entity::find().filter(entity::Column::ItemId.is_in(item_ids.iter().copied()));
        self.fetch_page(query, page).await
    }

    async fn set_status_if_waiting(&self, id: i64, status: BookingStatus) -> BookingResult<bool> {
        // UPDATE bookings SET status = $1 WHERE id = $2 AND status = 'WAITING'
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Status.eq(BookingStatus::Waiting))
            .exec(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn last_approved_before(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<Option<Booking>> {
        let model = Self::approved_of(item_id)
            .filter(entity::Column::StartDate.lt(now))
            .order_by_desc(entity::Column::StartDate)
            .one(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn next_approved_after(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<Option<Booking>> {
        let model = Self::approved_of(item_id)
            .filter(entity::Column::StartDate.gt(now))
            .order_by_asc(entity::Column::StartDate)
            .one(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn has_finished_approved(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<bool> {
        let model = Self::approved_of(item_id)
            .filter(entity::Column::BookerId.eq(booker_id))
            .filter(entity::Column::EndDate.lt(now))
            .one(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(model.is_some())
    }
}
