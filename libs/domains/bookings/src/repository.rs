use async_trait::async_trait;
use axum_helpers::PageParams;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::BookingResult;
use crate::models::{BookedItem, Booking, BookingStatus, NewBooking};

/// Repository trait for Booking persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking in `WAITING` status.
    async fn create(&self, booking: NewBooking) -> BookingResult<Booking>;

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>>;

    /// Bookings made by `booker_id`, latest start first.
    async fn list_by_booker(&self, booker_id: i64, page: PageParams) -> BookingResult<Vec<Booking>>;

    /// Bookings of any of `item_ids`, latest start first.
    async fn list_by_items(&self, item_ids: &[i64], page: PageParams)
    -> BookingResult<Vec<Booking>>;

    /// Move a `WAITING` booking to `status`.
    ///
    /// Returns `false` when the booking no longer waits, leaving it untouched.
    async fn set_status_if_waiting(&self, id: i64, status: BookingStatus) -> BookingResult<bool>;

    /// The approved booking of `item_id` with the latest start before `now`.
    async fn last_approved_before(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<Option<Booking>>;

    /// The approved booking of `item_id` with the earliest start after `now`.
    async fn next_approved_after(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<Option<Booking>>;

    /// Whether `booker_id` has an approved booking of `item_id` that ended before `now`.
    async fn has_finished_approved(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<bool>;
}

/// Item lookups the booking workflow needs, provided by the item catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookableItems: Send + Sync {
    async fn get_item(&self, id: i64) -> BookingResult<Option<BookedItem>>;

    async fn items_by_ids(&self, ids: &[i64]) -> BookingResult<Vec<BookedItem>>;

    async fn item_ids_by_owner(&self, owner_id: i64) -> BookingResult<Vec<i64>>;
}

/// In-memory implementation of BookingRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<BTreeMap<i64, Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn latest_start_first(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let bookings = self.bookings.read().await;
        let mut result: Vec<Booking> = bookings.values().filter(|b| keep(*b)).cloned().collect();
        result.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
        result
    }

    async fn approved_of(&self, item_id: i64) -> Vec<Booking> {
        self.bookings
            .read()
            .await
            .values()
            .filter(|b| b.item_id == item_id && b.status == BookingStatus::Approved)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: NewBooking) -> BookingResult<Booking> {
        let mut bookings = self.bookings.write().await;
        let id = bookings.keys().next_back().map_or(1, |last| last + 1);

        let booking = Booking {
            id,
            start: booking.start,
            end: booking.end,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            status: BookingStatus::Waiting,
        };
        bookings.insert(id, booking.clone());
        Ok(booking)
    }

    async fn get_by_id(&self, id: i64) -> BookingResult<Option<Booking>> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_by_booker(&self, booker_id: i64, page: PageParams) -> BookingResult<Vec<Booking>> {
        let rows = self.latest_start_first(|b| b.booker_id == booker_id).await;
        Ok(page.apply(rows))
    }

    async fn list_by_items(
        &self,
        item_ids: &[i64],
        page: PageParams,
    ) -> BookingResult<Vec<Booking>> {
        let rows = self.latest_start_first(|b| item_ids.contains(&b.item_id)).await;
        Ok(page.apply(rows))
    }

    async fn set_status_if_waiting(&self, id: i64, status: BookingStatus) -> BookingResult<bool> {
        let mut bookings = self.bookings.write().await;
        match bookings.get_mut(&id) {
            Some(booking) if booking.status == BookingStatus::Waiting => {
                booking.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn last_approved_before(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<Option<Booking>> {
        Ok(self
            .approved_of(item_id)
            .await
            .into_iter()
            .filter(|b| b.start < now)
            .max_by_key(|b| b.start))
    }

    async fn next_approved_after(
        &self,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<Option<Booking>> {
        Ok(self
            .approved_of(item_id)
            .await
            .into_iter()
            .filter(|b| b.start > now)
            .min_by_key(|b| b.start))
    }

    async fn has_finished_approved(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> BookingResult<bool> {
        Ok(self
            .approved_of(item_id)
            .await
            .iter()
            .any(|b| b.booker_id == booker_id && b.end < now))
    }
}
