use axum_helpers::PageParams;
use chrono::{NaiveDateTime, Utc};
use domain_users::{User, UserRepository};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{BookingError, BookingResult};
use crate::models::{
    BookedItem, Booking, BookingResponse, BookingState, BookingStatus, CreateBooking, NewBooking,
};
use crate::repository::{BookableItems, BookingRepository};

const STATUS_LOCKED: &str = "Changing booking status is forbidden";

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Parse the `state` query value; absent means `ALL`.
pub fn parse_state(raw: Option<&str>) -> BookingResult<BookingState> {
    match raw {
        None => Ok(BookingState::All),
        Some(value) => BookingState::from_str(value)
            .map_err(|_| BookingError::Validation(format!("Unknown state: {}", value))),
    }
}

/// Service layer for the booking workflow
#[derive(Clone)]
pub struct BookingService<R: BookingRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn BookableItems>,
}

impl<R: BookingRepository> BookingService<R> {
    pub fn new(repository: R, users: Arc<dyn UserRepository>, items: Arc<dyn BookableItems>) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    /// Book an item for `[start, end)`.
    ///
    /// Checks run in a fixed order: dates, booker, item, availability, then
    /// ownership. Booking one's own item reports the item as not found.
    #[instrument(skip(self, input), fields(item_id = ?input.item_id))]
    pub async fn create_booking(
        &self,
        user_id: i64,
        input: CreateBooking,
    ) -> BookingResult<BookingResponse> {
        input
            .validate()
            .map_err(|e| BookingError::Validation(e.to_string()))?;

        let (Some(item_id), Some(start), Some(end)) = (input.item_id, input.start, input.end)
        else {
            return Err(BookingError::Validation(
                "itemId, start and end are required".to_string(),
            ));
        };

        if start >= end || start < now() {
            return Err(BookingError::Validation(
                "Invalid booking dates: start must be in the future and before end".to_string(),
            ));
        }

        let booker = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(BookingError::UserNotFound(user_id))?;

        let item = self
            .items
            .get_item(item_id)
            .await?
            .ok_or(BookingError::ItemNotFound(item_id))?;

        if !item.available {
            return Err(BookingError::Validation(format!(
                "Item {} is not available for booking",
                item_id
            )));
        }

        if item.owner_id == user_id {
            return Err(BookingError::ItemNotFound(item_id));
        }

        let booking = self
            .repository
            .create(NewBooking {
                item_id,
                booker_id: user_id,
                start,
                end,
            })
            .await?;

        tracing::info!(booking_id = booking.id, item_id, booker_id = user_id, "Created booking");
        Ok(BookingResponse::new(booking, item, booker))
    }

    /// Load a booking together with its item, visible only to the item's
    /// owner and the booker.
    async fn visible_booking(&self, user_id: i64, id: i64) -> BookingResult<(Booking, BookedItem)> {
        let booking = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))?;

        let item = self
            .items
            .get_item(booking.item_id)
            .await?
            .ok_or(BookingError::ItemNotFound(booking.item_id))?;

        if item.owner_id != user_id && booking.booker_id != user_id {
            return Err(BookingError::NotFound(id));
        }

        Ok((booking, item))
    }

    async fn booker_of(&self, booking: &Booking) -> BookingResult<User> {
        self.users
            .get_by_id(booking.booker_id)
            .await?
            .ok_or(BookingError::UserNotFound(booking.booker_id))
    }

    #[instrument(skip(self))]
    pub async fn get_booking(&self, user_id: i64, id: i64) -> BookingResult<BookingResponse> {
        let (booking, item) = self.visible_booking(user_id, id).await?;
        let booker = self.booker_of(&booking).await?;
        Ok(BookingResponse::new(booking, item, booker))
    }

    /// Approve or reject a waiting booking. Only the item's owner may decide.
    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn update_status(
        &self,
        user_id: i64,
        id: i64,
        approved: bool,
    ) -> BookingResult<BookingResponse> {
        let (mut booking, item) = self.visible_booking(user_id, id).await?;

        if item.owner_id != user_id {
            return Err(BookingError::NotFound(id));
        }
        if booking.status != BookingStatus::Waiting {
            return Err(BookingError::Validation(STATUS_LOCKED.to_string()));
        }

        let status = BookingStatus::from_approval(approved);
        if !self.repository.set_status_if_waiting(id, status).await? {
            return Err(BookingError::Validation(STATUS_LOCKED.to_string()));
        }
        booking.status = status;

        tracing::info!(booking_id = id, status = %status, "Booking status changed");
        let booker = self.booker_of(&booking).await?;
        Ok(BookingResponse::new(booking, item, booker))
    }

    /// Bookings made by `user_id`, latest start first, filtered by `state`
    /// after the page is read.
    pub async fn list_for_booker(
        &self,
        user_id: i64,
        state: Option<&str>,
        page: PageParams,
    ) -> BookingResult<Vec<BookingResponse>> {
        let state = parse_state(state)?;
        let bookings = self.repository.list_by_booker(user_id, page).await?;
        self.filter_and_expand(bookings, state).await
    }

    /// Bookings of every item `user_id` owns, latest start first, filtered by
    /// `state` after the page is read.
    pub async fn list_for_owner(
        &self,
        user_id: i64,
        state: Option<&str>,
        page: PageParams,
    ) -> BookingResult<Vec<BookingResponse>> {
        let state = parse_state(state)?;
        if !self.users.exists(user_id).await? {
            return Err(BookingError::UserNotFound(user_id));
        }

        let item_ids = self.items.item_ids_by_owner(user_id).await?;
        let bookings = self.repository.list_by_items(&item_ids, page).await?;
        self.filter_and_expand(bookings, state).await
    }

    async fn filter_and_expand(
        &self,
        bookings: Vec<Booking>,
        state: BookingState,
    ) -> BookingResult<Vec<BookingResponse>> {
        let now = now();
        let bookings: Vec<Booking> = bookings
            .into_iter()
            .filter(|b| state.matches(b, now))
            .collect();

        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let mut item_ids: Vec<i64> = bookings.iter().map(|b| b.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();
        let mut booker_ids: Vec<i64> = bookings.iter().map(|b| b.booker_id).collect();
        booker_ids.sort_unstable();
        booker_ids.dedup();

        let items: HashMap<i64, BookedItem> = self
            .items
            .items_by_ids(&item_ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();
        let bookers: HashMap<i64, User> = self
            .users
            .get_by_ids(&booker_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let item = items
                    .get(&booking.item_id)
                    .cloned()
                    .ok_or(BookingError::ItemNotFound(booking.item_id))?;
                let booker = bookers
                    .get(&booking.booker_id)
                    .cloned()
                    .ok_or(BookingError::UserNotFound(booking.booker_id))?;
                Ok(BookingResponse::new(booking, item, booker))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryBookingRepository, MockBookableItems};
    use chrono::Duration;
    use domain_users::{CreateUser, InMemoryUserRepository};

    const OWNER: i64 = 1;
    const BOOKER: i64 = 2;
    const STRANGER: i64 = 3;

    fn drill(available: bool) -> BookedItem {
        BookedItem {
            id: 10,
            name: "Drill".to_string(),
            description: "Cordless".to_string(),
            available,
            request_id: None,
            owner_id: OWNER,
        }
    }

    fn catalog(available: bool) -> Arc<dyn BookableItems> {
        let mut items = MockBookableItems::new();
        items
            .expect_get_item()
            .returning(move |id| Ok((id == 10).then(|| drill(available))));
        items
            .expect_items_by_ids()
            .returning(move |_| Ok(vec![drill(available)]));
        items
            .expect_item_ids_by_owner()
            .returning(|owner| Ok(if owner == OWNER { vec![10] } else { Vec::new() }));
        Arc::new(items)
    }

    async fn users() -> Arc<dyn UserRepository> {
        let users = InMemoryUserRepository::new();
        for name in ["owner", "booker", "stranger"] {
            users
                .create(CreateUser {
                    name: name.to_string(),
                    email: format!("{}@example.com", name),
                })
                .await
                .unwrap();
        }
        Arc::new(users)
    }

    async fn service_with(
        repo: InMemoryBookingRepository,
        available: bool,
    ) -> BookingService<InMemoryBookingRepository> {
        BookingService::new(repo, users().await, catalog(available))
    }

    fn request(start_in: Duration, end_in: Duration) -> CreateBooking {
        let now = now();
        CreateBooking {
            item_id: Some(10),
            start: Some(now + start_in),
            end: Some(now + end_in),
        }
    }

    fn soon() -> CreateBooking {
        request(Duration::minutes(5), Duration::minutes(10))
    }

    async fn seed(repo: &InMemoryBookingRepository, start: Duration, end: Duration, status: BookingStatus) -> i64 {
        let now = now();
        let booking = repo
            .create(NewBooking {
                item_id: 10,
                booker_id: BOOKER,
                start: now + start,
                end: now + end,
            })
            .await
            .unwrap();
        if status != BookingStatus::Waiting {
            repo.set_status_if_waiting(booking.id, status).await.unwrap();
        }
        booking.id
    }

    #[tokio::test]
    async fn test_create_booking_is_waiting() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;

        let booking = service.create_booking(BOOKER, soon()).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Waiting);
        assert_eq!(booking.booker.id, BOOKER);
        assert_eq!(booking.item.id, 10);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_dates() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;

        let reversed = request(Duration::hours(2), Duration::hours(1));
        let same = request(Duration::hours(1), Duration::hours(1));
        let past = request(Duration::hours(-2), Duration::hours(1));

        for input in [reversed, same, past] {
            let result = service.create_booking(BOOKER, input).await;
            assert!(matches!(result, Err(BookingError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;
        let mut input = soon();
        input.start = None;

        let result = service.create_booking(BOOKER, input).await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_checks_booker_then_item() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;

        let result = service.create_booking(42, soon()).await;
        assert!(matches!(result, Err(BookingError::UserNotFound(42))));

        let mut input = soon();
        input.item_id = Some(99);
        let result = service.create_booking(BOOKER, input).await;
        assert!(matches!(result, Err(BookingError::ItemNotFound(99))));
    }

    #[tokio::test]
    async fn test_unavailable_item_is_validation_error() {
        let service = service_with(InMemoryBookingRepository::new(), false).await;

        let result = service.create_booking(BOOKER, soon()).await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_owner_cannot_book_own_item() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;

        let result = service.create_booking(OWNER, soon()).await;
        assert!(matches!(result, Err(BookingError::ItemNotFound(10))));
    }

    #[tokio::test]
    async fn test_owner_approves_once() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;
        let booking = service.create_booking(BOOKER, soon()).await.unwrap();

        let approved = service.update_status(OWNER, booking.id, true).await.unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);

        let again = service.update_status(OWNER, booking.id, true).await;
        assert!(matches!(again, Err(BookingError::Validation(msg)) if msg == STATUS_LOCKED));
    }

    #[tokio::test]
    async fn test_owner_rejects_once() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;
        let booking = service.create_booking(BOOKER, soon()).await.unwrap();

        let rejected = service.update_status(OWNER, booking.id, false).await.unwrap();
        assert_eq!(rejected.status, BookingStatus::Rejected);

        let again = service.update_status(OWNER, booking.id, true).await;
        assert!(matches!(again, Err(BookingError::Validation(msg)) if msg == STATUS_LOCKED));
    }

    #[tokio::test]
    async fn test_only_owner_changes_status() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;
        let booking = service.create_booking(BOOKER, soon()).await.unwrap();

        let by_booker = service.update_status(BOOKER, booking.id, true).await;
        assert!(matches!(by_booker, Err(BookingError::NotFound(_))));

        let by_stranger = service.update_status(STRANGER, booking.id, false).await;
        assert!(matches!(by_stranger, Err(BookingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_booking_visible_to_owner_and_booker_only() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;
        let booking = service.create_booking(BOOKER, soon()).await.unwrap();

        assert!(service.get_booking(OWNER, booking.id).await.is_ok());
        assert!(service.get_booking(BOOKER, booking.id).await.is_ok());
        assert!(matches!(
            service.get_booking(STRANGER, booking.id).await,
            Err(BookingError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_state_filters_for_booker() {
        let repo = InMemoryBookingRepository::new();
        let past = seed(&repo, Duration::hours(-5), Duration::hours(-4), BookingStatus::Approved).await;
        let current = seed(&repo, Duration::hours(-1), Duration::hours(1), BookingStatus::Approved).await;
        let future = seed(&repo, Duration::hours(4), Duration::hours(5), BookingStatus::Waiting).await;
        let rejected = seed(&repo, Duration::hours(6), Duration::hours(7), BookingStatus::Rejected).await;
        let service = service_with(repo, true).await;

        let ids = |list: Vec<BookingResponse>| list.into_iter().map(|b| b.id).collect::<Vec<_>>();
        let page = PageParams::default();

        assert_eq!(ids(service.list_for_booker(BOOKER, Some("PAST"), page).await.unwrap()), vec![past]);
        assert_eq!(ids(service.list_for_booker(BOOKER, Some("CURRENT"), page).await.unwrap()), vec![current]);
        assert_eq!(
            ids(service.list_for_booker(BOOKER, Some("FUTURE"), page).await.unwrap()),
            vec![rejected, future]
        );
        assert_eq!(ids(service.list_for_booker(BOOKER, Some("WAITING"), page).await.unwrap()), vec![future]);
        assert_eq!(ids(service.list_for_booker(BOOKER, Some("REJECTED"), page).await.unwrap()), vec![rejected]);
        assert_eq!(
            ids(service.list_for_booker(BOOKER, None, page).await.unwrap()),
            vec![rejected, future, current, past]
        );
    }

    #[tokio::test]
    async fn test_filter_applies_after_paging() {
        let repo = InMemoryBookingRepository::new();
        seed(&repo, Duration::hours(-5), Duration::hours(-4), BookingStatus::Approved).await;
        seed(&repo, Duration::hours(4), Duration::hours(5), BookingStatus::Waiting).await;
        let service = service_with(repo, true).await;

        let page = service
            .list_for_booker(BOOKER, Some("PAST"), PageParams::new(0, 1))
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_state_message() {
        let service = service_with(InMemoryBookingRepository::new(), true).await;

        let result = service
            .list_for_booker(BOOKER, Some("UNSUPPORTED_STATUS"), PageParams::default())
            .await;
        assert!(
            matches!(result, Err(BookingError::Validation(msg)) if msg == "Unknown state: UNSUPPORTED_STATUS")
        );
    }

    #[tokio::test]
    async fn test_owner_listing_requires_user_and_uses_owned_items() {
        let repo = InMemoryBookingRepository::new();
        let id = seed(&repo, Duration::hours(1), Duration::hours(2), BookingStatus::Waiting).await;
        let service = service_with(repo, true).await;

        let owned = service
            .list_for_owner(OWNER, None, PageParams::default())
            .await
            .unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, id);

        let none = service
            .list_for_owner(STRANGER, None, PageParams::default())
            .await
            .unwrap();
        assert!(none.is_empty());

        let missing = service.list_for_owner(42, None, PageParams::default()).await;
        assert!(matches!(missing, Err(BookingError::UserNotFound(42))));
    }
}
