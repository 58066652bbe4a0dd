use chrono::NaiveDateTime;
use domain_users::User;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Lifecycle of a booking. Only `WAITING` bookings may change status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting the owner's decision
    #[default]
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

impl BookingStatus {
    pub fn from_approval(approved: bool) -> Self {
        if approved { Self::Approved } else { Self::Rejected }
    }
}

/// Filter applied to booking lists.
///
/// `CURRENT`, `PAST` and `FUTURE` compare the booking window against the
/// current time; `WAITING` and `REJECTED` match on status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, ToSchema)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn matches(&self, booking: &Booking, now: NaiveDateTime) -> bool {
        match self {
            Self::All => true,
            Self::Current => booking.start < now && booking.end > now,
            Self::Past => booking.end < now,
            Self::Future => booking.start > now,
            Self::Waiting => booking.status == BookingStatus::Waiting,
            Self::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub item_id: i64,
    pub booker_id: i64,
    pub status: BookingStatus,
}

/// Values for a booking about to be stored; status starts at `WAITING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub item_id: i64,
    pub booker_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Request body for `POST /bookings`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(required(message = "itemId is required"))]
    pub item_id: Option<i64>,
    #[validate(required(message = "start is required"))]
    #[schema(value_type = String, example = "2030-01-01T10:00:00")]
    pub start: Option<NaiveDateTime>,
    #[validate(required(message = "end is required"))]
    #[schema(value_type = String, example = "2030-01-02T10:00:00")]
    pub end: Option<NaiveDateTime>,
}

/// The item as shown inside a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookedItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    #[serde(skip)]
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    #[schema(value_type = String, example = "2030-01-01T10:00:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2030-01-02T10:00:00")]
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub item: BookedItem,
    pub booker: User,
}

impl BookingResponse {
    pub fn new(booking: Booking, item: BookedItem, booker: User) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            status: booking.status,
            item,
            booker,
        }
    }
}

/// `?state=` on the list endpoints; parsed by the service so unknown values
/// get the `Unknown state: ...` message.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StateQuery {
    /// ALL, CURRENT, PAST, FUTURE, WAITING or REJECTED (default ALL)
    pub state: Option<String>,
}

/// `?approved=` on `PATCH /bookings/{id}`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalQuery {
    pub approved: bool,
}
