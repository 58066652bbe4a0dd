use axum_helpers::validation::not_blank;
use chrono::NaiveDateTime;
use domain_bookings::{Booking, BookingStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

impl Item {
    /// Apply a partial update; absent fields keep their value.
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

/// Values for an item about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Request body for `POST /items`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(required(message = "description is required"))]
    pub description: Option<String>,
    #[validate(required(message = "available is required"))]
    pub available: Option<bool>,
    /// Request this item answers; ignored when no such request exists
    pub request_id: Option<i64>,
}

/// Request body for `PATCH /items/{id}`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(custom(function = "not_blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub item_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: NaiveDateTime,
}

/// Request body for `POST /items/{id}/comment`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    #[schema(value_type = String, example = "2030-01-01T10:00:00")]
    pub created: NaiveDateTime,
}

impl CommentResponse {
    pub fn new(comment: Comment, author_name: String) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_name,
            created: comment.created,
        }
    }
}

/// Compact booking reference shown on an item to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkedBooking {
    pub id: i64,
    #[schema(value_type = String, example = "2030-01-01T10:00:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2030-01-02T10:00:00")]
    pub end: NaiveDateTime,
    pub booker_id: i64,
    pub status: BookingStatus,
}

impl From<Booking> for LinkedBooking {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            booker_id: booking.booker_id,
            status: booking.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub comments: Vec<CommentResponse>,
    /// Latest approved booking that already started; owner only
    pub last_booking: Option<LinkedBooking>,
    /// Earliest approved booking still to start; owner only
    pub next_booking: Option<LinkedBooking>,
}

impl ItemResponse {
    pub fn new(item: Item, comments: Vec<CommentResponse>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            comments,
            last_booking: None,
            next_booking: None,
        }
    }
}

/// `?text=` on `GET /items/search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Matched case-insensitively against name and description
    pub text: Option<String>,
}
