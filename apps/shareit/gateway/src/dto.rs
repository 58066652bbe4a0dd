//! Request bodies checked at the edge before anything reaches the backend.
//!
//! Each type serializes back to the same camelCase JSON it was read from, so
//! fields the caller left out stay absent in the forwarded body.

use axum_helpers::validation::not_blank;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewUser {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: String,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(required(message = "description is required"))]
    pub description: Option<String>,
    #[validate(required(message = "available is required"))]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

/// Partial item update; the backend owns the rules for it.
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewComment {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewItemRequest {
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

/// Booking window: start not in the past, end in the future, start before end.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_period", skip_on_field_errors = true))]
pub struct NewBooking {
    #[validate(required(message = "itemId is required"))]
    pub item_id: Option<i64>,
    #[validate(required(message = "start is required"))]
    pub start: Option<NaiveDateTime>,
    #[validate(required(message = "end is required"))]
    pub end: Option<NaiveDateTime>,
}

fn period_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn check_period(booking: &NewBooking) -> Result<(), ValidationError> {
    let (Some(start), Some(end)) = (booking.start, booking.end) else {
        return Ok(());
    };
    let now = Utc::now().naive_utc();

    if start < now {
        return Err(period_error("start_in_past", "start must not be in the past"));
    }
    if end <= now {
        return Err(period_error("end_not_future", "end must be in the future"));
    }
    if start >= end {
        return Err(period_error("start_after_end", "start must be before end"));
    }
    Ok(())
}
