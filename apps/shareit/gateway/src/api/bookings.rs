use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use axum_helpers::{AppError, IdPath, SharerUserId, ValidatedJson, ValidatedQuery};
use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::info;
use validator::Validate;

use super::PageQuery;
use crate::client::{BackendClient, BackendRequest};
use crate::dto::NewBooking;

/// Booking list filters the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
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

/// Absent means `ALL`; anything unrecognised is a 400.
pub fn parse_state(raw: Option<&str>) -> Result<BookingState, AppError> {
    match raw {
        None => Ok(BookingState::All),
        Some(value) => BookingState::from_str(value)
            .map_err(|_| AppError::BadRequest(format!("Unknown state: {}", value))),
    }
}

#[derive(Debug, Deserialize)]
pub struct StateQuery {
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApprovalQuery {
    pub approved: bool,
}

pub fn router(backend: BackendClient) -> Router {
    Router::new()
        .route("/", get(list_booker_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(update_status))
        .with_state(backend)
}

async fn create_booking(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(body): ValidatedJson<NewBooking>,
) -> Result<Response, AppError> {
    info!(booker_id = user_id, item_id = ?body.item_id, "Creating booking");
    backend
        .send(BackendRequest::post("/bookings").user(user_id).json(&body)?)
        .await
}

async fn update_status(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedQuery(approval): ValidatedQuery<ApprovalQuery>,
) -> Result<Response, AppError> {
    info!(booking_id = id, owner_id = user_id, approved = approval.approved, "Deciding booking");
    backend
        .send(
            BackendRequest::patch(format!("/bookings/{}", id))
                .user(user_id)
                .query("approved", approval.approved),
        )
        .await
}

async fn get_booking(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    backend
        .send(BackendRequest::get(format!("/bookings/{}", id)).user(user_id))
        .await
}

async fn list_booker_bookings(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
    ValidatedQuery(page): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    let state = parse_state(query.state.as_deref())?;
    backend
        .send(
            BackendRequest::get("/bookings")
                .user(user_id)
                .query("state", state)
                .page(page),
        )
        .await
}

async fn list_owner_bookings(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
    ValidatedQuery(page): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    let state = parse_state(query.state.as_deref())?;
    backend
        .send(
            BackendRequest::get("/bookings/owner")
                .user(user_id)
                .query("state", state)
                .page(page),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state() {
        assert_eq!(parse_state(None).unwrap(), BookingState::All);
        assert_eq!(parse_state(Some("WAITING")).unwrap(), BookingState::Waiting);

        let err = parse_state(Some("SOMETIME")).unwrap_err();
        assert_eq!(err.to_string(), "Bad Request: Unknown state: SOMETIME");
    }

    #[test]
    fn test_state_renders_as_query_value() {
        assert_eq!(BookingState::Current.to_string(), "CURRENT");
    }
}
