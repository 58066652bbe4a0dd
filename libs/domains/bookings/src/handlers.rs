use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::{
    IdPath, PageParams, SharerUserId, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use domain_users::User;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::BookingResult;
use crate::models::{
    ApprovalQuery, BookedItem, BookingResponse, BookingStatus, CreateBooking, StateQuery,
};
use crate::repository::BookingRepository;
use crate::service::BookingService;

pub const TAG: &str = "bookings";

/// OpenAPI documentation for the Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(create_booking, list_booker_bookings, list_owner_bookings, get_booking, update_status),
    components(
        schemas(CreateBooking, BookingResponse, BookedItem, BookingStatus, User),
        responses(NotFoundResponse, BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "Booking workflow"))
)]
pub struct ApiDoc;

/// Bookings router, to be nested under `/bookings`.
pub fn router<R: BookingRepository + 'static>(service: BookingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_booker_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(update_status))
        .with_state(shared_service)
}

/// Book an item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booker")),
    request_body = CreateBooking,
    responses(
        (status = 200, description = "Booking created in WAITING status", body = BookingResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<Json<BookingResponse>> {
    Ok(Json(service.create_booking(user_id, input).await?))
}

/// Approve or reject a waiting booking
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        ("id" = i64, Path, description = "Booking id"),
        ApprovalQuery
    ),
    responses(
        (status = 200, description = "Booking approved or rejected", body = BookingResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_status<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedQuery(query): ValidatedQuery<ApprovalQuery>,
) -> BookingResult<Json<BookingResponse>> {
    Ok(Json(service.update_status(user_id, id, query.approved).await?))
}

/// Get a booking as its booker or the item's owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner"),
        ("id" = i64, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "Booking found", body = BookingResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> BookingResult<Json<BookingResponse>> {
    Ok(Json(service.get_booking(user_id, id).await?))
}

/// The caller's bookings, latest start first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker"),
        StateQuery,
        PageParams
    ),
    responses(
        (status = 200, description = "Bookings in the requested state", body = Vec<BookingResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_booker_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .list_for_booker(user_id, query.state.as_deref(), page)
        .await?;
    Ok(Json(bookings))
}

/// Bookings of the caller's items, latest start first
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        StateQuery,
        PageParams
    ),
    responses(
        (status = 200, description = "Bookings in the requested state", body = Vec<BookingResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_owner_bookings<R: BookingRepository>(
    State(service): State<Arc<BookingService<R>>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<StateQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> BookingResult<Json<Vec<BookingResponse>>> {
    let bookings = service
        .list_for_owner(user_id, query.state.as_deref(), page)
        .await?;
    Ok(Json(bookings))
}
