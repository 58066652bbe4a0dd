use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_bookings::BookingError;
use domain_requests::RequestError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id {0} not found")]
    NotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<UserError> for ItemError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => ItemError::UserNotFound(id),
            UserError::Validation(msg) => ItemError::Validation(msg),
            other => ItemError::Internal(other.to_string()),
        }
    }
}

impl From<BookingError> for ItemError {
    fn from(err: BookingError) -> Self {
        ItemError::Internal(err.to_string())
    }
}

impl From<RequestError> for ItemError {
    fn from(err: RequestError) -> Self {
        ItemError::Internal(err.to_string())
    }
}

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) | ItemError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
