use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking with id {0} not found")]
    NotFound(i64),

    #[error("Item with id {0} not found")]
    ItemNotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<UserError> for BookingError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => BookingError::UserNotFound(id),
            UserError::Validation(msg) => BookingError::Validation(msg),
            other => BookingError::Internal(other.to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_)
            | BookingError::ItemNotFound(_)
            | BookingError::UserNotFound(_) => AppError::NotFound(err.to_string()),
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
