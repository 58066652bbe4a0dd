use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_users::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request with id {0} not found")]
    NotFound(i64),

    #[error("User with id {0} not found")]
    UserNotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

impl From<UserError> for RequestError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => RequestError::UserNotFound(id),
            UserError::Validation(msg) => RequestError::Validation(msg),
            other => RequestError::Internal(other.to_string()),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(_) | RequestError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            RequestError::Validation(msg) => AppError::BadRequest(msg),
            RequestError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
