//! Caller identity extractor.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Header carrying the id of the user performing the request.
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// The caller's user id, read from the `X-Sharer-User-Id` header.
///
/// Rejects with 400 when the header is absent or not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(pub i64);

impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
            AppError::MissingUserId(format!("{} header is required", USER_ID_HEADER))
                .into_response()
        })?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(SharerUserId)
            .ok_or_else(|| {
                AppError::MissingUserId(format!("{} header must be a number", USER_ID_HEADER))
                    .into_response()
            })
    }
}
