//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - a SCREAMING_SNAKE_CASE identifier for clients (e.g., "VALIDATION_ERROR")
//! - an integer code for logs and monitoring (e.g., 1001)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Path identifier is not a valid numeric id
    InvalidId,

    /// Requested resource was not found
    NotFound,

    /// Caller identity header is missing or malformed
    MissingUserId,

    /// Request conflicts with current resource state (e.g., duplicate email)
    Conflict,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Query string could not be parsed
    InvalidQuery,

    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    /// An upstream service could not be reached
    BadGateway,

    // Database errors (2000-2999)
    /// Database query or connection error
    DatabaseError,

    // JSON errors (5000s)
    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// Get the string representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::NotFound => "NOT_FOUND",
            Self::MissingUserId => "MISSING_USER_ID",
            Self::Conflict => "CONFLICT",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::BadGateway => "BAD_GATEWAY",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Get the integer code for logging and monitoring.
    ///
    /// Ranges:
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: database errors
    /// - 5000-5999: serialization errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MissingUserId => 1006,
            Self::Conflict => 1008,
            Self::ServiceUnavailable => 1011,
            Self::InvalidQuery => 1012,
            Self::BadGateway => 1013,

            Self::DatabaseError => 2003,

            Self::SerdeJsonError => 5001,
        }
    }

    /// Get the default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid id format",
            Self::NotFound => "Resource not found",
            Self::MissingUserId => "X-Sharer-User-Id header is required",
            Self::Conflict => "Resource already exists",
            Self::JsonExtraction => "Failed to parse request body",
            Self::InvalidQuery => "Failed to parse query string",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::BadGateway => "Upstream service unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
