//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with an [`AppError`](crate::errors::AppError) so every
//! malformed request gets the standard JSON error body.

pub mod id_path;
pub mod sharer_user;
pub mod validated_json;
pub mod validated_query;

pub use id_path::IdPath;
pub use sharer_user::{SharerUserId, USER_ID_HEADER};
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
