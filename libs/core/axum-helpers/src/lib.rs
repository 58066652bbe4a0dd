//! # Axum Helpers
//!
//! Shared HTTP plumbing for the ShareIt server and gateway.
//!
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: id path, caller header, validated JSON/query
//! - **[`pagination`]**: `from`/`size` query window
//! - **[`validation`]**: custom `validator` rules
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//!
//! let router = create_router::<ApiDoc>(api_routes)?;
//! create_app(router, &config.server).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, docs_router, health_router, run_health_checks, shutdown_signal,
    with_common_layers,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, SharerUserId, USER_ID_HEADER, ValidatedJson, ValidatedQuery};

pub use pagination::{DEFAULT_PAGE_SIZE, PageParams};
