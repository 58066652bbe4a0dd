//! Server infrastructure.
//!
//! - Router assembly with OpenAPI documentation and common layers
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes)?
//!     .merge(health_router(core_config::app_info!()));
//! create_app(router, &config.server).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{
    REQUEST_TIMEOUT, create_app, create_production_app, create_router, docs_router,
    with_common_layers,
};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
