/// Error type for connection management and health checks.
///
/// Query errors inside repositories stay as `sea_orm::DbErr` and are mapped by
/// each domain into its own error type.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
