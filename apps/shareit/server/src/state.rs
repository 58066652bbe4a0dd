//! Shared application state.

use database::postgres::DatabaseConnection;

/// Handed to every API module when the routers are built.
///
/// Cloning is cheap: the connection is a pooled handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}
