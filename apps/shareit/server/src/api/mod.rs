use axum::Router;

pub mod bookings;
pub mod health;
pub mod items;
pub mod requests;
pub mod users;

use crate::state::AppState;

/// All domain routes, each nested under its resource path.
///
/// Every domain gets its own PostgreSQL repositories over the shared pool;
/// items are reached from bookings and requests through the item catalog.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .nest("/items", items::router(state))
        .nest("/requests", requests::router(state))
        .nest("/bookings", bookings::router(state))
}

/// `/ready` with a real database ping.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
