use axum::Router;
use domain_bookings::PgBookingRepository;
use domain_items::{ItemService, PgItemRepository, handlers};
use domain_requests::PgRequestRepository;
use domain_users::PgUserRepository;
use std::sync::Arc;

use crate::state::AppState;

/// Item service over PostgreSQL, also the source of the item catalog.
pub fn service(state: &AppState) -> ItemService<PgItemRepository> {
    ItemService::new(
        PgItemRepository::new(state.db.clone()),
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgRequestRepository::new(state.db.clone())),
        Arc::new(PgBookingRepository::new(state.db.clone())),
    )
}

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}
