use axum::Router;
use domain_bookings::{BookingService, PgBookingRepository, handlers};
use domain_users::PgUserRepository;
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = BookingService::new(
        PgBookingRepository::new(state.db.clone()),
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(super::items::service(state).catalog()),
    );
    handlers::router(service)
}
