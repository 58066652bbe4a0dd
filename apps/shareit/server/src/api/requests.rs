use axum::Router;
use domain_requests::{PgRequestRepository, RequestService, handlers};
use domain_users::PgUserRepository;
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = RequestService::new(
        PgRequestRepository::new(state.db.clone()),
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(super::items::service(state).catalog()),
    );
    handlers::router(service)
}
