use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{AppError, IdPath, SharerUserId, ValidatedJson, ValidatedQuery};
use tracing::info;

use super::PageQuery;
use crate::client::{BackendClient, BackendRequest};
use crate::dto::NewItemRequest;

pub fn router(backend: BackendClient) -> Router {
    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(backend)
}

async fn create_request(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(body): ValidatedJson<NewItemRequest>,
) -> Result<Response, AppError> {
    info!(requestor_id = user_id, "Creating item request");
    backend
        .send(BackendRequest::post("/requests").user(user_id).json(&body)?)
        .await
}

async fn list_own_requests(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(page): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    backend
        .send(BackendRequest::get("/requests").user(user_id).page(page))
        .await
}

async fn list_other_requests(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(page): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    backend
        .send(BackendRequest::get("/requests/all").user(user_id).page(page))
        .await
}

async fn get_request(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    backend
        .send(BackendRequest::get(format!("/requests/{}", id)).user(user_id))
        .await
}
