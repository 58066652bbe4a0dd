use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::{get, post},
};
use axum_helpers::{AppError, IdPath, SharerUserId, ValidatedJson, ValidatedQuery};
use serde::Deserialize;
use tracing::info;

use super::PageQuery;
use crate::client::{BackendClient, BackendRequest};
use crate::dto::{ItemPatch, NewComment, NewItem};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub text: Option<String>,
}

pub fn router(backend: BackendClient) -> Router {
    Router::new()
        .route("/", get(list_own_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(backend)
}

async fn list_own_items(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(page): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    backend
        .send(BackendRequest::get("/items").user(user_id).page(page))
        .await
}

async fn search_items(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    Query(search): Query<SearchQuery>,
    ValidatedQuery(page): ValidatedQuery<PageQuery>,
) -> Result<Response, AppError> {
    let mut request = BackendRequest::get("/items/search").user(user_id);
    if let Some(text) = search.text {
        request = request.query("text", text);
    }
    backend.send(request.page(page)).await
}

async fn get_item(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    backend
        .send(BackendRequest::get(format!("/items/{}", id)).user(user_id))
        .await
}

async fn create_item(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(body): ValidatedJson<NewItem>,
) -> Result<Response, AppError> {
    info!(owner_id = user_id, name = %body.name, "Creating item");
    backend
        .send(BackendRequest::post("/items").user(user_id).json(&body)?)
        .await
}

async fn update_item(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<ItemPatch>,
) -> Result<Response, AppError> {
    info!(item_id = id, user_id, "Updating item");
    backend
        .send(
            BackendRequest::patch(format!("/items/{}", id))
                .user(user_id)
                .json(&body)?,
        )
        .await
}

async fn add_comment(
    State(backend): State<BackendClient>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<NewComment>,
) -> Result<Response, AppError> {
    info!(item_id = id, author_id = user_id, "Adding comment");
    backend
        .send(
            BackendRequest::post(format!("/items/{}/comment", id))
                .user(user_id)
                .json(&body)?,
        )
        .await
}
