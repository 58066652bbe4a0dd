use axum::{
    Router,
    extract::State,
    response::Response,
    routing::get,
};
use axum_helpers::{AppError, IdPath, ValidatedJson};
use tracing::info;

use crate::client::{BackendClient, BackendRequest};
use crate::dto::{NewUser, UserPatch};

pub fn router(backend: BackendClient) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
        .with_state(backend)
}

async fn list_users(State(backend): State<BackendClient>) -> Result<Response, AppError> {
    backend.send(BackendRequest::get("/users")).await
}

async fn get_user(
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    backend.send(BackendRequest::get(format!("/users/{}", id))).await
}

async fn create_user(
    State(backend): State<BackendClient>,
    ValidatedJson(body): ValidatedJson<NewUser>,
) -> Result<Response, AppError> {
    info!(email = %body.email, "Creating user");
    backend.send(BackendRequest::post("/users").json(&body)?).await
}

async fn update_user(
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UserPatch>,
) -> Result<Response, AppError> {
    info!(user_id = id, "Updating user");
    backend
        .send(BackendRequest::patch(format!("/users/{}", id)).json(&body)?)
        .await
}

async fn delete_user(
    State(backend): State<BackendClient>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    info!(user_id = id, "Deleting user");
    backend.send(BackendRequest::delete(format!("/users/{}", id))).await
}
