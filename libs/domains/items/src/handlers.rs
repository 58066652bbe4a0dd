use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use axum_helpers::{
    IdPath, PageParams, SharerUserId, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{
    CommentResponse, CreateComment, CreateItem, ItemResponse, LinkedBooking, SearchQuery,
    UpdateItem,
};
use crate::repository::ItemRepository;
use crate::service::ItemService;

pub const TAG: &str = "items";

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, search_items, get_item, update_item, add_comment),
    components(
        schemas(
            CreateItem,
            UpdateItem,
            ItemResponse,
            LinkedBooking,
            CreateComment,
            CommentResponse
        ),
        responses(NotFoundResponse, BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags((name = TAG, description = "Item catalog and comments"))
)]
pub struct ApiDoc;

/// Items router, to be nested under `/items`.
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(shared_service)
}

/// The caller's items ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner"), PageParams),
    responses(
        (status = 200, description = "Owned items", body = Vec<ItemResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    Ok(Json(service.list_own_items(user_id, page).await?))
}

/// Add an item to the catalog
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Owner")),
    request_body = CreateItem,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<Json<ItemResponse>> {
    Ok(Json(service.create_item(user_id, input).await?))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller"),
        SearchQuery,
        PageParams
    ),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<SearchQuery>,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> ItemResult<Json<Vec<ItemResponse>>> {
    Ok(Json(
        service.search(user_id, query.text.as_deref(), page).await?,
    ))
}

/// Get an item with its comments
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Caller"),
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found; bookings included for the owner", body = ItemResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> ItemResult<Json<ItemResponse>> {
    Ok(Json(service.get_item(user_id, id).await?))
}

/// Partially update an owned item
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<ItemResponse>> {
    Ok(Json(service.update_item(user_id, id, input).await?))
}

/// Comment on an item after a finished booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Author"),
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_comment<R: ItemRepository>(
    State(service): State<Arc<ItemService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<Json<CommentResponse>> {
    Ok(Json(service.add_comment(user_id, id, input).await?))
}
