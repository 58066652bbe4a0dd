use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    IdPath, PageParams, SharerUserId, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, MissingUserIdResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RequestResult;
use crate::models::{CreateItemRequest, ItemRequestResponse, RequestItem};
use crate::repository::RequestRepository;
use crate::service::RequestService;

pub const TAG: &str = "requests";

/// OpenAPI documentation for the Item Requests API
#[derive(OpenApi)]
#[openapi(
    paths(create_request, list_own_requests, list_other_requests, get_request),
    components(
        schemas(CreateItemRequest, ItemRequestResponse, RequestItem),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            MissingUserIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Requests for items nobody offers yet"))
)]
pub struct ApiDoc;

/// Requests router, to be nested under `/requests`.
pub fn router<R: RequestRepository + 'static>(service: RequestService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own_requests).post(create_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

/// Post a new item request
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    params(("X-Sharer-User-Id" = i64, Header, description = "Requesting user")),
    request_body = CreateItemRequest,
    responses(
        (status = 200, description = "Request created", body = ItemRequestResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> RequestResult<Json<ItemRequestResponse>> {
    Ok(Json(service.create_request(user_id, input).await?))
}

/// The caller's own requests, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requesting user"),
        PageParams
    ),
    responses(
        (status = 200, description = "Own requests with answering items", body = Vec<ItemRequestResponse>),
        (status = 400, response = MissingUserIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_own_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> RequestResult<Json<Vec<ItemRequestResponse>>> {
    Ok(Json(service.list_own_requests(user_id, page).await?))
}

/// Requests posted by everyone else, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requesting user"),
        PageParams
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_other_requests<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    ValidatedQuery(page): ValidatedQuery<PageParams>,
) -> RequestResult<Json<Vec<ItemRequestResponse>>> {
    Ok(Json(service.list_other_requests(user_id, page).await?))
}

/// Get one request with its answering items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requesting user"),
        ("id" = i64, Path, description = "Request id")
    ),
    responses(
        (status = 200, description = "Request found", body = ItemRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_request<R: RequestRepository>(
    State(service): State<Arc<RequestService<R>>>,
    SharerUserId(user_id): SharerUserId,
    IdPath(id): IdPath,
) -> RequestResult<Json<ItemRequestResponse>> {
    Ok(Json(service.get_request(user_id, id).await?))
}
