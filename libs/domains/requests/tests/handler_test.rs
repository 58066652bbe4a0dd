//! Handler tests for the Item Requests domain.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_requests::*;
use domain_users::{CreateUser, InMemoryUserRepository, UserRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// Answers every request id with one item owned by user 2.
struct OneItemPerRequest;

#[async_trait]
impl RequestItemsSource for OneItemPerRequest {
    async fn items_for_requests(&self, request_ids: &[i64]) -> RequestResult<Vec<RequestItem>> {
        Ok(request_ids
            .iter()
            .map(|&request_id| RequestItem {
                id: 100 + request_id,
                name: "Drill".to_string(),
                description: "Cordless".to_string(),
                available: true,
                request_id,
                owner_id: 2,
            })
            .collect())
    }
}

async fn app() -> Router {
    let users = InMemoryUserRepository::new();
    for who in ["ann", "bob"] {
        users
            .create(CreateUser {
                name: who.to_string(),
                email: format!("{}@example.com", who),
            })
            .await
            .unwrap();
    }

    let service = RequestService::new(
        InMemoryRequestRepository::new(),
        Arc::new(users),
        Arc::new(OneItemPerRequest),
    );
    handlers::router(service)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(user: i64, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header("X-Sharer-User-Id", user.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(user: i64, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-Sharer-User-Id", user.to_string())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_request_returns_camel_case_body() {
    let response = app()
        .await
        .oneshot(post(1, json!({"description": "Need a drill"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["description"], "Need a drill");
    assert!(body["created"].is_string());
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn test_create_without_header_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(json!({"description": "x"}).to_string()))
        .unwrap();

    let response = app().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_for_unknown_user_is_404() {
    let response = app()
        .await
        .oneshot(post(42, json!({"description": "Need a drill"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_description_is_400() {
    let response = app()
        .await
        .oneshot(post(1, json!({"description": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_request_attaches_items() {
    let app = app().await;
    app.clone()
        .oneshot(post(1, json!({"description": "Need a drill"})))
        .await
        .unwrap();

    let response = app.oneshot(get(2, "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["items"][0]["id"], 101);
    assert_eq!(body["items"][0]["requestId"], 1);
    assert_eq!(body["items"][0]["ownerId"], 2);
}

#[tokio::test]
async fn test_all_excludes_own_requests_and_pages() {
    let app = app().await;
    for text in ["first", "second"] {
        app.clone()
            .oneshot(post(2, json!({"description": text})))
            .await
            .unwrap();
    }
    app.clone()
        .oneshot(post(1, json!({"description": "mine"})))
        .await
        .unwrap();

    let response = app.clone().oneshot(get(1, "/all")).await.unwrap();
    let all = json_body(response.into_body()).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let response = app.oneshot(get(1, "/all?from=0&size=1")).await.unwrap();
    let page = json_body(response.into_body()).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_negative_from_is_400() {
    let response = app().await.oneshot(get(1, "/?from=-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_request_is_404() {
    let response = app().await.oneshot(get(1, "/77")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
