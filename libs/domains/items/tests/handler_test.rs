//! Handler tests for the Items domain.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use domain_bookings::{BookingRepository, BookingStatus, InMemoryBookingRepository, NewBooking};
use domain_items::*;
use domain_requests::InMemoryRequestRepository;
use domain_users::{CreateUser, InMemoryUserRepository, UserRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const OWNER: i64 = 1;
const BOOKER: i64 = 2;

async fn app_with(bookings: InMemoryBookingRepository) -> Router {
    let users = InMemoryUserRepository::new();
    for who in ["Owner", "Booker"] {
        users
            .create(CreateUser {
                name: who.to_string(),
                email: format!("{}@example.com", who.to_lowercase()),
            })
            .await
            .unwrap();
    }

    let service = ItemService::new(
        InMemoryItemRepository::new(),
        Arc::new(users),
        Arc::new(InMemoryRequestRepository::new()),
        Arc::new(bookings),
    );
    handlers::router(service)
}

async fn app() -> Router {
    app_with(InMemoryBookingRepository::new()).await
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, user: i64, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Sharer-User-Id", user.to_string());

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn create(app: &Router, name: &str, description: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/",
            OWNER,
            Some(json!({"name": name, "description": description, "available": true})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_item_response_shape() {
    let app = app().await;
    let item = create(&app, "Drill", "Cordless drill").await;

    assert_eq!(
        item,
        json!({
            "id": 1,
            "name": "Drill",
            "description": "Cordless drill",
            "available": true,
            "requestId": null,
            "comments": [],
            "lastBooking": null,
            "nextBooking": null
        })
    );
}

#[tokio::test]
async fn test_create_without_available_is_400() {
    let response = app()
        .await
        .oneshot(request(
            "POST",
            "/",
            OWNER,
            Some(json!({"name": "Drill", "description": "x"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_for_unknown_user_is_404() {
    let response = app()
        .await
        .oneshot(request(
            "POST",
            "/",
            99,
            Some(json!({"name": "Drill", "description": "x", "available": true})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_by_non_owner_is_404() {
    let app = app().await;
    create(&app, "Drill", "x").await;

    let response = app
        .oneshot(request("PATCH", "/1", BOOKER, Some(json!({"name": "Mine"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_blank_name_is_400() {
    let app = app().await;
    create(&app, "Drill", "x").await;

    let response = app
        .oneshot(request("PATCH", "/1", OWNER, Some(json!({"name": "  "}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_matches_name_or_description() {
    let app = app().await;
    create(&app, "Book", "Read book").await;
    create(&app, "Pen", "Write pen").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/search?text=book", BOOKER, None))
        .await
        .unwrap();
    let found = json_body(response.into_body()).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Book");

    let response = app
        .oneshot(request("GET", "/search?text=", BOOKER, None))
        .await
        .unwrap();
    assert_eq!(json_body(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_list_own_items_paged() {
    let app = app().await;
    for name in ["a", "b", "c"] {
        create(&app, name, "x").await;
    }

    let response = app
        .oneshot(request("GET", "/?from=1&size=1", OWNER, None))
        .await
        .unwrap();
    let page = json_body(response.into_body()).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["name"], "b");
}

#[tokio::test]
async fn test_comment_flow() {
    let bookings = InMemoryBookingRepository::new();
    let app = app_with(bookings.clone()).await;
    create(&app, "Drill", "x").await;

    let comment = json!({"text": "Works great"});
    let response = app
        .clone()
        .oneshot(request("POST", "/1/comment", BOOKER, Some(comment.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let now = Utc::now().naive_utc();
    let booking = bookings
        .create(NewBooking {
            item_id: 1,
            booker_id: BOOKER,
            start: now - Duration::hours(3),
            end: now - Duration::hours(1),
        })
        .await
        .unwrap();
    bookings
        .set_status_if_waiting(booking.id, BookingStatus::Approved)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request("POST", "/1/comment", BOOKER, Some(comment)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response.into_body()).await;
    assert_eq!(created["authorName"], "Booker");
    assert_eq!(created["text"], "Works great");

    let response = app.oneshot(request("GET", "/1", OWNER, None)).await.unwrap();
    let item = json_body(response.into_body()).await;
    assert_eq!(item["comments"][0]["id"], created["id"]);
    assert_eq!(item["lastBooking"]["id"], booking.id);
    assert_eq!(item["lastBooking"]["bookerId"], BOOKER);
    assert_eq!(item["lastBooking"]["status"], "APPROVED");
}

#[tokio::test]
async fn test_get_unknown_item_is_404() {
    let response = app()
        .await
        .oneshot(request("GET", "/5", OWNER, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
