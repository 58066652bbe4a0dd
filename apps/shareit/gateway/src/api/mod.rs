use axum::Router;
use serde::Deserialize;
use validator::Validate;

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use crate::client::BackendClient;

/// Page size the gateway asks for when `size` is omitted.
pub const GATEWAY_PAGE_SIZE: i64 = 10;

fn default_size() -> i64 {
    GATEWAY_PAGE_SIZE
}

/// `from`/`size` as checked at the edge, always forwarded explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default)]
    #[validate(range(min = 0, message = "from must not be negative"))]
    pub from: i64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "size must be positive"))]
    pub size: i64,
}

/// The full public surface, validated here and relayed to the backend.
pub fn routes(backend: BackendClient) -> Router {
    Router::new()
        .nest("/users", users::router(backend.clone()))
        .nest("/items", items::router(backend.clone()))
        .nest("/requests", requests::router(backend.clone()))
        .nest("/bookings", bookings::router(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json,
        body::{Body, Bytes},
        extract::State,
        http::{HeaderMap, Method, Request, StatusCode, Uri},
        response::{IntoResponse, Response},
    };
    use axum_helpers::USER_ID_HEADER;
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Echoes every call back as JSON; ids ending in 999 answer 404.
    async fn echo(
        State(hits): State<Arc<AtomicUsize>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        hits.fetch_add(1, Ordering::SeqCst);

        let user = headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let status = if uri.path().ends_with("/999") {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::OK
        };

        (
            status,
            Json(json!({
                "method": method.as_str(),
                "path": uri.path(),
                "query": uri.query(),
                "user": user,
                "body": body,
            })),
        )
            .into_response()
    }

    struct Harness {
        app: Router,
        hits: Arc<AtomicUsize>,
    }

    async fn harness() -> Harness {
        let hits = Arc::new(AtomicUsize::new(0));
        let backend = Router::new().fallback(echo).with_state(hits.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });

        let client = BackendClient::new(
            &format!("http://{}", addr),
            std::time::Duration::from_secs(5),
        )
        .unwrap();

        Harness {
            app: routes(client),
            hits,
        }
    }

    fn request(method: Method, uri: &str, user: Option<i64>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user {
            builder = builder.header(USER_ID_HEADER, id.to_string());
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_user_is_forwarded() {
        let h = harness().await;
        let body = json!({"name": "Ann", "email": "ann@example.com"});

        let response = h
            .app
            .oneshot(request(Method::POST, "/users", None, Some(body.clone())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let echoed = json_body(response).await;
        assert_eq!(echoed["method"], "POST");
        assert_eq!(echoed["path"], "/users");
        assert_eq!(echoed["body"], body);
        assert_eq!(h.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_backend() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(
                Method::POST,
                "/users",
                None,
                Some(json!({"name": "Ann", "email": "not-an-email"})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "VALIDATION_ERROR");
        assert_eq!(h.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_default_page_is_forwarded() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(Method::GET, "/items", Some(3), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let echoed = json_body(response).await;
        assert_eq!(echoed["query"], "from=0&size=10");
        assert_eq!(echoed["user"], "3");
    }

    #[tokio::test]
    async fn test_bad_page_is_rejected() {
        let h = harness().await;

        for uri in ["/requests/all?size=0", "/requests/all?from=-1"] {
            let response = h
                .app
                .clone()
                .oneshot(request(Method::GET, uri, Some(1), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
        assert_eq!(h.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_state_is_rejected() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(Method::GET, "/bookings?state=SOMETIME", Some(1), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Unknown state: SOMETIME");
        assert_eq!(h.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_state_defaults_to_all() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(Method::GET, "/bookings/owner", Some(2), None))
            .await
            .unwrap();

        let echoed = json_body(response).await;
        assert_eq!(echoed["path"], "/bookings/owner");
        assert_eq!(echoed["query"], "state=ALL&from=0&size=10");
    }

    #[tokio::test]
    async fn test_missing_user_header_is_rejected() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(Method::GET, "/requests", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "MISSING_USER_ID");
        assert_eq!(h.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_booking_in_the_past_is_rejected() {
        let h = harness().await;
        let now = Utc::now().naive_utc();
        let body = json!({
            "itemId": 1,
            "start": (now - Duration::days(1)).format("%Y-%m-%dT%H:%M:%S").to_string(),
            "end": (now + Duration::days(1)).format("%Y-%m-%dT%H:%M:%S").to_string(),
        });

        let response = h
            .app
            .oneshot(request(Method::POST, "/bookings", Some(1), Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(h.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_booking_is_forwarded() {
        let h = harness().await;
        let now = Utc::now().naive_utc();
        let body = json!({
            "itemId": 1,
            "start": (now + Duration::days(1)).format("%Y-%m-%dT%H:%M:%S").to_string(),
            "end": (now + Duration::days(2)).format("%Y-%m-%dT%H:%M:%S").to_string(),
        });

        let response = h
            .app
            .oneshot(request(Method::POST, "/bookings", Some(4), Some(body.clone())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let echoed = json_body(response).await;
        assert_eq!(echoed["body"], body);
        assert_eq!(echoed["user"], "4");
    }

    #[tokio::test]
    async fn test_approval_is_forwarded_as_query() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(Method::PATCH, "/bookings/5?approved=true", Some(1), None))
            .await
            .unwrap();

        let echoed = json_body(response).await;
        assert_eq!(echoed["method"], "PATCH");
        assert_eq!(echoed["path"], "/bookings/5");
        assert_eq!(echoed["query"], "approved=true");
    }

    #[tokio::test]
    async fn test_backend_status_is_relayed() {
        let h = harness().await;

        let response = h
            .app
            .oneshot(request(Method::GET, "/users/999", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["path"], "/users/999");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_bad_gateway() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = BackendClient::new(
            &format!("http://{}", addr),
            std::time::Duration::from_secs(2),
        )
        .unwrap();

        let response = routes(client)
            .oneshot(request(Method::GET, "/users", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"], "BAD_GATEWAY");
    }
}
