//! HTTP client for the ShareIt backend.
//!
//! The gateway never interprets backend answers: status, `Content-Type` and
//! body are handed back to the caller as received.

use axum::{
    body::Body,
    http::{Method, header::CONTENT_TYPE},
    response::Response,
};
use axum_helpers::{AppError, USER_ID_HEADER};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api::PageQuery;

/// One call to relay to the backend.
#[derive(Debug)]
pub struct BackendRequest {
    method: Method,
    path: String,
    user_id: Option<i64>,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
}

impl BackendRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            user_id: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets `X-Sharer-User-Id` on the forwarded call.
    pub fn user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn page(self, page: PageQuery) -> Self {
        self.query("from", page.from).query("size", page.size)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, AppError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// reqwest-backed client bound to one backend base URL.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `request` and relays whatever the backend answered.
    ///
    /// # Errors
    /// `AppError::BadGateway` when the backend cannot be reached, times out or
    /// drops the connection mid-body.
    pub async fn send(&self, request: BackendRequest) -> Result<Response, AppError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, %url, "Forwarding to backend");

        let mut builder = self.http.request(request.method, &url);
        if let Some(user_id) = request.user_id {
            builder = builder.header(USER_ID_HEADER, user_id.to_string());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let upstream = builder.send().await.map_err(upstream_error)?;
        let status = upstream.status();
        let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
        let bytes = upstream.bytes().await.map_err(upstream_error)?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        if let Some(value) = content_type {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }

        Ok(response)
    }
}

fn upstream_error(e: reqwest::Error) -> AppError {
    warn!("Backend call failed: {}", e);
    AppError::BadGateway("Upstream service unavailable".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = BackendClient::new("http://localhost:9090/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9090");
    }

    #[test]
    fn test_request_builder_collects_query_and_user() {
        let request = BackendRequest::get("/bookings")
            .user(7)
            .query("state", "ALL")
            .page(PageQuery { from: 0, size: 10 });

        assert_eq!(request.user_id, Some(7));
        assert_eq!(
            request.query,
            vec![
                ("state", "ALL".to_string()),
                ("from", "0".to_string()),
                ("size", "10".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }
}
