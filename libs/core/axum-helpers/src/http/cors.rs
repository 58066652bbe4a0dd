use axum::http::{HeaderName, HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::extractors::USER_ID_HEADER;

/// Comma-separated list of allowed origins.
pub const CORS_ALLOWED_ORIGIN: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer for the given origins.
///
/// - Methods: GET, POST, PATCH, DELETE, OPTIONS
/// - Headers: Content-Type, Accept, X-Sharer-User-Id
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            HeaderName::from_static("x-sharer-user-id"),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Builds a CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Returns `Ok(None)` when the variable is unset: the API is then same-origin only.
/// An empty or unparsable value is an error.
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(origins_str) = std::env::var(CORS_ALLOWED_ORIGIN) else {
        return Ok(None);
    };

    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ALLOWED_ORIGIN, e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ALLOWED_ORIGIN),
        ));
    }

    tracing::info!(origins = %origins_str, header = USER_ID_HEADER, "CORS enabled");
    Ok(Some(create_cors_layer(allowed_origins)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_disables_cors() {
        temp_env::with_var_unset(CORS_ALLOWED_ORIGIN, || {
            assert!(cors_layer_from_env().unwrap().is_none());
        });
    }

    #[test]
    fn test_origin_list_enables_cors() {
        temp_env::with_var(
            CORS_ALLOWED_ORIGIN,
            Some("http://localhost:3000, https://shareit.example"),
            || {
                assert!(cors_layer_from_env().unwrap().is_some());
            },
        );
    }

    #[test]
    fn test_blank_value_is_error() {
        temp_env::with_var(CORS_ALLOWED_ORIGIN, Some(" , "), || {
            assert!(cors_layer_from_env().is_err());
        });
    }
}
