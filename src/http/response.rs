//! Response construction.
//!
//! # Responsibilities
//! - Build `302 Found` redirects with a `Location` header
//! - Escape targets so they can always be carried in a header
//!
//! # Design Decisions
//! - Destinations are opaque: no URL parsing, no normalization
//! - Only control characters and non-ASCII bytes are percent-encoded; existing
//!   escapes are left alone
//! - Redirect bodies are empty

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::{utf8_percent_encode, CONTROLS};

/// `302 Found` pointing at `url`.
///
/// Non-ASCII and control bytes are percent-encoded before the target is
/// placed in `Location`.
pub fn found(url: &str) -> Response {
    let escaped = utf8_percent_encode(url, CONTROLS).to_string();
    match HeaderValue::from_str(&escaped) {
        Ok(location) => {
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::FOUND;
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        Err(e) => {
            tracing::error!(url = %url.escape_debug(), error = %e, "Redirect target is not a valid header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect target").into_response()
        }
    }
}
