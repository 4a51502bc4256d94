//! Request identification.
//!
//! # Responsibilities
//! - Name the request ID header shared by the ID layers
//! - Read the ID back out of a request for logging
//! - Decode the request path into the form used as a lookup key
//!
//! # Design Decisions
//! - IDs are UUID v4, assigned by `SetRequestIdLayer` before tracing starts
//! - An ID supplied by the client is kept as-is
//! - The same ID is echoed on the response by `PropagateRequestIdLayer`

use std::borrow::Cow;

use axum::http::{HeaderName, Request};
use percent_encoding::percent_decode_str;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Access to the request ID header.
pub trait RequestIdExt {
    /// The request ID, or `"unknown"` if none was assigned.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Percent-decoded form of a URI path, used as the lookup key.
///
/// Paths whose decoded bytes are not UTF-8 are returned unchanged.
pub fn lookup_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8().unwrap_or(Cow::Borrowed(path))
}
