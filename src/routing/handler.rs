//! The request handler capability shared by every link of the chain.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};

/// Anything that can answer a request.
///
/// Resolvers hold the next link as an `Arc<dyn Handler>` and hand the request
/// over unchanged when they cannot resolve it, so any handler can serve as
/// any other handler's fallback.
#[async_trait]
pub trait Handler: Send + Sync + fmt::Debug {
    async fn handle(&self, request: Request<Body>) -> Response;
}

/// Shared handle to a chain link.
pub type SharedHandler = Arc<dyn Handler>;

/// Terminal handler: answers every request with `200 OK` and a fixed body.
#[derive(Debug, Clone)]
pub struct DefaultHandler {
    body: String,
}

impl DefaultHandler {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new("Hello, world!\n")
    }
}

#[async_trait]
impl Handler for DefaultHandler {
    async fn handle(&self, _request: Request<Body>) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body.clone(),
        )
            .into_response()
    }
}
