//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router that sends every request into the handler chain
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Record per-request metrics
//! - Stop on shutdown broadcast or OS signal

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{RequestIdExt, X_REQUEST_ID};
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::routing::SharedHandler;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: SharedHandler,
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `chain`.
    pub fn new(config: ServiceConfig, chain: SharedHandler) -> Self {
        let state = AppState { chain };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .fallback(redirect_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            sources = self.config.sources.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                    _ = signals::shutdown_signal() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Entry point for every request: hand it to the chain.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_owned();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Resolving request"
    );

    let response = state.chain.handle(request).await;
    let status = response.status();

    tracing::debug!(request_id = %request_id, path = %path, status = %status, "Request resolved");
    metrics::record_request(status.as_u16(), start_time);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{chain, DefaultHandler, LookupTable};
    use axum::http::{header, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let table: LookupTable = [("/urlshort-doc", "https://godoc.org/github.com/gophercises/urlshort")]
            .into_iter()
            .collect();
        let chain = chain::compose(
            Arc::new(DefaultHandler::default()),
            vec![chain::map_factory("map", table)],
        )
        .unwrap();
        HttpServer::new(ServiceConfig::default(), chain)
    }

    #[tokio::test]
    async fn test_redirect_through_router() {
        let req = Request::builder().uri("/urlshort-doc").body(Body::empty()).unwrap();
        let res = server().router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "https://godoc.org/github.com/gophercises/urlshort");
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_any_method_and_nested_path_fall_through() {
        let req = Request::builder()
            .method("POST")
            .uri("/deeply/nested/path")
            .body(Body::empty())
            .unwrap();
        let res = server().router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello, world!\n");
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let res = server().router().oneshot(req).await.unwrap();

        assert_eq!(res.headers()["x-request-id"], "req-42");
    }
}
