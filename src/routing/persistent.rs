//! Store-backed redirect resolver.
//!
//! # Responsibilities
//! - Resolve the request path against one partition of the durable store
//! - Delegate on partition miss, key miss, store error or timeout
//!
//! # Design Decisions
//! - The store handle is opened once at startup and shared, never per request
//! - Reads run on the blocking pool, bounded by a deadline
//! - Store failures are never visible to the client

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::http::{request as http_request, response};
use crate::observability::metrics;
use crate::routing::handler::{Handler, SharedHandler};
use crate::store::{Lookup, Store};

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct StoreResolver {
    name: String,
    store: Store,
    namespace: String,
    read_timeout: Duration,
    fallback: SharedHandler,
}

impl StoreResolver {
    pub fn new(store: Store, namespace: impl Into<String>, fallback: SharedHandler) -> Self {
        let namespace = namespace.into();
        Self {
            name: format!("store:{}", namespace),
            store,
            namespace,
            read_timeout: DEFAULT_READ_TIMEOUT,
            fallback,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, path: &str) -> Option<String> {
        let store = self.store.clone();
        let namespace = self.namespace.clone();
        let key = path.to_owned();
        let read = tokio::task::spawn_blocking(move || store.lookup(&namespace, &key));

        match tokio::time::timeout(self.read_timeout, read).await {
            Ok(Ok(Ok(Lookup::Found(url)))) => Some(url),
            Ok(Ok(Ok(Lookup::NoPartition))) => {
                tracing::debug!(namespace = %self.namespace, "Partition does not exist");
                metrics::record_resolution(&self.name, "miss");
                None
            }
            Ok(Ok(Ok(Lookup::NoKey))) => {
                metrics::record_resolution(&self.name, "miss");
                None
            }
            Ok(Ok(Err(e))) => {
                tracing::warn!(namespace = %self.namespace, path = %path, error = %e, "Store read failed");
                metrics::record_resolution(&self.name, "error");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(namespace = %self.namespace, path = %path, error = %e, "Store read task failed");
                metrics::record_resolution(&self.name, "error");
                None
            }
            Err(_) => {
                tracing::warn!(
                    namespace = %self.namespace,
                    path = %path,
                    timeout_ms = self.read_timeout.as_millis() as u64,
                    "Store read timed out"
                );
                metrics::record_resolution(&self.name, "error");
                None
            }
        }
    }
}

#[async_trait]
impl Handler for StoreResolver {
    async fn handle(&self, request: Request<Body>) -> Response {
        let path = http_request::lookup_path(request.uri().path()).into_owned();
        if let Some(url) = self.lookup(&path).await {
            tracing::debug!(source = %self.name, path = %path, url = %url, "Redirecting");
            metrics::record_resolution(&self.name, "hit");
            return response::found(&url);
        }

        self.fallback.handle(request).await
    }
}
