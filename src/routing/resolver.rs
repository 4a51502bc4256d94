//! In-memory redirect resolver.
//!
//! # Responsibilities
//! - Redirect when the request path is a key of the lookup table
//! - Otherwise pass the request, untouched, to the fallback handler
//! - Build tables from literal maps or declarative documents
//!
//! # Design Decisions
//! - Exact match on the percent-decoded URI path; the query string never takes part
//! - Table owned by the resolver, fallback shared with the rest of the chain

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::http::{request as http_request, response};
use crate::observability::metrics;
use crate::routing::document::{self, DocumentFormat, ParseError};
use crate::routing::handler::{Handler, SharedHandler};
use crate::routing::table::LookupTable;

/// Redirects mapped paths and delegates everything else.
#[derive(Debug)]
pub struct MapResolver {
    name: String,
    table: LookupTable,
    fallback: SharedHandler,
}

impl MapResolver {
    pub fn new(table: LookupTable, fallback: SharedHandler) -> Self {
        Self::named("map", table, fallback)
    }

    /// Same as [`MapResolver::new`] with an explicit label for logs and metrics.
    pub fn named(name: impl Into<String>, table: LookupTable, fallback: SharedHandler) -> Self {
        Self {
            name: name.into(),
            table,
            fallback,
        }
    }

    /// Parse a document and resolve against its records.
    pub fn from_document(format: DocumentFormat, raw: &[u8], fallback: SharedHandler) -> Result<Self, ParseError> {
        let records = document::parse(format, raw)?;
        let table = LookupTable::build(records);
        tracing::debug!(format = %format, entries = table.len(), "Built lookup table from document");
        Ok(Self::named(format.to_string(), table, fallback))
    }

    pub fn from_json(raw: &[u8], fallback: SharedHandler) -> Result<Self, ParseError> {
        Self::from_document(DocumentFormat::Json, raw, fallback)
    }

    pub fn from_yaml(raw: &[u8], fallback: SharedHandler) -> Result<Self, ParseError> {
        Self::from_document(DocumentFormat::Yaml, raw, fallback)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &LookupTable {
        &self.table
    }
}

#[async_trait]
impl Handler for MapResolver {
    async fn handle(&self, request: Request<Body>) -> Response {
        if let Some(url) = self.table.get(&http_request::lookup_path(request.uri().path())) {
            tracing::debug!(source = %self.name, path = %request.uri().path(), url = %url, "Redirecting");
            metrics::record_resolution(&self.name, "hit");
            return response::found(url);
        }

        metrics::record_resolution(&self.name, "miss");
        self.fallback.handle(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::DefaultHandler;
    use crate::routing::table::PathRecord;
    use axum::http::{header, StatusCode};
    use std::sync::Arc;

    fn get(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn body_of(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn base() -> SharedHandler {
        Arc::new(DefaultHandler::default())
    }

    #[tokio::test]
    async fn test_hit_redirects_to_table_value() {
        let table: LookupTable = [
            ("/urlshort-doc", "https://godoc.org/github.com/gophercises/urlshort"),
            ("/yaml-doc", "https://pkg.go.dev/gopkg.in/yaml.v2"),
        ]
        .into_iter()
        .collect();
        let resolver = MapResolver::new(table, base());

        for (path, url) in [
            ("/urlshort-doc", "https://godoc.org/github.com/gophercises/urlshort"),
            ("/yaml-doc", "https://pkg.go.dev/gopkg.in/yaml.v2"),
        ] {
            let res = resolver.handle(get(path)).await;
            assert_eq!(res.status(), StatusCode::FOUND);
            assert_eq!(res.headers()[header::LOCATION], url);
        }
    }

    #[tokio::test]
    async fn test_miss_delegates_unchanged() {
        let table: LookupTable = [("/urlshort-doc", "https://godoc.org/github.com/gophercises/urlshort")]
            .into_iter()
            .collect();
        let resolver = MapResolver::new(table, base());

        let res = resolver.handle(get("/")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::LOCATION).is_none());
        assert_eq!(body_of(res).await, "Hello, world!\n");
    }

    #[tokio::test]
    async fn test_query_string_is_not_part_of_path() {
        let table: LookupTable = [("/a", "https://a.example")].into_iter().collect();
        let resolver = MapResolver::new(table, base());

        let res = resolver.handle(get("/a?x=1")).await;
        assert_eq!(res.headers()[header::LOCATION], "https://a.example");

        let res = resolver.handle(get("/a/")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_encoded_path_matches_decoded_key() {
        let table: LookupTable = [("/café", "https://cafe.example"), ("/a b", "https://space.example")]
            .into_iter()
            .collect();
        let resolver = MapResolver::new(table, base());

        let res = resolver.handle(get("/caf%C3%A9")).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "https://cafe.example");

        let res = resolver.handle(get("/a%20b")).await;
        assert_eq!(res.headers()[header::LOCATION], "https://space.example");

        let res = resolver.handle(get("/caf%FF")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_json_document() {
        let raw = br#"[{"path":"/json","url":"https://golang.org/pkg/encoding/json/"}]"#;
        let resolver = MapResolver::from_json(raw, base()).unwrap();
        assert_eq!(resolver.name(), "json");

        let res = resolver.handle(get("/json")).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "https://golang.org/pkg/encoding/json/");

        let res = resolver.handle(get("/missing")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_of(res).await, "Hello, world!\n");
    }

    #[tokio::test]
    async fn test_yaml_document_duplicate_path() {
        let raw = b"- path: /dup\n  url: https://old.example\n- path: /dup\n  url: https://new.example\n";
        let resolver = MapResolver::from_yaml(raw, base()).unwrap();
        assert_eq!(resolver.table().len(), 1);

        let res = resolver.handle(get("/dup")).await;
        assert_eq!(res.headers()[header::LOCATION], "https://new.example");
    }

    #[test]
    fn test_malformed_document_fails_construction() {
        assert!(MapResolver::from_json(b"not json", base()).is_err());
        assert!(MapResolver::from_yaml(b"- path: [", base()).is_err());
    }

    #[tokio::test]
    async fn test_every_key_redirects_exactly() {
        let records: Vec<PathRecord> = (0..50)
            .map(|i| PathRecord::new(format!("/p{}", i), format!("https://example.com/{}", i)))
            .collect();
        let resolver = MapResolver::new(LookupTable::build(records), base());

        for i in 0..50 {
            let res = resolver.handle(get(&format!("/p{}", i))).await;
            assert_eq!(res.status(), StatusCode::FOUND);
            assert_eq!(res.headers()[header::LOCATION], format!("https://example.com/{}", i).as_str());
        }
        let res = resolver.handle(get("/p50")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
