//! Handler chain composition.
//!
//! # Responsibilities
//! - Wire resolvers together in precedence order over a base handler
//! - Translate configured sources into resolver factories
//! - Abort composition on the first failing factory
//!
//! # Design Decisions
//! - Factories are listed outermost first and applied innermost first
//! - A failed factory drops everything built so far; no partial chains

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::{DocumentConfig, ServiceConfig, SourceConfig};
use crate::routing::document::{DocumentFormat, ParseError};
use crate::routing::handler::{DefaultHandler, SharedHandler};
use crate::routing::persistent::StoreResolver;
use crate::routing::resolver::MapResolver;
use crate::routing::table::LookupTable;
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("{source_label}: {error}")]
    Parse {
        source_label: String,
        #[source]
        error: ParseError,
    },
    #[error("failed to read document {}: {error}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("store source '{0}' configured but no store is open")]
    StoreUnavailable(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Builds one chain link around the handler it should fall back to.
pub type ResolverFactory = Box<dyn FnOnce(SharedHandler) -> Result<SharedHandler, ChainError> + Send>;

/// Compose `factories` (highest precedence first) over `base`.
///
/// The last factory wraps `base` directly; the first one becomes the
/// outermost handler and sees every request first.
pub fn compose<I>(base: SharedHandler, factories: I) -> Result<SharedHandler, ChainError>
where
    I: IntoIterator<Item = ResolverFactory>,
{
    let factories: Vec<ResolverFactory> = factories.into_iter().collect();
    let mut handler = base;
    for factory in factories.into_iter().rev() {
        handler = factory(handler)?;
    }
    Ok(handler)
}

/// Factory for an in-memory table.
pub fn map_factory(name: impl Into<String>, table: LookupTable) -> ResolverFactory {
    let name = name.into();
    Box::new(move |fallback: SharedHandler| -> Result<SharedHandler, ChainError> {
        Ok(Arc::new(MapResolver::named(name, table, fallback)))
    })
}

/// Factory for a declarative document already held in memory.
pub fn document_factory(format: DocumentFormat, raw: Vec<u8>) -> ResolverFactory {
    Box::new(move |fallback: SharedHandler| -> Result<SharedHandler, ChainError> {
        let resolver = MapResolver::from_document(format, &raw, fallback).map_err(|error| ChainError::Parse {
            source_label: format.to_string(),
            error,
        })?;
        Ok(Arc::new(resolver))
    })
}

/// Factory for a store partition.
pub fn store_factory(store: Store, namespace: impl Into<String>, read_timeout: Duration) -> ResolverFactory {
    let namespace = namespace.into();
    Box::new(move |fallback: SharedHandler| -> Result<SharedHandler, ChainError> {
        Ok(Arc::new(StoreResolver::new(store, namespace, fallback).with_read_timeout(read_timeout)))
    })
}

/// Build the full chain described by `config`.
///
/// `store` must be provided when any store source is configured.
pub fn from_config(config: &ServiceConfig, store: Option<&Store>) -> Result<SharedHandler, ChainError> {
    let base: SharedHandler = Arc::new(DefaultHandler::new(config.fallback.body.clone()));
    let read_timeout = Duration::from_millis(config.store.read_timeout_ms);

    let mut factories = Vec::with_capacity(config.sources.len());
    for source in config.sources.iter() {
        let factory = match source {
            SourceConfig::Map { paths } => map_factory(
                "map",
                paths.iter().map(|(path, url)| (path.as_str(), url.as_str())).collect(),
            ),
            SourceConfig::Json(doc) => document_factory(DocumentFormat::Json, read_document(doc)?),
            SourceConfig::Yaml(doc) => document_factory(DocumentFormat::Yaml, read_document(doc)?),
            SourceConfig::Store { namespace } => {
                let store = store.ok_or_else(|| ChainError::StoreUnavailable(namespace.clone()))?;
                store_factory(store.clone(), namespace.clone(), read_timeout)
            }
        };
        tracing::debug!(source = %source.label(), "Chain source registered");
        factories.push(factory);
    }

    let chain = compose(base, factories)?;
    tracing::info!(sources = config.sources.len(), "Handler chain composed");
    Ok(chain)
}

fn read_document(doc: &DocumentConfig) -> Result<Vec<u8>, ChainError> {
    match (&doc.inline, &doc.file) {
        (Some(text), _) => Ok(text.clone().into_bytes()),
        (None, Some(path)) => fs::read(path).map_err(|error| ChainError::Document {
            path: path.clone(),
            error,
        }),
        (None, None) => Ok(Vec::new()),
    }
}
