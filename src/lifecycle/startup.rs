//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the durable store once, when a store source uses it, and apply seed entries
//! - Compose the handler chain from configuration
//! - Bind the listener only after everything above succeeded
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::collections::BTreeMap;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ServiceConfig, SourceConfig};
use crate::http::HttpServer;
use crate::routing::{chain, ChainError, SharedHandler};
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("handler chain error: {0}")]
    Chain(#[from] ChainError),
    #[error("failed to bind {address}: {error}")]
    Bind {
        address: String,
        #[source]
        error: std::io::Error,
    },
}

/// Whether any configured source reads from the durable store.
pub fn needs_store(config: &ServiceConfig) -> bool {
    config.sources.iter().any(|s| matches!(s, SourceConfig::Store { .. }))
}

/// Open the store (if a store source uses it) and write the configured seed entries.
///
/// Seeds alone never open or create the database file.
pub fn open_store(config: &ServiceConfig) -> Result<Option<Store>, StoreError> {
    if !needs_store(config) {
        if !config.store.seed.is_empty() {
            tracing::warn!(seeds = config.store.seed.len(), "Store seeds ignored: no store source configured");
        }
        return Ok(None);
    }

    let store = Store::open(&config.store.path)?;

    let mut by_namespace: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
    for seed in &config.store.seed {
        by_namespace
            .entry(seed.namespace.as_str())
            .or_default()
            .push((seed.path.as_str(), seed.url.as_str()));
    }
    for (namespace, entries) in by_namespace {
        let written = store.put_all(namespace, entries)?;
        tracing::info!(namespace = %namespace, entries = written, "Store seeded");
    }

    Ok(Some(store))
}

/// Open the store and compose the chain. Nothing is bound yet.
pub fn build_chain(config: &ServiceConfig) -> Result<SharedHandler, StartupError> {
    let store = open_store(config)?;
    let chain = chain::from_config(config, store.as_ref())?;
    Ok(chain)
}

/// Everything up to and including the bound listener.
pub async fn prepare(config: ServiceConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let chain = build_chain(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|error| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            error,
        })?;

    Ok((HttpServer::new(config, chain), listener))
}
