//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.
//! The defaults reproduce the stock deployment: a persistent store in front
//! of a JSON document, a YAML document and a small in-memory map.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Durable store location and seed data.
    pub store: StoreConfig,

    /// Response produced when no source resolves a path.
    pub fallback: FallbackConfig,

    /// Redirect sources in precedence order (first entry is tried first).
    pub sources: Sources,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration for request handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Durable key-value store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the database file. Created if missing.
    pub path: PathBuf,

    /// Upper bound on a single read transaction, in milliseconds.
    pub read_timeout_ms: u64,

    /// Entries written into the store at startup.
    pub seed: Vec<SeedEntry>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("path.db"),
            read_timeout_ms: 500,
            seed: vec![
                SeedEntry::new("main", "/bolt", "https://github.com/boltdb/bolt"),
                SeedEntry::new(
                    "main",
                    "/intro",
                    "https://npf.io/2014/07/intro-to-boltdb-painless-performant-persistence/",
                ),
            ],
        }
    }
}

/// A single seeded store entry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SeedEntry {
    /// Partition the entry is written into.
    pub namespace: String,
    pub path: String,
    pub url: String,
}

impl SeedEntry {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Base handler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Body of the `200 OK` answer for unmapped paths.
    pub body: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            body: "Hello, world!\n".to_string(),
        }
    }
}

/// Ordered list of redirect sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sources(pub Vec<SourceConfig>);

impl Default for Sources {
    fn default() -> Self {
        Self(vec![
            SourceConfig::Store {
                namespace: "main".to_string(),
            },
            SourceConfig::Json(DocumentConfig::inline(
                r#"[
    {
        "path": "/golang",
        "url": "https://en.wikipedia.org/wiki/Go_(programming_language)"
    },
    {
        "path": "/json",
        "url": "https://golang.org/pkg/encoding/json/"
    }
]"#,
            )),
            SourceConfig::Yaml(DocumentConfig::inline(
                "- path: /urlshort\n  url: https://github.com/gophercises/urlshort\n\
                 - path: /urlshort-final\n  url: https://github.com/gophercises/urlshort/tree/solution\n",
            )),
            SourceConfig::Map {
                paths: BTreeMap::from([
                    (
                        "/urlshort-doc".to_string(),
                        "https://godoc.org/github.com/gophercises/urlshort".to_string(),
                    ),
                    (
                        "/yaml-doc".to_string(),
                        "https://pkg.go.dev/gopkg.in/yaml.v2".to_string(),
                    ),
                ]),
            },
        ])
    }
}

impl Sources {
    pub fn iter(&self) -> std::slice::Iter<'_, SourceConfig> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One redirect source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Literal path table.
    Map {
        #[serde(default)]
        paths: BTreeMap<String, String>,
    },
    /// JSON document of `{path, url}` records.
    Json(DocumentConfig),
    /// YAML document of `{path, url}` records.
    Yaml(DocumentConfig),
    /// Partition of the durable store.
    Store { namespace: String },
}

impl SourceConfig {
    /// Short label used in logs and metrics.
    pub fn label(&self) -> String {
        match self {
            SourceConfig::Map { .. } => "map".to_string(),
            SourceConfig::Json(_) => "json".to_string(),
            SourceConfig::Yaml(_) => "yaml".to_string(),
            SourceConfig::Store { namespace } => format!("store:{}", namespace),
        }
    }
}

/// Where a declarative document comes from. Exactly one field must be set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Document text embedded in the config.
    pub inline: Option<String>,

    /// Path of a file holding the document.
    pub file: Option<PathBuf>,
}

impl DocumentConfig {
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            inline: Some(text.into()),
            file: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            inline: None,
            file: Some(path.into()),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
