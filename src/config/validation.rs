//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that every source is fully specified
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{DocumentConfig, ServiceConfig, SourceConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.store.read_timeout_ms == 0 {
        errors.push(ValidationError::new("store.read_timeout_ms", "must be greater than 0"));
    }

    let mut uses_store = false;

    for (i, seed) in config.store.seed.iter().enumerate() {
        if seed.namespace.is_empty() {
            errors.push(ValidationError::new(format!("store.seed[{}].namespace", i), "must not be empty"));
        }
        if seed.path.is_empty() {
            errors.push(ValidationError::new(format!("store.seed[{}].path", i), "must not be empty"));
        }
    }

    for (i, source) in config.sources.iter().enumerate() {
        match source {
            SourceConfig::Map { .. } => {}
            SourceConfig::Json(doc) | SourceConfig::Yaml(doc) => {
                validate_document(doc, &format!("sources[{}]", i), &mut errors);
            }
            SourceConfig::Store { namespace } => {
                uses_store = true;
                if namespace.is_empty() {
                    errors.push(ValidationError::new(format!("sources[{}].namespace", i), "must not be empty"));
                }
            }
        }
    }

    if uses_store && config.store.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("store.path", "required when a store source is configured"));
    }

    if config.observability.metrics_enabled && config.observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    match config.observability.log_format.as_str() {
        "pretty" | "json" => {}
        other => errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}', expected 'pretty' or 'json'", other),
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_document(doc: &DocumentConfig, field: &str, errors: &mut Vec<ValidationError>) {
    match (&doc.inline, &doc.file) {
        (Some(_), None) | (None, Some(_)) => {}
        (Some(_), Some(_)) => errors.push(ValidationError::new(field, "set only one of 'inline' or 'file'")),
        (None, None) => errors.push(ValidationError::new(field, "one of 'inline' or 'file' is required")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{SeedEntry, Sources};

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.sources = Sources(vec![
            SourceConfig::Json(DocumentConfig::default()),
            SourceConfig::Store { namespace: String::new() },
        ]);

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["listener.bind_address", "timeouts.request_secs", "sources[0]", "sources[1].namespace"]
        );
    }

    #[test]
    fn test_document_with_both_origins_rejected() {
        let mut config = ServiceConfig::default();
        config.sources = Sources(vec![SourceConfig::Yaml(DocumentConfig {
            inline: Some("[]".into()),
            file: Some("paths.yaml".into()),
        })]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "sources[0]");
    }

    #[test]
    fn test_store_path_required_for_store_source() {
        let mut config = ServiceConfig::default();
        config.sources = Sources(vec![SourceConfig::Store {
            namespace: "main".into(),
        }]);
        config.store.path = "".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "store.path");
    }

    #[test]
    fn test_seeds_without_store_source_need_no_path() {
        let mut config = ServiceConfig::default();
        config.sources = Sources(Vec::new());
        config.store.path = "".into();
        config.store.seed = vec![SeedEntry::new("main", "/a", "https://a.example")];

        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_store_path_optional_without_store() {
        let mut config = ServiceConfig::default();
        config.sources = Sources(Vec::new());
        config.store.path = "".into();
        config.store.seed.clear();

        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nope".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }
}
