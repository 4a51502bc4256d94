//! Declarative path documents (JSON and YAML).
//!
//! Both formats carry a top-level list of records with exactly two string
//! fields, `path` and `url`. Record order is preserved so the table builder
//! can apply last-write-wins.

use std::fmt;

use thiserror::Error;

use crate::routing::table::PathRecord;

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            DocumentFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// A document could not be decoded into path records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Decode `raw` into an ordered list of records.
pub fn parse(format: DocumentFormat, raw: &[u8]) -> Result<Vec<PathRecord>, ParseError> {
    match format {
        DocumentFormat::Json => parse_json(raw),
        DocumentFormat::Yaml => parse_yaml(raw),
    }
}

pub fn parse_json(raw: &[u8]) -> Result<Vec<PathRecord>, ParseError> {
    Ok(serde_json::from_slice(raw)?)
}

pub fn parse_yaml(raw: &[u8]) -> Result<Vec<PathRecord>, ParseError> {
    Ok(serde_yaml::from_slice(raw)?)
}
