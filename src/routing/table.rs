//! Path records and the lookup table built from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One `path → url` mapping as it appears in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathRecord {
    pub path: String,
    pub url: String,
}

impl PathRecord {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Exact-match table from request path to destination URL.
///
/// Immutable once built; resolvers share it across requests without locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<String, String>,
}

impl LookupTable {
    /// Fold records into a table. A later record for the same path replaces an earlier one.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PathRecord>,
    {
        let mut entries = HashMap::new();
        for record in records {
            entries.insert(record.path, record.url);
        }
        Self { entries }
    }

    /// Destination for `path`, if mapped.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<PathRecord> for LookupTable {
    fn from_iter<I: IntoIterator<Item = PathRecord>>(iter: I) -> Self {
        Self::build(iter)
    }
}

impl<K, V> FromIterator<(K, V)> for LookupTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::build(iter.into_iter().map(|(path, url)| PathRecord::new(path, url)))
    }
}
