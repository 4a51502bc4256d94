//! Redb-backed partitioned key-value store.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, TableError};
use thiserror::Error;

use crate::observability::metrics;

type Partition<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store: {0}")]
    Open(#[from] redb::DatabaseError),
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),
    #[error("partition error: {0}")]
    Partition(#[from] TableError),
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

/// Result of a single key lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    NoPartition,
    NoKey,
}

/// Shared handle to the on-disk store.
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Open the database at `path`, creating the file if needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let db = Database::create(path)?;
        tracing::info!(path = %path.display(), "Store opened");
        Ok(Self { db: Arc::new(db) })
    }

    /// Look up `key` in `namespace` inside a read-only transaction.
    pub fn lookup(&self, namespace: &str, key: &str) -> Result<Lookup, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(Partition::new(namespace)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Lookup::NoPartition),
            Err(e) => return Err(e.into()),
        };

        Ok(match table.get(key.as_bytes())? {
            Some(value) => Lookup::Found(String::from_utf8_lossy(value.value()).into_owned()),
            None => Lookup::NoKey,
        })
    }

    /// Write entries into `namespace`, creating the partition if absent.
    pub fn put_all<'a, I>(&self, namespace: &str, entries: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let write_txn = self.db.begin_write()?;
        let mut written = 0;
        {
            let mut table = write_txn.open_table(Partition::new(namespace))?;
            for (key, value) in entries {
                table.insert(key.as_bytes(), value.as_bytes())?;
                written += 1;
            }
        }
        write_txn.commit()?;

        metrics::record_seeded(namespace, written);
        Ok(written)
    }

    pub fn put(&self, namespace: &str, key: &str, value: &str) -> Result<(), StoreError> {
        self.put_all(namespace, [(key, value)]).map(|_| ())
    }

    /// Every entry of `namespace` in key order. Empty when the partition is absent.
    pub fn entries(&self, namespace: &str) -> Result<Vec<(String, String)>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(Partition::new(namespace)) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in table.iter()? {
            let (k, v) = item?;
            entries.push((
                String::from_utf8_lossy(k.value()).into_owned(),
                String::from_utf8_lossy(v.value()).into_owned(),
            ));
        }
        Ok(entries)
    }
}
