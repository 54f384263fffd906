//! RocksDB-backed persistence for EcoScan activity logs.

use std::path::Path;

use ecoscan_core::Backend;
use rocksdb::{DB, Options};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RocksError {
    #[error("RocksDB error: {0}")]
    Db(#[from] rocksdb::Error),
    #[error("value under key {0} is not valid UTF-8")]
    NotUtf8(String),
}

/// A persistent backend backed by RocksDB.
pub struct RocksBackend {
    db: DB,
}

impl RocksBackend {
    /// Opens a RocksDB backend at the given path.
    ///
    /// Creates the database if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RocksError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db })
    }
}

impl Backend for RocksBackend {
    type Error = RocksError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| RocksError::NotUtf8(key.to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.db.put(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }
}
