use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::RwLock;

/// A durable string key-value store.
///
/// Backends know nothing about records or logs: values are opaque encoded
/// lists, and encoding/decoding is handled by [`crate::ActivityStore`].
/// There are no transactions and no atomic multi-key writes.
///
/// All methods take `&self` to support backends with internal locking (e.g., RocksDB).
pub trait Backend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieves the value stored under a key, or None if absent.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Stores a value under the given key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// An in-memory backend backed by a HashMap.
///
/// Useful for testing and as a reference implementation. Values do not
/// survive the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with the given entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }
}

impl Backend for MemoryBackend {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
