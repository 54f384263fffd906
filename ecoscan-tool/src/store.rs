use std::path::{Path, PathBuf};

use ecoscan_core::{ActivityStore, StoreOptions};
use ecoscan_rocks::{RocksBackend, RocksError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("failed to open store at {}: {source}", path.display())]
pub struct OpenError {
    path: PathBuf,
    #[source]
    source: RocksError,
}

pub struct AppContext {
    pub store: ActivityStore<RocksBackend>,
}

impl AppContext {
    pub fn open(store_path: &Path, options: StoreOptions) -> Result<Self, OpenError> {
        if let Some(parent) = store_path.parent() {
            // RocksDB creates the leaf directory but not its parents.
            let _ = std::fs::create_dir_all(parent);
        }
        let backend = RocksBackend::open(store_path).map_err(|source| OpenError {
            path: store_path.to_path_buf(),
            source,
        })?;
        debug!(path = %store_path.display(), ?options, "opened store");
        let store = ActivityStore::new(backend).with_options(options);

        Ok(Self { store })
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ecoscan")
        .join("store")
}
