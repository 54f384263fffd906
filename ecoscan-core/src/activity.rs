use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::async_backend::AsyncBackend;
use crate::clock::{Clock, SystemClock};
use crate::entry::{ActivityEntry, merge_feed};
use crate::error::ActivityError;
use crate::record::{ActivityKind, LocationRecord, PhotoRecord, ScanRecord};

/// Reference returned for a photo that has neither title nor description.
pub const UNTITLED_PHOTO: &str = "Untitled photo";

/// The three fixed backend keys, one per log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKey {
    Scans,
    Photos,
    Locations,
}

impl LogKey {
    /// All logs, in the order `clear_all` writes them.
    pub const ALL: [LogKey; 3] = [LogKey::Scans, LogKey::Photos, LogKey::Locations];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogKey::Scans => "historial_escaneos",
            LogKey::Photos => "historial_fotos",
            LogKey::Locations => "historial_ubicaciones",
        }
    }

    fn index(&self) -> usize {
        match self {
            LogKey::Scans => 0,
            LogKey::Photos => 1,
            LogKey::Locations => 2,
        }
    }
}

/// Tuning for an [`ActivityStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Hold a per-log lock across each read-modify-write cycle.
    ///
    /// Off by default: concurrent appends to the same log may then drop a
    /// record (last writer wins).
    pub serialize_appends: bool,
}

/// Append-only storage of scans, photos and locations over a string backend.
///
/// Each log is stored as one JSON list under its [`LogKey`]. A missing key
/// reads as an empty log; a present but undecodable value is
/// [`ActivityError::CorruptStore`].
pub struct ActivityStore<B, C = SystemClock> {
    backend: B,
    clock: C,
    options: StoreOptions,
    locks: [Mutex<()>; 3],
}

impl<B: AsyncBackend> ActivityStore<B> {
    /// Creates a store stamping records with wall-clock time.
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: AsyncBackend, C: Clock> ActivityStore<B, C> {
    pub fn with_clock(backend: B, clock: C) -> Self {
        ActivityStore {
            backend,
            clock,
            options: StoreOptions::default(),
            locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Appends a scan with the current time.
    pub async fn append_scan(&self, content: &str) -> Result<ScanRecord, ActivityError> {
        let record = ScanRecord {
            content: content.to_string(),
            timestamp: self.now(),
        };
        self.append(LogKey::Scans, record).await
    }

    /// Appends a photo with the current time. Title and description may be empty.
    pub async fn append_photo(
        &self,
        image: &str,
        title: &str,
        description: &str,
    ) -> Result<PhotoRecord, ActivityError> {
        let record = PhotoRecord {
            image: image.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            timestamp: self.now(),
        };
        self.append(LogKey::Photos, record).await
    }

    /// Appends a location. `reference` is stored as given, never resolved here.
    pub async fn append_location(
        &self,
        kind: ActivityKind,
        reference: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationRecord, ActivityError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(ActivityError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        let record = LocationRecord {
            kind,
            reference: reference.to_string(),
            latitude,
            longitude,
            timestamp: self.now(),
        };
        self.append(LogKey::Locations, record).await
    }

    /// Content of the most recently appended scan.
    pub async fn last_scan_content(&self) -> Result<Option<String>, ActivityError> {
        let scans = self.scans().await?;
        Ok(scans.into_iter().last().map(|s| s.content))
    }

    /// Label of the most recently appended photo: title, else description,
    /// else [`UNTITLED_PHOTO`]. None if there are no photos.
    pub async fn last_photo_reference(&self) -> Result<Option<String>, ActivityError> {
        let photos = self.photos().await?;
        Ok(photos
            .last()
            .map(|p| p.label().unwrap_or(UNTITLED_PHOTO).to_string()))
    }

    pub async fn scans(&self) -> Result<Vec<ScanRecord>, ActivityError> {
        self.read_log(LogKey::Scans).await
    }

    pub async fn photos(&self) -> Result<Vec<PhotoRecord>, ActivityError> {
        self.read_log(LogKey::Photos).await
    }

    pub async fn locations(&self) -> Result<Vec<LocationRecord>, ActivityError> {
        self.read_log(LogKey::Locations).await
    }

    /// Reads all three logs concurrently and merges them, newest first.
    pub async fn load_all_activities(&self) -> Result<Vec<ActivityEntry>, ActivityError> {
        let (scans, photos, locations) =
            futures::try_join!(self.scans(), self.photos(), self.locations())?;
        debug!(
            scans = scans.len(),
            photos = photos.len(),
            locations = locations.len(),
            "loaded activity logs"
        );
        Ok(merge_feed(photos, scans, locations))
    }

    /// Resets every log to an empty list.
    ///
    /// The three writes are independent: if one fails the logs written
    /// before it stay cleared and the error is returned.
    pub async fn clear_all(&self) -> Result<(), ActivityError> {
        let empty: &[()] = &[];
        for (cleared, key) in LogKey::ALL.into_iter().enumerate() {
            let _guard = self.lock(key).await;
            if let Err(e) = self.write_log(key, empty).await {
                if cleared > 0 {
                    warn!(
                        failed = key.as_str(),
                        cleared = ?&LogKey::ALL[..cleared],
                        "history partially cleared"
                    );
                }
                return Err(e);
            }
        }
        debug!("history cleared");
        Ok(())
    }

    fn now(&self) -> DateTime<Utc> {
        // The encoding keeps milliseconds; truncate so returned records match stored ones.
        self.clock.now().trunc_subsecs(3)
    }

    async fn lock(&self, key: LogKey) -> Option<MutexGuard<'_, ()>> {
        if self.options.serialize_appends {
            Some(self.locks[key.index()].lock().await)
        } else {
            None
        }
    }

    async fn append<T>(&self, key: LogKey, record: T) -> Result<T, ActivityError>
    where
        T: Serialize + DeserializeOwned + Clone + Send,
    {
        let _guard = self.lock(key).await;
        let mut log: Vec<T> = self.read_log(key).await?;
        log.push(record.clone());
        self.write_log(key, &log).await?;
        debug!(key = key.as_str(), len = log.len(), "appended record");
        Ok(record)
    }

    async fn read_log<T: DeserializeOwned>(&self, key: LogKey) -> Result<Vec<T>, ActivityError> {
        let raw = self
            .backend
            .async_get(key.as_str())
            .await
            .map_err(|e| ActivityError::backend(key.as_str(), e))?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|source| {
            warn!(key = key.as_str(), error = %source, "stored log does not decode");
            ActivityError::CorruptStore {
                key: key.as_str(),
                source,
            }
        })
    }

    async fn write_log<T: Serialize>(&self, key: LogKey, records: &[T]) -> Result<(), ActivityError> {
        let encoded = serde_json::to_string(records).map_err(|source| ActivityError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.backend
            .async_set(key.as_str(), &encoded)
            .await
            .map_err(|e| ActivityError::backend(key.as_str(), e))
    }
}
