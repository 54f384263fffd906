//! EcoScan keeps a local, offline activity history for a capture app.
//!
//! Core concepts:
//! - **Backend**: a durable string key-value store (`get`/`set`), injected by the caller
//! - **Log**: one append-only list of records (scans, photos or locations) under a fixed key
//! - **ActivityEntry**: the unified, read-only projection used to render the history feed
//! - **ActivityStore**: appends records, looks up the latest ones and merges the three logs
//! - **AssociationResolver**: turns "last scan" / "last photo" into a location reference
//!
//! # Example
//!
//! ```
//! use ecoscan_core::{ActivityKind, ActivityStore, AssociationResolver, MemoryBackend};
//!
//! # tokio_test_block(async {
//! let store = ActivityStore::new(MemoryBackend::new());
//! store.append_scan("ABC123").await.unwrap();
//!
//! let resolver = AssociationResolver::new(&store);
//! let location = resolver.tag_location(ActivityKind::Scan, 10.5, 20.25).await.unwrap();
//! assert_eq!(location.reference, "ABC123");
//!
//! let feed = store.load_all_activities().await.unwrap();
//! assert_eq!(feed.len(), 2);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! # Consistency Note
//!
//! Every append is a read-modify-write of a whole log, and `clear_all` issues
//! three independent writes. Concurrent appends to the same log can lose a
//! record and a failing backend can leave a partial clear behind. Enable
//! [`StoreOptions::serialize_appends`] to serialize writers per log.

mod activity;
mod async_backend;
mod backend;
mod clock;
mod entry;
mod error;
mod record;
mod resolver;
mod serde_helpers;

pub use activity::{ActivityStore, LogKey, StoreOptions, UNTITLED_PHOTO};
pub use async_backend::AsyncBackend;
pub use backend::{Backend, MemoryBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{merge_feed, ActivityEntry};
pub use error::{ActivityError, BoxError};
pub use record::{ActivityKind, LocationRecord, PhotoRecord, ScanRecord};
pub use resolver::AssociationResolver;
