use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::{ActivityKind, LocationRecord, PhotoRecord, ScanRecord};
use crate::serde_helpers::iso_millis;

/// One item of the merged history feed.
///
/// Built on read from the three logs and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityEntry {
    Photo {
        image: String,
        title: String,
        description: String,
        #[serde(with = "iso_millis")]
        timestamp: DateTime<Utc>,
    },
    Scan {
        content: String,
        #[serde(with = "iso_millis")]
        timestamp: DateTime<Utc>,
    },
    Location {
        kind: ActivityKind,
        reference: String,
        latitude: f64,
        longitude: f64,
        #[serde(with = "iso_millis")]
        timestamp: DateTime<Utc>,
    },
}

impl ActivityEntry {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ActivityEntry::Photo { timestamp, .. }
            | ActivityEntry::Scan { timestamp, .. }
            | ActivityEntry::Location { timestamp, .. } => *timestamp,
        }
    }

    /// Upper-case tag used when rendering the feed.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ActivityEntry::Photo { .. } => "PHOTO",
            ActivityEntry::Scan { .. } => "SCAN",
            ActivityEntry::Location { .. } => "LOCATION",
        }
    }
}

impl From<ScanRecord> for ActivityEntry {
    fn from(record: ScanRecord) -> Self {
        ActivityEntry::Scan {
            content: record.content,
            timestamp: record.timestamp,
        }
    }
}

impl From<PhotoRecord> for ActivityEntry {
    fn from(record: PhotoRecord) -> Self {
        ActivityEntry::Photo {
            image: record.image,
            title: record.title,
            description: record.description,
            timestamp: record.timestamp,
        }
    }
}

impl From<LocationRecord> for ActivityEntry {
    fn from(record: LocationRecord) -> Self {
        ActivityEntry::Location {
            kind: record.kind,
            reference: record.reference,
            latitude: record.latitude,
            longitude: record.longitude,
            timestamp: record.timestamp,
        }
    }
}

/// Merges the three logs into one feed, newest first.
///
/// Entries are concatenated photos, scans, locations and then stably sorted
/// by timestamp descending, so equal timestamps keep that order.
pub fn merge_feed(
    photos: Vec<PhotoRecord>,
    scans: Vec<ScanRecord>,
    locations: Vec<LocationRecord>,
) -> Vec<ActivityEntry> {
    let mut feed: Vec<ActivityEntry> = Vec::with_capacity(photos.len() + scans.len() + locations.len());
    feed.extend(photos.into_iter().map(ActivityEntry::from));
    feed.extend(scans.into_iter().map(ActivityEntry::from));
    feed.extend(locations.into_iter().map(ActivityEntry::from));
    feed.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    feed
}
