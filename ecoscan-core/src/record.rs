//! Persisted record shapes, one per log.
//!
//! Field names follow the encoding the mobile app already writes, so logs
//! created there decode unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_helpers::iso_millis;

/// The kind of activity a location can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "escaneo")]
    Scan,
    #[serde(rename = "foto")]
    Photo,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Scan => write!(f, "scan"),
            ActivityKind::Photo => write!(f, "photo"),
        }
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" | "escaneo" => Ok(ActivityKind::Scan),
            "photo" | "foto" => Ok(ActivityKind::Photo),
            _ => Err(format!("unknown activity kind: {}", s)),
        }
    }
}

/// A decoded barcode payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "fechaIso", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// A captured image (as a data URL) with optional user metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    #[serde(rename = "imagenDataUrl")]
    pub image: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "fechaIso", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl PhotoRecord {
    /// Human-readable label: title, else description, else None.
    pub fn label(&self) -> Option<&str> {
        [self.title.as_str(), self.description.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }
}

/// A position tagged to an earlier scan or photo.
///
/// `reference` is a snapshot taken at capture time, not a live link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "tipo")]
    pub kind: ActivityKind,
    #[serde(rename = "referencia")]
    pub reference: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "fechaIso", with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}
