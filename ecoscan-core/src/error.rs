use thiserror::Error;

use crate::record::ActivityKind;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for activity store operations.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// A read or write against the backend failed. Not retried.
    #[error("backend unavailable for key {key}: {source}")]
    BackendUnavailable {
        key: &'static str,
        #[source]
        source: BoxError,
    },

    /// A stored value is present but does not decode as the expected list.
    #[error("corrupt store under key {key}: {source}")]
    CorruptStore {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A log could not be encoded for writing.
    #[error("failed to encode log {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Latitude or longitude is NaN or infinite and would not survive encoding.
    #[error("invalid coordinate: lat {latitude}, lng {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// No earlier scan or photo exists to attach a location to.
    #[error("no prior {0} to associate")]
    NoPriorActivity(ActivityKind),
}

impl ActivityError {
    pub(crate) fn backend(key: &'static str, source: impl Into<BoxError>) -> Self {
        ActivityError::BackendUnavailable {
            key,
            source: source.into(),
        }
    }

    /// True for failures the user can simply be told about (nothing was lost).
    pub fn is_informational(&self) -> bool {
        matches!(self, ActivityError::NoPriorActivity(_))
    }
}
