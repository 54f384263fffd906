use std::path::PathBuf;

use ecoscan_core::ActivityError;
use thiserror::Error;

use crate::store::OpenError;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Open(#[from] OpenError),

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error("Unsupported image type: {}", .0.display())]
    UnsupportedImage(PathBuf),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
