//! Capture flows: take a device result, confirm with the user, append.
//!
//! Each flow returns the short notice shown to the user.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ecoscan_core::{ActivityError, ActivityStore, AssociationResolver, AsyncBackend, Clock};
use tracing::info;

use crate::error::ToolError;
use crate::prompt::Prompt;

/// Stored when the scanner returns without a payload.
pub const EMPTY_SCAN: &str = "No result";

pub async fn scan<B: AsyncBackend, C: Clock>(
    store: &ActivityStore<B, C>,
    payload: Option<&str>,
) -> Result<String, ToolError> {
    let value = payload.unwrap_or(EMPTY_SCAN);
    store.append_scan(value).await?;
    Ok(format!("QR: {value}"))
}

pub async fn photo<B: AsyncBackend, C: Clock>(
    store: &ActivityStore<B, C>,
    image_path: &Path,
    prompt: &mut impl Prompt,
) -> Result<String, ToolError> {
    let image = load_data_url(image_path)?;
    let Some(details) = prompt.photo_details()? else {
        return Ok("Capture cancelled".to_string());
    };
    store
        .append_photo(&image, &details.title, &details.description)
        .await?;
    info!(path = %image_path.display(), bytes = image.len(), "photo stored");
    Ok("Photo saved".to_string())
}

pub async fn locate<B: AsyncBackend, C: Clock>(
    store: &ActivityStore<B, C>,
    prompt: &mut impl Prompt,
    latitude: f64,
    longitude: f64,
) -> Result<String, ToolError> {
    let Some(kind) = prompt.association()? else {
        return Ok("Location cancelled".to_string());
    };

    match AssociationResolver::new(store)
        .tag_location(kind, latitude, longitude)
        .await
    {
        Ok(_) => Ok(format!("Location saved ({latitude:.6}, {longitude:.6})")),
        Err(ActivityError::NoPriorActivity(_)) => Ok("No prior activity to associate".to_string()),
        Err(e) => Err(e.into()),
    }
}

pub async fn clear<B: AsyncBackend, C: Clock>(store: &ActivityStore<B, C>) -> Result<String, ToolError> {
    store.clear_all().await?;
    Ok("History cleared".to_string())
}

/// Reads an image file into a self-contained `data:` URL.
pub fn load_data_url(path: &Path) -> Result<String, ToolError> {
    let mime = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            _ => None,
        })
        .ok_or_else(|| ToolError::UnsupportedImage(path.to_path_buf()))?;

    let bytes = std::fs::read(path)?;
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}
