//! Text rendering and JSON/YAML export of the history feed.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use ecoscan_core::ActivityEntry;
use serde::Serialize;

use crate::error::ToolError;

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

#[derive(Serialize)]
struct Document<'a> {
    title: &'static str,
    generated_at: String,
    activities: &'a [ActivityEntry],
}

/// Serializes the feed, in the given order, under a small header.
pub fn export(
    feed: &[ActivityEntry],
    generated_at: DateTime<Utc>,
    format: ExportFormat,
) -> Result<String, ToolError> {
    let document = Document {
        title: "EcoScan - History",
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        activities: feed,
    };

    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&document)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(&document)?),
    }
}

/// `ecoscan_history_2024-05-01-10-00-00.json`
pub fn default_file_name(generated_at: DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "ecoscan_history_{}.{}",
        generated_at.format("%Y-%m-%d-%H-%M-%S"),
        format.extension()
    )
}

/// Renders the feed as the two-line-per-entry listing of the history screen.
pub fn render_text(feed: &[ActivityEntry]) -> String {
    let mut out = String::new();
    for entry in feed {
        let when = entry.timestamp().with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        out.push_str(&format!("{} - {}\n", entry.kind_label(), when));
        match entry {
            ActivityEntry::Photo {
                title, description, ..
            } => {
                let title = if title.is_empty() { "Untitled" } else { title };
                let description = if description.is_empty() {
                    "No description"
                } else {
                    description
                };
                out.push_str(&format!("  {title} - {description}\n"));
            }
            ActivityEntry::Scan { content, .. } => {
                out.push_str(&format!("  QR: {content}\n"));
            }
            ActivityEntry::Location {
                reference,
                latitude,
                longitude,
                ..
            } => {
                out.push_str(&format!("  Location: {latitude}, {longitude} - {reference}\n"));
            }
        }
    }
    out
}
