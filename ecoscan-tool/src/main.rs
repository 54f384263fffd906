mod config;
mod error;
mod export;
mod flows;
mod prompt;
mod store;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ecoscan_core::ActivityKind;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, resolve_store_config};
use crate::export::{ExportFormat, default_file_name, export, render_text};
use crate::prompt::{ArgsPrompt, LinePrompt, PhotoDetails, Prompt};
use crate::store::AppContext;

const DEFAULT_LOG_FILTER: &str = "ecoscan=info,ecoscan_core=info";

#[derive(Parser)]
#[command(name = "ecoscan")]
#[command(about = "Local scan, photo and location history", long_about = None)]
struct Cli {
    /// Path to the history store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Serialize concurrent appends to the same log
    #[arg(long, global = true)]
    serialize_appends: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a decoded QR/barcode payload
    Scan {
        /// Raw payload; omitted when the scanner found nothing
        content: Option<String>,
    },

    /// Record a photo from an image file
    Photo {
        /// Image file (png, jpeg, gif or webp)
        image: PathBuf,

        /// Title; skips the details form when given with or without --description
        #[arg(long)]
        title: Option<String>,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },

    /// Tag a position to the last scan or photo
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Activity to associate: scan or photo (asks when omitted)
        #[arg(long)]
        to: Option<ActivityKind>,
    },

    /// Show the merged history, newest first
    History {
        /// Output format: text, json or yaml
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export the merged history to a file
    Export {
        /// Output format: json or yaml
        #[arg(long, default_value = "json")]
        format: ExportFormat,

        /// Output file (default: ecoscan_history_<timestamp>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all scans, photos and locations
    Clear,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ECOSCAN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn stdin_prompt() -> LinePrompt<io::StdinLock<'static>, io::Stdout> {
    LinePrompt::new(io::stdin().lock(), io::stdout())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (store_path, options) = resolve_store_config(load_config(), cli.store, cli.serialize_appends);
    let ctx = AppContext::open(&store_path, options)?;
    let store = &ctx.store;

    let notice = match cli.command {
        Command::Scan { content } => flows::scan(store, content.as_deref()).await?,
        Command::Photo {
            image,
            title,
            description,
        } => {
            let mut prompt: Box<dyn Prompt> = if title.is_some() || description.is_some() {
                Box::new(ArgsPrompt {
                    details: Some(PhotoDetails {
                        title: title.unwrap_or_default(),
                        description: description.unwrap_or_default(),
                    }),
                    association: None,
                })
            } else {
                Box::new(stdin_prompt())
            };
            flows::photo(store, &image, &mut prompt).await?
        }
        Command::Locate { lat, lng, to } => {
            let mut prompt: Box<dyn Prompt> = match to {
                Some(kind) => Box::new(ArgsPrompt {
                    details: None,
                    association: Some(kind),
                }),
                None => Box::new(stdin_prompt()),
            };
            flows::locate(store, &mut prompt, lat, lng).await?
        }
        Command::History { format } => {
            let feed = store
                .load_all_activities()
                .await
                .context("could not load history")?;
            if format.eq_ignore_ascii_case("text") {
                print!("{}", render_text(&feed));
            } else {
                let format: ExportFormat = format.parse().map_err(anyhow::Error::msg)?;
                print!("{}", export(&feed, chrono::Utc::now(), format)?);
            }
            return Ok(());
        }
        Command::Export { format, output } => {
            let feed = store
                .load_all_activities()
                .await
                .context("could not load history")?;
            let now = chrono::Utc::now();
            let content = export(&feed, now, format)?;
            let path = output.unwrap_or_else(|| PathBuf::from(default_file_name(now, format)));
            std::fs::write(&path, content)
                .with_context(|| format!("could not write {}", path.display()))?;
            format!("Exported {} activities to {}", feed.len(), path.display())
        }
        Command::Clear => flows::clear(store).await?,
    };

    println!("{notice}");

    Ok(())
}
