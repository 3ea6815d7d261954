// src/main.rs
// artmatch command-line front end

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use artmatch::application::{
    extract_archive, list_collections, load_collection, render_json, render_text, run_match,
    subscribe_extraction_notices, subscribe_match_notices, AppConfig, AppState, ErrorResponse,
    ExtractOptions, NoticeSink, ToErrorResponse,
};
use artmatch::domain::ExtensionFilter;
use artmatch::services::{ImportOptions, DEFAULT_WORLD_FOLDER};

/// Match collection records to image files, and unpack art archives
#[derive(Parser, Debug)]
#[command(name = "artmatch")]
#[command(version)]
struct Cli {
    /// Directory every asset path is relative to (defaults to the current directory)
    #[arg(long, global = true, env = "ARTMATCH_ASSETS_ROOT")]
    assets_root: Option<PathBuf>,

    /// SQLite record store
    #[arg(long, global = true, env = "ARTMATCH_DATABASE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List collections
    Collections,

    /// Create a collection from a JSON array of records
    Load {
        /// JSON file: [{"name": ..., "img": ..., "system_slug": ...}, ...]
        json: PathBuf,

        #[arg(long)]
        collection: String,

        #[arg(long, default_value = "Actor")]
        kind: String,
    },

    /// Match a collection's records to images (dry run unless --apply)
    Match {
        /// Collection id
        #[arg(long)]
        collection: Uuid,

        /// Image folder relative to the assets root (defaults to the last used folder)
        #[arg(long)]
        folder: Option<String>,

        /// Only look at the folder's immediate children
        #[arg(long)]
        no_recursive: bool,

        /// Comma-separated allowed extensions
        #[arg(long, default_value = "webp,png,jpg,jpeg")]
        extensions: String,

        /// Write the matched image paths
        #[arg(long)]
        apply: bool,

        /// Import each matched record into the world store before updating it
        #[arg(long)]
        promote_first: bool,

        /// Folder that promoted records are filed under
        #[arg(long, default_value = DEFAULT_WORLD_FOLDER)]
        world_folder: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Print one line per record as it is resolved
        #[arg(short, long)]
        verbose: bool,
    },

    /// Unpack a zip archive under the assets root
    Extract {
        zip: PathBuf,

        /// Destination folder relative to the assets root
        #[arg(long)]
        dest: String,

        /// Keep files that already exist
        #[arg(long)]
        no_overwrite: bool,

        /// Only report the final summary
        #[arg(long)]
        quiet: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artmatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::resolve(cli.assets_root, cli.database)
        .context("Failed to resolve configuration")?;
    info!("Assets root: {}", config.assets_root.display());

    let state = AppState::initialize(&config).context("Failed to initialize record store")?;

    match cli.command {
        Command::Collections => {
            let collections = list_collections(&state).context("Failed to list collections")?;
            if collections.is_empty() {
                println!("No collections. Use `artmatch load` to create one.");
            }
            for c in collections {
                let lock = if c.locked { " (locked)" } else { "" };
                println!("{}  [{}] {}{}", c.id, c.document_kind, c.label, lock);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Load {
            json,
            collection,
            kind,
        } => {
            let raw = std::fs::read_to_string(&json)
                .with_context(|| format!("Failed to read {}", json.display()))?;
            let loaded = load_collection(&state, &raw, &collection, &kind)
                .context("Failed to load collection")?;
            println!(
                "Loaded {} records into [{}] {} ({})",
                loaded.records_loaded,
                loaded.collection.document_kind,
                loaded.collection.label,
                loaded.collection.id
            );
            Ok(ExitCode::SUCCESS)
        }

        Command::Match {
            collection,
            folder,
            no_recursive,
            extensions,
            apply,
            promote_first,
            world_folder,
            json,
            verbose,
        } => {
            subscribe_match_notices(&state.event_bus, verbose, stderr_sink());

            let folder = match folder {
                Some(folder) => folder.trim().to_string(),
                None => state
                    .settings
                    .load()
                    .context("Failed to read settings")?
                    .last_image_folder,
            };

            let mut options = ImportOptions::new(collection, folder);
            options.recursive = !no_recursive;
            options.extensions = ExtensionFilter::parse_or_default(&extensions);
            options.dry_run = !apply;
            options.promote_first = promote_first;
            options.world_folder = world_folder;

            match run_match(&state, &options).await.to_error_response() {
                Ok(report) => {
                    if json {
                        println!("{}", render_json(&report)?);
                    } else {
                        print!("{}", render_text(&report));
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(response) => Ok(report_failure(&response, json)?),
            }
        }

        Command::Extract {
            zip,
            dest,
            no_overwrite,
            quiet,
        } => {
            let mut options = ExtractOptions::new(zip, dest);
            options.overwrite = !no_overwrite;
            options.quiet = quiet;
            subscribe_extraction_notices(&state.event_bus, stderr_sink());

            let progress = |done: usize, total: usize| {
                if !quiet {
                    let pct = if total == 0 { 0 } else { done * 100 / total };
                    eprint!("\r{:>3}% ({}/{})", pct, done, total);
                }
            };

            match extract_archive(&state, &options, progress).await.to_error_response() {
                Ok(summary) => {
                    if !quiet && summary.total > 0 {
                        eprintln!();
                    }
                    println!(
                        "Done. Unpacked {} file(s) to {} ({} skipped, {} failed).",
                        summary.written,
                        options.destination.trim(),
                        summary.skipped,
                        summary.failed
                    );
                    Ok(if summary.failed > 0 {
                        ExitCode::FAILURE
                    } else {
                        ExitCode::SUCCESS
                    })
                }
                Err(response) => Ok(report_failure(&response, false)?),
            }
        }
    }
}

/// Notices go to stderr so stdout stays a clean report.
fn stderr_sink() -> NoticeSink {
    Arc::new(|line| eprintln!("\r{:<24}", line))
}

/// Warnings exit cleanly; errors exit non-zero.
fn report_failure(response: &ErrorResponse, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else if response.is_warning() {
        warn!("{}", response);
        println!("{}", response);
    } else {
        eprintln!("Error: {}", response);
    }

    Ok(if response.is_warning() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
