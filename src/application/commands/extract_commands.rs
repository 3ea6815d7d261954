// src/application/commands/extract_commands.rs
//
// Extract Command Handler

use log::warn;

use crate::application::config::ExtractOptions;
use crate::application::state::AppState;
use crate::error::AppResult;
use crate::services::{ExtractionJob, ExtractionSummary};

/// Read a zip file from disk and unpack it into the asset store.
///
/// On success the destination becomes the remembered image folder; failing
/// to persist that is only a warning.
pub async fn extract_archive<F>(
    state: &AppState,
    options: &ExtractOptions,
    on_progress: F,
) -> AppResult<ExtractionSummary>
where
    F: FnMut(usize, usize),
{
    let destination = options.normalized_destination()?;
    let archive = tokio::fs::read(&options.archive_path).await?;

    let job = ExtractionJob::new(archive, destination.clone())
        .overwrite(options.overwrite)
        .quiet(options.quiet);
    let summary = state.extractor.extract(&job, on_progress).await?;

    let remembered = state.settings.load().and_then(|mut settings| {
        settings.last_image_folder = destination;
        state.settings.save(&settings)
    });
    if let Err(e) = remembered {
        warn!("Could not remember image folder: {}", e);
    }

    Ok(summary)
}
