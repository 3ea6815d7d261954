// src/application/commands/match_commands.rs
//
// Match Command Handler

use crate::application::state::AppState;
use crate::domain::RunReport;
use crate::error::AppResult;
use crate::services::ImportOptions;

/// Match a collection against an image folder, applying unless dry run.
pub async fn run_match(state: &AppState, options: &ImportOptions) -> AppResult<RunReport> {
    state.import_service.run(options).await
}
