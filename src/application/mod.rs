// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the front end (CLI) and the services
// - Translates between DTOs and domain entities
// - Owns configuration, settings and report rendering

pub mod commands;
pub mod config;
pub mod dto;
pub mod error_handling;
pub mod notices;
pub mod report;
pub mod state;


pub use commands::*;
pub use config::{AppConfig, ExtractOptions, JsonSettingsStore, Settings, SettingsStore};
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, Severity, ToErrorResponse};
pub use notices::{subscribe_extraction_notices, subscribe_match_notices, NoticeSink};
pub use report::{render_json, render_text};
pub use state::AppState;
