// src/application/commands/mod.rs
//
// Command Handlers
//
// RULES:
// - Accept plain inputs or DTOs
// - Call services
// - Return DTOs or domain reports
// - Never contain business logic

pub mod collection_commands;
pub mod extract_commands;
pub mod match_commands;

pub use collection_commands::{list_collections, load_collection};
pub use extract_commands::extract_archive;
pub use match_commands::run_match;
