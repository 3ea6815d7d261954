// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod extraction_service;
pub mod import_service;
pub mod index_service;
pub mod match_resolver;
pub mod variant_generator;

#[cfg(test)]
mod match_resolver_tests;

// Re-export all services and their types
pub use extraction_service::{
    guess_mime_type,
    ArchiveExtractor,
    ExtractionJob,
    ExtractionSummary,
};

pub use import_service::{
    ImageImportService,
    ImportOptions,
    DEFAULT_WORLD_FOLDER,
};

pub use index_service::CandidateIndexBuilder;

pub use match_resolver::MatchResolver;

pub use variant_generator::generate_variants;
