// src/lib.rs
// artmatch - Match collection records to image files by normalized name
//
// Architecture:
// - Domain-centric: names, keys, candidates and match outcomes live in domain
// - Event-driven: services report progress through the event bus
// - Explicit: dry run by default, no hidden writes
// - Application Layer: CLI boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    condense,
    slugify,
    strip_extension,
    strip_leading_article,
    validate_collection,
    validate_record,
    AliasSource,
    // Candidate pool
    CandidateIndex,
    CandidatePath,
    // Collection
    Collection,
    ExtensionFilter,
    Folder,
    ImageSlot,
    // Matching
    MatchResult,
    MatchStatus,
    MatchTier,
    // Record
    Record,
    RunMode,
    RunReport,
    RunSummary,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    ArchiveEntryFailed,
    ArchiveEntryWritten,
    ArchiveExtracted,
    CandidatePoolIndexed,
    DomainEvent,
    EventBus,
    EventLogEntry,
    MatchRunCompleted,
    RecordResolved,
    RecordUnmatched,
    RecordUpdateFailed,
    RecordUpdated,
};

// ============================================================================
// PUBLIC API - Database & Repositories
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

pub use repositories::{
    CollectionRepository,
    RecordRepository,
    SqliteCollectionRepository,
    SqliteRecordRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::{
    AssetStore, CreateOutcome, DirectoryListing, InMemoryAssetStore, LocalAssetStore,
    WriteOutcome,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    generate_variants,
    guess_mime_type,
    ArchiveExtractor,
    CandidateIndexBuilder,
    ExtractionJob,
    ExtractionSummary,
    ImageImportService,
    ImportOptions,
    MatchResolver,
};
