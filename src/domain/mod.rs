// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod candidate;
pub mod collection;
pub mod keys;
pub mod matching;
pub mod record;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Key normalization
pub use keys::{condense, slugify, strip_extension, strip_leading_article};

// Candidate pool
pub use candidate::{CandidateIndex, CandidatePath, ExtensionFilter};

// Collection Domain
pub use collection::{validate_collection, Collection, Folder};

// Record Domain
pub use record::{validate_record, AliasSource, ImageSlot, Record};

// Matching outcomes
pub use matching::{MatchResult, MatchStatus, MatchTier, RunMode, RunReport, RunSummary};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
