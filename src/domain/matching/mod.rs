// src/domain/matching/mod.rs
//
// Matching Domain
//
// Value objects for the outcome of matching records to files.
//
// CRITICAL RULES:
// - All types are pure value objects
// - No persistence, no event emission (that's the service's job)

pub mod value_objects;

pub use value_objects::{MatchResult, MatchStatus, MatchTier, RunMode, RunReport, RunSummary};
