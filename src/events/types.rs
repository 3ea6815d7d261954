// src/events/types.rs
//
// Domain events for scanning, extraction and record updates.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// CANDIDATE POOL EVENTS
// ============================================================================

/// Emitted when the candidate index has been built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatePoolIndexed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub root: String,
    pub recursive: bool,
    pub files_seen: usize,
    pub files_indexed: usize,
}

impl CandidatePoolIndexed {
    pub fn new(root: String, recursive: bool, files_seen: usize, files_indexed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            root,
            recursive,
            files_seen,
            files_indexed,
        }
    }
}

impl DomainEvent for CandidatePoolIndexed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CandidatePoolIndexed" }
}

// ============================================================================
// ARCHIVE EXTRACTION EVENTS
// ============================================================================

/// Emitted after each archive entry is handled (written or kept)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveEntryWritten {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub path: String,
    pub done: usize,
    pub total: usize,
    /// false when an existing file was kept because overwrite was off
    pub written: bool,
}

impl ArchiveEntryWritten {
    pub fn new(path: String, done: usize, total: usize, written: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            path,
            done,
            total,
            written,
        }
    }
}

impl DomainEvent for ArchiveEntryWritten {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ArchiveEntryWritten" }
}

/// Emitted when a single archive entry could not be read or written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveEntryFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entry_name: String,
    pub done: usize,
    pub total: usize,
    pub reason: String,
}

impl ArchiveEntryFailed {
    pub fn new(entry_name: String, done: usize, total: usize, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entry_name,
            done,
            total,
            reason,
        }
    }
}

impl DomainEvent for ArchiveEntryFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ArchiveEntryFailed" }
}

/// Emitted once per extraction, whether or not the job was quiet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveExtracted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub destination: String,
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ArchiveExtracted {
    pub fn new(destination: String, total: usize, written: usize, skipped: usize, failed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            destination,
            total,
            written,
            skipped,
            failed,
        }
    }
}

impl DomainEvent for ArchiveExtracted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ArchiveExtracted" }
}

// ============================================================================
// RECORD UPDATE EVENTS
// ============================================================================

/// Emitted when the apply phase persisted a new image for a record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub record_id: Uuid,
    pub record_name: String,
    pub image_path: String,
    /// Id of the imported copy when running in promote-first mode
    pub imported_as: Option<Uuid>,
}

impl RecordUpdated {
    pub fn new(record_id: Uuid, record_name: String, image_path: String, imported_as: Option<Uuid>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            record_id,
            record_name,
            image_path,
            imported_as,
        }
    }
}

impl DomainEvent for RecordUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RecordUpdated" }
}

/// Emitted when persisting one record failed; the batch continues
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUpdateFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub record_id: Uuid,
    pub record_name: String,
    pub reason: String,
}

impl RecordUpdateFailed {
    pub fn new(record_id: Uuid, record_name: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            record_id,
            record_name,
            reason,
        }
    }
}

impl DomainEvent for RecordUpdateFailed {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RecordUpdateFailed" }
}
