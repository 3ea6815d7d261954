// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod matching_events;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Extraction
    ArchiveEntryFailed,
    ArchiveEntryWritten,
    ArchiveExtracted,
    // Candidate pool
    CandidatePoolIndexed,
    // Apply phase
    RecordUpdateFailed,
    RecordUpdated,
};

pub use bus::{EventBus, EventLogEntry};

pub use matching_events::{MatchRunCompleted, RecordResolved, RecordUnmatched};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
