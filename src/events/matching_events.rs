// src/events/matching_events.rs
//
// Matching Events
//
// Outputs of the resolution pass. Resolution is read-only and repeatable, so
// these events are deterministic: identical inputs produce identical events,
// ids included.
//
// CRITICAL INVARIANTS:
// - No timestamps in payloads
// - Event ids are derived from a SHA-256 fingerprint of the payload
// - occurred_at() returns the Unix epoch for trait compliance

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::matching::{MatchResult, MatchTier, RunMode, RunSummary};
use crate::events::DomainEvent;

const SENTINEL_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

fn fingerprint(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
        // separator keeps ("ab","c") distinct from ("a","bc")
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// RECORD RESOLVED
// ============================================================================

/// A record resolved to a file (new or unchanged).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordResolved {
    pub record_id: Uuid,
    pub record_name: String,
    pub path: String,
    pub tier: MatchTier,
    pub unchanged: bool,
    pub fingerprint: String,
}

impl RecordResolved {
    pub fn new(record_id: Uuid, record_name: String, path: String, tier: MatchTier, unchanged: bool) -> Self {
        let fingerprint = fingerprint(&[
            record_id.as_bytes().as_slice(),
            record_name.as_bytes(),
            path.as_bytes(),
            tier.to_string().as_bytes(),
        ]);
        Self {
            record_id,
            record_name,
            path,
            tier,
            unchanged,
            fingerprint,
        }
    }

    /// Build from a matched result; `None` for unmatched or skipped results.
    pub fn from_result(result: &MatchResult) -> Option<Self> {
        let path = result.resolved_path.as_ref()?;
        let tier = result.tier?;
        Some(Self::new(
            result.record_id,
            result.record_name.clone(),
            path.to_string(),
            tier,
            !result.needs_update(),
        ))
    }
}

impl DomainEvent for RecordResolved {
    fn event_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.fingerprint.as_bytes())
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        SENTINEL_TIMESTAMP
    }

    fn event_type(&self) -> &'static str {
        "RecordResolved"
    }
}

// ============================================================================
// RECORD UNMATCHED
// ============================================================================

/// No tier produced a file; carries the keys that were tried.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordUnmatched {
    pub record_id: Uuid,
    pub record_name: String,
    pub candidates: Vec<String>,
    pub fingerprint: String,
}

impl RecordUnmatched {
    pub fn new(record_id: Uuid, record_name: String, candidates: Vec<String>) -> Self {
        let joined = candidates.join(",");
        let fingerprint = fingerprint(&[
            record_id.as_bytes().as_slice(),
            record_name.as_bytes(),
            joined.as_bytes(),
        ]);
        Self {
            record_id,
            record_name,
            candidates,
            fingerprint,
        }
    }
}

impl DomainEvent for RecordUnmatched {
    fn event_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.fingerprint.as_bytes())
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        SENTINEL_TIMESTAMP
    }

    fn event_type(&self) -> &'static str {
        "RecordUnmatched"
    }
}

// ============================================================================
// MATCH RUN COMPLETED
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchRunCompleted {
    pub collection_id: Uuid,
    pub folder: String,
    pub mode: RunMode,
    pub summary: RunSummary,
    pub fingerprint: String,
}

impl MatchRunCompleted {
    pub fn new(collection_id: Uuid, folder: String, mode: RunMode, summary: RunSummary) -> Self {
        let counts = format!(
            "{}:{}:{}:{}:{}",
            mode, summary.scanned, summary.matched, summary.updated, summary.failed_updates
        );
        let fingerprint = fingerprint(&[
            collection_id.as_bytes().as_slice(),
            folder.as_bytes(),
            counts.as_bytes(),
        ]);
        Self {
            collection_id,
            folder,
            mode,
            summary,
            fingerprint,
        }
    }
}

impl DomainEvent for MatchRunCompleted {
    fn event_id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.fingerprint.as_bytes())
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        SENTINEL_TIMESTAMP
    }

    fn event_type(&self) -> &'static str {
        "MatchRunCompleted"
    }
}
