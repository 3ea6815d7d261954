// src/domain/matching/value_objects.rs
//
// Matching Value Objects
//
// Pure data describing the outcome of matching records to candidate files.
//
// CRITICAL INVARIANTS:
// - resolved_path is present iff the status is a match
// - candidates is non-empty only for NoMatch
// - No I/O, deterministic construction

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::candidate::CandidatePath;

// ============================================================================
// MATCH STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// A file was found and differs from the current image
    MatchedNew,

    /// A file was found and the record already points at it
    MatchedUnchanged,

    /// No tier produced a file
    NoMatch,

    /// The record has no image attribute
    SkippedUnsupported,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::MatchedNew => write!(f, "matched_new"),
            MatchStatus::MatchedUnchanged => write!(f, "matched_unchanged"),
            MatchStatus::NoMatch => write!(f, "no_match"),
            MatchStatus::SkippedUnsupported => write!(f, "skipped_unsupported"),
        }
    }
}

// ============================================================================
// MATCH TIER
// ============================================================================

/// Lookup strategy that produced a hit, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Raw name or its stem equals a file stem
    ExactStem,

    /// Slug of the name equals a file slug
    Slug,

    /// Condensed slug of the name equals a condensed file slug
    CondensedSlug,

    /// One of the generated alias/article variants hit
    Variant,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::ExactStem => write!(f, "exact_stem"),
            MatchTier::Slug => write!(f, "slug"),
            MatchTier::CondensedSlug => write!(f, "condensed_slug"),
            MatchTier::Variant => write!(f, "variant"),
        }
    }
}

// ============================================================================
// MATCH RESULT
// ============================================================================

/// Per-record outcome of resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub record_id: Uuid,
    pub record_name: String,
    pub status: MatchStatus,

    /// Tier of the hit; present iff matched
    pub tier: Option<MatchTier>,

    /// Present iff matched
    pub resolved_path: Option<CandidatePath>,

    /// Keys tried by the variant sweep; only kept for NoMatch
    pub candidates: Vec<String>,
}

impl MatchResult {
    pub fn matched(
        record_id: Uuid,
        record_name: String,
        path: CandidatePath,
        tier: MatchTier,
        unchanged: bool,
    ) -> Self {
        Self {
            record_id,
            record_name,
            status: if unchanged {
                MatchStatus::MatchedUnchanged
            } else {
                MatchStatus::MatchedNew
            },
            tier: Some(tier),
            resolved_path: Some(path),
            candidates: Vec::new(),
        }
    }

    pub fn no_match(record_id: Uuid, record_name: String, candidates: Vec<String>) -> Self {
        Self {
            record_id,
            record_name,
            status: MatchStatus::NoMatch,
            tier: None,
            resolved_path: None,
            candidates,
        }
    }

    pub fn skipped(record_id: Uuid, record_name: String) -> Self {
        Self {
            record_id,
            record_name,
            status: MatchStatus::SkippedUnsupported,
            tier: None,
            resolved_path: None,
            candidates: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(
            self.status,
            MatchStatus::MatchedNew | MatchStatus::MatchedUnchanged
        )
    }

    /// True when applying this result would write to the record store
    pub fn needs_update(&self) -> bool {
        self.status == MatchStatus::MatchedNew
    }

    /// Short action label shown in the report.
    pub fn action_label(&self, mode: RunMode, promote_first: bool) -> &'static str {
        match self.status {
            MatchStatus::SkippedUnsupported => "skipped (no img field)",
            MatchStatus::NoMatch => "no match",
            MatchStatus::MatchedUnchanged => "already set",
            MatchStatus::MatchedNew => match (mode, promote_first) {
                (RunMode::DryRun, false) => "would update",
                (RunMode::DryRun, true) => "would import+update",
                (RunMode::Applied, false) => "update",
                (RunMode::Applied, true) => "import+update",
            },
        }
    }
}

// ============================================================================
// RUN REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    DryRun,
    Applied,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "Dry Run"),
            RunMode::Applied => write!(f, "Applied"),
        }
    }
}

/// Aggregate counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Records fetched from the collection
    pub scanned: usize,

    /// Results that need a write (MatchedNew)
    pub matched: usize,

    /// Writes that succeeded
    pub updated: usize,

    /// Writes that failed and were skipped
    pub failed_updates: usize,
}

/// Everything one invocation produced. Created fresh per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub collection_id: Uuid,
    pub collection_label: String,
    pub folder: String,
    pub mode: RunMode,
    pub promote_first: bool,
    pub results: Vec<MatchResult>,
    pub summary: RunSummary,
    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    pub fn new(
        collection_id: Uuid,
        collection_label: String,
        folder: String,
        mode: RunMode,
        promote_first: bool,
        results: Vec<MatchResult>,
    ) -> Self {
        let summary = RunSummary {
            scanned: results.len(),
            matched: results.iter().filter(|r| r.needs_update()).count(),
            updated: 0,
            failed_updates: 0,
        };
        Self {
            collection_id,
            collection_label,
            folder,
            mode,
            promote_first,
            results,
            summary,
            generated_at: Utc::now(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == RunMode::DryRun
    }

    pub fn count_with_status(&self, status: MatchStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}
