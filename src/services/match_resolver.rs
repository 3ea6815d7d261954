// src/services/match_resolver.rs
//
// Match Resolver
//
// Turns a record's names into zero or one candidate path.
//
// CRITICAL RULES:
// - Read-only: never mutates the record or the index
// - Deterministic: same record + same index → same MatchResult
// - Tiers are tried in priority order; the first hit wins
// - Empty keys are never looked up
//
// TIER ORDER:
// 1. Unsupported image attribute → skipped
// 2. Exact stem (raw name, then name without extension)
// 3. Slug
// 4. Condensed slug
// 5. Variant sweep (slug table, then condensed table, per key)

use log::debug;
use std::sync::Arc;

use super::variant_generator::generate_variants;
use crate::domain::keys::{condense, slugify, strip_extension};
use crate::domain::{CandidateIndex, CandidatePath, MatchResult, MatchStatus, MatchTier, Record};
use crate::events::{EventBus, RecordResolved, RecordUnmatched};

// ============================================================================
// MATCH RESOLVER
// ============================================================================

pub struct MatchResolver {
    event_bus: Arc<EventBus>,
}

impl MatchResolver {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self { event_bus }
    }

    /// Resolve one record. Emits nothing.
    pub fn resolve(&self, record: &Record, index: &CandidateIndex) -> MatchResult {
        if !record.image.is_supported() {
            return MatchResult::skipped(record.id, record.name.clone());
        }

        match Self::lookup(record, index) {
            Some((path, tier)) => {
                let unchanged = record.image.current() == Some(path.as_str());
                MatchResult::matched(record.id, record.name.clone(), path.clone(), tier, unchanged)
            }
            None => MatchResult::no_match(record.id, record.name.clone(), generate_variants(record)),
        }
    }

    /// Resolve every record in order, emitting one resolution event per
    /// matched or unmatched record.
    pub fn resolve_all(&self, records: &[Record], index: &CandidateIndex) -> Vec<MatchResult> {
        records
            .iter()
            .map(|record| {
                let result = self.resolve(record, index);
                self.emit_resolution_event(&result);
                result
            })
            .collect()
    }

    // ========================================================================
    // INTERNAL LOOKUP
    // ========================================================================

    fn lookup<'a>(
        record: &Record,
        index: &'a CandidateIndex,
    ) -> Option<(&'a CandidatePath, MatchTier)> {
        let name = record.name.as_str();

        let exact = non_empty(name)
            .and_then(|n| index.by_exact_stem(n))
            .or_else(|| non_empty(strip_extension(name)).and_then(|n| index.by_exact_stem(n)));
        if let Some(path) = exact {
            return Some((path, MatchTier::ExactStem));
        }

        let slug = slugify(name);
        if let Some(path) = non_empty(&slug).and_then(|s| index.by_slug(s)) {
            return Some((path, MatchTier::Slug));
        }

        let condensed = condense(&slug);
        if let Some(path) = non_empty(&condensed).and_then(|c| index.by_condensed_slug(c)) {
            return Some((path, MatchTier::CondensedSlug));
        }

        generate_variants(record).iter().find_map(|key| {
            index
                .by_slug(key)
                .or_else(|| index.by_condensed_slug(key))
                .map(|path| (path, MatchTier::Variant))
        })
    }

    fn emit_resolution_event(&self, result: &MatchResult) {
        match result.status {
            MatchStatus::NoMatch => {
                debug!("No match for '{}'", result.record_name);
                self.event_bus.emit(RecordUnmatched::new(
                    result.record_id,
                    result.record_name.clone(),
                    result.candidates.clone(),
                ));
            }
            MatchStatus::SkippedUnsupported => {
                debug!("Skipped '{}' (no image attribute)", result.record_name);
            }
            MatchStatus::MatchedNew | MatchStatus::MatchedUnchanged => {
                if let Some(event) = RecordResolved::from_result(result) {
                    debug!(
                        "Resolved '{}' → {} ({})",
                        event.record_name, event.path, event.tier
                    );
                    self.event_bus.emit(event);
                }
            }
        }
    }
}

fn non_empty(key: &str) -> Option<&str> {
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
