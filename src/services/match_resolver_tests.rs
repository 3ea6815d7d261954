// src/services/match_resolver_tests.rs
//
// UNIT TESTS: Match Resolver
//
// PURPOSE:
// - Prove each tier fires in priority order
// - Prove resolution is idempotent and read-only
// - Prove unmatched records carry the keys that were tried
//
// INVARIANTS TESTED:
// - A record whose name slug equals a file slug resolves at the slug tier or earlier
// - resolve() twice on the same inputs yields identical MatchResults
// - Resolution events carry deterministic ids

#[cfg(test)]
mod tier_tests {
    use std::sync::Arc;

    use crate::domain::{
        CandidateIndex, CandidatePath, ImageSlot, MatchStatus, MatchTier, Record,
    };
    use crate::events::EventBus;
    use crate::services::MatchResolver;

    fn resolver() -> MatchResolver {
        MatchResolver::new(Arc::new(EventBus::new()))
    }

    fn index(paths: &[&str]) -> CandidateIndex {
        paths.iter().map(|p| CandidatePath::new(*p)).collect()
    }

    fn record(name: &str) -> Record {
        Record::new(None, name.to_string(), ImageSlot::Empty)
    }

    #[test]
    fn test_slug_tier_match() {
        let result = resolver().resolve(
            &record("Goblin Warrior"),
            &index(&["art/goblin-warrior.webp"]),
        );

        assert_eq!(result.status, MatchStatus::MatchedNew);
        assert_eq!(result.tier, Some(MatchTier::Slug));
        assert_eq!(
            result.resolved_path.unwrap().as_str(),
            "art/goblin-warrior.webp"
        );
    }

    #[test]
    fn test_condensed_tier_match() {
        let result = resolver().resolve(&record("The Witch"), &index(&["thewitch.png"]));

        assert_eq!(result.status, MatchStatus::MatchedNew);
        assert_eq!(result.tier, Some(MatchTier::CondensedSlug));
        assert_eq!(result.resolved_path.unwrap().as_str(), "thewitch.png");
    }

    #[test]
    fn test_no_match_lists_tried_keys() {
        let result = resolver().resolve(&record("Unknown Beast"), &index(&["art/goblin.webp"]));

        assert_eq!(result.status, MatchStatus::NoMatch);
        assert!(result.resolved_path.is_none());
        assert!(result.tier.is_none());
        assert!(result.candidates.contains(&"unknown-beast".to_string()));
        assert!(result.candidates.contains(&"unknownbeast".to_string()));
    }

    #[test]
    fn test_current_image_equal_to_hit_is_unchanged() {
        let mut rec = record("Goblin Warrior");
        rec.image = ImageSlot::Set("art/goblin-warrior.webp".into());

        let result = resolver().resolve(&rec, &index(&["art/goblin-warrior.webp"]));

        assert_eq!(result.status, MatchStatus::MatchedUnchanged);
        assert!(!result.needs_update());
    }

    #[test]
    fn test_unsupported_image_is_skipped_before_lookup() {
        let rec = Record::new(None, "Goblin".into(), ImageSlot::Unsupported);
        let result = resolver().resolve(&rec, &index(&["goblin.webp"]));

        assert_eq!(result.status, MatchStatus::SkippedUnsupported);
        assert!(result.resolved_path.is_none());
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn test_exact_stem_beats_slug() {
        // "Goblin" slug points at the first file; the exact stem at the second.
        let idx = index(&["a/goblin.webp", "b/Goblin.png"]);
        let result = resolver().resolve(&record("Goblin"), &idx);

        assert_eq!(result.tier, Some(MatchTier::ExactStem));
        assert_eq!(result.resolved_path.unwrap().as_str(), "b/Goblin.png");
    }

    #[test]
    fn test_exact_stem_with_extension_in_name() {
        let result = resolver().resolve(&record("Goblin.webp"), &index(&["art/Goblin.png"]));

        assert_eq!(result.tier, Some(MatchTier::ExactStem));
        assert_eq!(result.resolved_path.unwrap().as_str(), "art/Goblin.png");
    }

    #[test]
    fn test_article_variant_tier() {
        let result = resolver().resolve(&record("The Witch"), &index(&["art/witch.png"]));

        assert_eq!(result.tier, Some(MatchTier::Variant));
        assert_eq!(result.resolved_path.unwrap().as_str(), "art/witch.png");
    }

    #[test]
    fn test_alias_variant_tier() {
        let rec = record("Goblin Chieftain").with_aliases(None, Some("Goblin Boss".into()));
        let result = resolver().resolve(&rec, &index(&["art/goblinboss.webp"]));

        assert_eq!(result.status, MatchStatus::MatchedNew);
        assert_eq!(result.tier, Some(MatchTier::Variant));
    }

    #[test]
    fn test_empty_name_never_matches_empty_stem() {
        // ".png" has an empty stem and must not be hit by an empty key.
        let result = resolver().resolve(&record(""), &index(&["art/.png"]));
        assert_eq!(result.status, MatchStatus::NoMatch);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn test_slug_equal_names_resolve_at_slug_tier_or_earlier() {
        let cases = [
            ("Éowyn's Blade", "art/eowyns-blade.webp"),
            ("Salt & Pepper", "art/Salt and Pepper.png"),
            ("Dire Wolf", "art/dire_wolf.jpg"),
            ("Dragon (Ancient)", "art/dragon-ancient.jpeg"),
        ];
        for (name, path) in cases {
            let result = resolver().resolve(&record(name), &index(&[path]));
            let tier = result.tier.expect("expected a match");
            assert!(tier <= MatchTier::Slug, "{} resolved at {:?}", name, tier);
        }
    }

    #[test]
    fn test_multiple_records_may_share_a_file() {
        let idx = index(&["art/goblin.webp"]);
        let first = resolver().resolve(&record("Goblin"), &idx);
        let second = resolver().resolve(&record("goblin!"), &idx);
        assert_eq!(first.resolved_path, second.resolved_path);
    }
}

#[cfg(test)]
mod idempotency_tests {
    use std::sync::Arc;

    use crate::domain::{CandidateIndex, CandidatePath, ImageSlot, Record};
    use crate::events::EventBus;
    use crate::services::MatchResolver;

    fn fixture() -> (Vec<Record>, CandidateIndex) {
        let records = vec![
            Record::new(None, "Goblin Warrior".into(), ImageSlot::Empty),
            Record::new(None, "The Witch".into(), ImageSlot::Set("old.png".into())),
            Record::new(None, "Unknown Beast".into(), ImageSlot::Empty),
            Record::new(None, "Journal".into(), ImageSlot::Unsupported),
        ];
        let index = ["art/goblin-warrior.webp", "art/thewitch.png"]
            .into_iter()
            .map(CandidatePath::new)
            .collect();
        (records, index)
    }

    #[test]
    fn test_resolve_twice_is_identical() {
        let (records, index) = fixture();
        let resolver = MatchResolver::new(Arc::new(EventBus::new()));

        let first = resolver.resolve_all(&records, &index);
        let second = resolver.resolve_all(&records, &index);

        assert_eq!(first, second);
    }

    #[test]
    fn test_resolution_does_not_mutate_records() {
        let (records, index) = fixture();
        let before = records.clone();
        let resolver = MatchResolver::new(Arc::new(EventBus::new()));

        let _ = resolver.resolve_all(&records, &index);

        assert_eq!(records, before);
    }

    #[test]
    fn test_repeated_runs_emit_identical_event_ids() {
        let (records, index) = fixture();
        let bus = Arc::new(EventBus::new());
        let resolver = MatchResolver::new(bus.clone());

        resolver.resolve_all(&records, &index);
        let first: Vec<String> = bus.get_event_log().into_iter().map(|e| e.event_id).collect();
        bus.clear_event_log();

        resolver.resolve_all(&records, &index);
        let second: Vec<String> = bus.get_event_log().into_iter().map(|e| e.event_id).collect();

        // Two resolved, one unmatched, the skipped record emits nothing.
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }
}
