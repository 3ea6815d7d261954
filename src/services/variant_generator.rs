// src/services/variant_generator.rs
//
// Candidate-Name Generator
//
// Produces the ordered set of lookup keys a record may be known by.
//
// CRITICAL RULES:
// - Output order is first-production order
// - No duplicates, no empty keys
// - Absent aliases contribute nothing

use crate::domain::keys::{condense, slugify, strip_leading_article};
use crate::domain::AliasSource;

/// Push `value` unless it is empty or already present.
fn push_unique(out: &mut Vec<String>, value: String) {
    if !value.is_empty() && !out.contains(&value) {
        out.push(value);
    }
}

/// Ordered, deduplicated slug and condensed-slug keys for a record.
///
/// Raw names are the primary name then each alias. Every raw name also
/// contributes its article-stripped form; each resulting name yields its
/// slug followed by its condensed slug.
pub fn generate_variants(source: &impl AliasSource) -> Vec<String> {
    let mut raw_names = Vec::new();
    push_unique(&mut raw_names, source.primary_name().to_string());
    for alias in source.aliases() {
        push_unique(&mut raw_names, alias.to_string());
    }

    let mut working = Vec::new();
    for name in &raw_names {
        push_unique(&mut working, name.clone());
        push_unique(&mut working, strip_leading_article(name).to_string());
    }

    let mut keys = Vec::new();
    for name in &working {
        let slug = slugify(name);
        let condensed = condense(&slug);
        push_unique(&mut keys, slug);
        push_unique(&mut keys, condensed);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImageSlot, Record};

    fn record(name: &str) -> Record {
        Record::new(None, name.to_string(), ImageSlot::Empty)
    }

    #[test]
    fn test_primary_name_only() {
        assert_eq!(
            generate_variants(&record("Unknown Beast")),
            vec!["unknown-beast", "unknownbeast"]
        );
    }

    #[test]
    fn test_article_stripped_forms_follow_each_name() {
        assert_eq!(
            generate_variants(&record("The Witch")),
            vec!["the-witch", "thewitch", "witch"]
        );
    }

    #[test]
    fn test_aliases_come_after_primary_name() {
        let rec = record("Goblin Warrior").with_aliases(
            Some("goblin-raider".into()),
            Some("Goblin Warrior".into()),
        );
        assert_eq!(
            generate_variants(&rec),
            vec!["goblin-warrior", "goblinwarrior", "goblin-raider", "goblinraider"]
        );
    }

    #[test]
    fn test_empty_inputs_produce_nothing() {
        let rec = record("").with_aliases(Some(String::new()), None);
        assert!(generate_variants(&rec).is_empty());
        assert!(generate_variants(&record("!!!")).is_empty());
    }

    #[test]
    fn test_output_has_no_duplicates() {
        let rec = record("A Wolf").with_aliases(Some("wolf".into()), Some("a-wolf".into()));
        let keys = generate_variants(&rec);
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
        assert_eq!(keys, vec!["a-wolf", "awolf", "wolf"]);
    }
}
