// src/domain/candidate/entity.rs
//
// Candidate pool value objects
//
// CRITICAL INVARIANTS:
// - Every indexed path passed the extension filter
// - The index never contains directories
// - The index is immutable once built

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::keys::{basename, condense, extension_of, slugify, strip_extension};

/// Extensions accepted when no list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["webp", "png", "jpg", "jpeg"];

// ============================================================================
// CANDIDATE PATH
// ============================================================================

/// A `/`-delimited file path relative to the asset root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidatePath(String);

impl CandidatePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        basename(&self.0)
    }

    /// Filename without its extension
    pub fn stem(&self) -> &str {
        strip_extension(self.file_name())
    }

    pub fn extension(&self) -> Option<String> {
        extension_of(&self.0)
    }
}

impl std::fmt::Display for CandidatePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidatePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// EXTENSION FILTER
// ============================================================================

/// Ordered, lower-case allow-list of file extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Build from any list of extensions; entries are trimmed, lower-cased,
    /// stripped of a leading dot, and deduplicated in order.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !out.contains(&ext) {
                out.push(ext);
            }
        }
        Self { extensions: out }
    }

    /// Parse a comma-separated list such as `"webp, PNG,jpg"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Like `parse`, but an empty list means the default image types.
    pub fn parse_or_default(list: &str) -> Self {
        let filter = Self::parse(list);
        if filter.extensions.is_empty() {
            Self::default()
        } else {
            filter
        }
    }

    pub fn allows(&self, path: &str) -> bool {
        extension_of(path)
            .map(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
            .unwrap_or(false)
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl std::fmt::Display for ExtensionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extensions.join(","))
    }
}

// ============================================================================
// CANDIDATE INDEX
// ============================================================================

/// Three lookup tables over the candidate pool, from strictest to loosest key.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    by_exact_stem: HashMap<String, CandidatePath>,
    by_slug: HashMap<String, CandidatePath>,
    by_condensed_slug: HashMap<String, CandidatePath>,
    indexed: usize,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file that already passed the extension filter.
    ///
    /// Exact stems overwrite (last wins); slug and condensed keys keep the
    /// first path seen so enumeration order decides ties.
    pub fn insert(&mut self, path: CandidatePath) {
        let stem = path.stem().to_string();
        let slug = slugify(&stem);
        let condensed = condense(&slug);

        if !slug.is_empty() {
            self.by_slug.entry(slug).or_insert_with(|| path.clone());
        }
        if !condensed.is_empty() {
            self.by_condensed_slug
                .entry(condensed)
                .or_insert_with(|| path.clone());
        }
        self.by_exact_stem.insert(stem, path);
        self.indexed += 1;
    }

    pub fn by_exact_stem(&self, stem: &str) -> Option<&CandidatePath> {
        self.by_exact_stem.get(stem)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&CandidatePath> {
        self.by_slug.get(slug)
    }

    pub fn by_condensed_slug(&self, condensed: &str) -> Option<&CandidatePath> {
        self.by_condensed_slug.get(condensed)
    }

    /// Number of files inserted (duplicates included)
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }
}

impl FromIterator<CandidatePath> for CandidateIndex {
    fn from_iter<T: IntoIterator<Item = CandidatePath>>(iter: T) -> Self {
        let mut index = CandidateIndex::new();
        for path in iter {
            index.insert(path);
        }
        index
    }
}
