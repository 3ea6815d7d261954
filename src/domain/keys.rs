// src/domain/keys.rs
//
// Key Normalizer
//
// Pure functions that turn free-form names into comparable keys.
//
// CRITICAL RULES:
// - No I/O, no side effects
// - Total: every input produces a key (possibly empty)
// - slugify is idempotent: slugify(slugify(x)) == slugify(x)

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

fn non_alphanumeric_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"))
}

fn leading_article() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:the|a|an)\s+").expect("static article pattern"))
}

/// Canonical slug of a name.
///
/// Accents are stripped through compatibility decomposition, `&` becomes the
/// word "and", apostrophes disappear, and every run of characters outside
/// `[a-z0-9]` collapses into one hyphen. Leading and trailing hyphens are
/// trimmed.
///
/// ```
/// use artmatch::domain::keys::slugify;
/// assert_eq!(slugify("Goblin Warrior"), "goblin-warrior");
/// assert_eq!(slugify("Salt & Pepper"), "salt-and-pepper");
/// ```
pub fn slugify(name: &str) -> String {
    let folded = name
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .replace('&', " and ")
        .replace(['\'', '\u{2019}'], "");

    non_alphanumeric_run()
        .replace_all(&folded, "-")
        .trim_matches('-')
        .to_string()
}

/// Removes the last dot-delimited suffix of a filename.
///
/// A name without a dot, or ending in a dot, is returned unchanged.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx + 1 < filename.len() => &filename[..idx],
        _ => filename,
    }
}

/// Removes one leading "the", "a" or "an" (any case) followed by whitespace.
pub fn strip_leading_article(name: &str) -> &str {
    match leading_article().find(name) {
        Some(m) => &name[m.end()..],
        None => name,
    }
}

/// Removes every hyphen from an already slugified key.
pub fn condense(slug: &str) -> String {
    slug.replace('-', "")
}

/// Last `/`-delimited segment of a path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Lower-cased text after the final dot of the basename, if any.
pub fn extension_of(path: &str) -> Option<String> {
    let name = basename(path);
    let idx = name.rfind('.')?;
    let ext = &name[idx + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}
