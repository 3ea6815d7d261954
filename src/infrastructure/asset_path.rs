// src/infrastructure/asset_path.rs
//
// Relative path helpers for the asset store namespace.
// All asset paths are `/`-delimited and relative to the store root.

/// Normalize a path-like string into a safe relative path.
///
/// Backslashes become `/`, segments are trimmed, and empty, `.` and `..`
/// segments are dropped, so the result can never climb above the root.
pub fn normalize_relative_path(path_like: &str) -> String {
    path_like
        .replace('\\', "/")
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a directory and a child name; an empty directory is the root.
pub fn join(dir: &str, name: &str) -> String {
    match (dir.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => dir.to_string(),
        (false, false) => format!("{}/{}", dir.trim_end_matches('/'), name),
    }
}

/// Parent of a relative path, or `None` for top-level entries.
pub fn parent(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx])
}

/// Every ancestor directory of `path`, shortest first, including `path` itself.
///
/// `ancestors("a/b/c")` yields `["a", "a/b", "a/b/c"]`.
pub fn ancestors(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        current = join(&current, part);
        out.push(current.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_blocks_traversal() {
        assert_eq!(normalize_relative_path("../../etc/passwd"), "etc/passwd");
        assert_eq!(normalize_relative_path("art\\monsters\\goblin.webp"), "art/monsters/goblin.webp");
        assert_eq!(normalize_relative_path("./a//b/ ./c "), "a/b/c");
        assert_eq!(normalize_relative_path("/abs/path/"), "abs/path");
        assert_eq!(normalize_relative_path(".."), "");
    }

    #[test]
    fn test_join_and_parent() {
        assert_eq!(join("", "a.png"), "a.png");
        assert_eq!(join("art", "a.png"), "art/a.png");
        assert_eq!(join("art/", "a.png"), "art/a.png");
        assert_eq!(parent("art/sub/a.png"), Some("art/sub"));
        assert_eq!(parent("a.png"), None);
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("a/b/c"), vec!["a", "a/b", "a/b/c"]);
        assert!(ancestors("").is_empty());
    }
}
