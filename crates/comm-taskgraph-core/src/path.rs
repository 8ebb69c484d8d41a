//! Path pattern matching for file-change checks
//!
//! Patterns are path-style globs, not regular expressions:
//!
//! - `*` matches any run of characters inside a single path segment
//! - `**` matches zero or more whole directories
//! - a pattern matching an ancestor directory also matches everything below
//!   it, so `mail` matches `mail/base/content/foo.js`
//! - an empty pattern matches every path
//!
//! An asterisk standing in for a whole segment cannot be empty: `foo/bar`
//! does not match `foo/*/bar`.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use glob::{MatchOptions, Pattern};
use tracing::warn;

static PATTERN_CACHE: LazyLock<Mutex<HashMap<String, Pattern>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// The path itself and each of its ancestor directories, shortest first
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/')
        .map(move |(i, _)| &path[..i])
        .chain(std::iter::once(path))
}

/// Return whether `path` matches `pattern`
pub fn match_path(path: &str, pattern: &str) -> bool {
    // A trailing `**` adds nothing once ancestors match.
    let pattern = pattern
        .strip_suffix("**")
        .filter(|rest| rest.is_empty() || rest.ends_with('/'))
        .map(|rest| rest.trim_end_matches('/'))
        .unwrap_or(pattern);

    if pattern.is_empty() {
        return true;
    }

    let mut cache = match PATTERN_CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if !cache.contains_key(pattern) {
        match Pattern::new(pattern) {
            Ok(compiled) => {
                cache.insert(pattern.to_string(), compiled);
            }
            Err(e) => {
                warn!(pattern, error = %e, "invalid path pattern");
                return false;
            }
        }
    }

    let Some(compiled) = cache.get(pattern) else {
        return false;
    };
    ancestors(path).any(|candidate| compiled.matches_with(candidate, MATCH_OPTIONS))
}

/// Return whether `path` matches any of `patterns`
pub fn match_any<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| match_path(path, p.as_ref()))
}
