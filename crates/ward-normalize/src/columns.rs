//! Header aliasing: resolve canonical fields against the varying column
//! names municipal exports actually use.

use regex::Regex;
use std::sync::LazyLock;

static HEADER_JUNK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static pattern"));

/// Normalize a header for alias lookup: lowercase, runs of non-alphanumerics
/// collapsed to single underscores, no leading/trailing underscore.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    HEADER_JUNK
        .replace_all(header.trim().to_lowercase().as_str(), "_")
        .trim_matches('_')
        .to_string()
}

/// Find the index of the first candidate alias present in `headers`.
/// Candidates are tried in order, so earlier aliases take precedence.
#[must_use]
pub fn choose_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    for candidate in candidates {
        if let Some(index) = normalized.iter().position(|h| h == candidate) {
            return Some(index);
        }
    }
    None
}
