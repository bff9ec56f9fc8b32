//! Address normalization and token-set similarity.
//!
//! This is the critical correctness step for entity resolution: a naive
//! string match under-links by ignoring abbreviation variance ("Street" vs
//! "St") and over-links on unnormalized case. Every crate that compares
//! addresses goes through [`normalize_address`].

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("static pattern"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Street-type abbreviation pairs collapse onto the short form; unit
/// designators are dropped entirely so "Apt 4" and "Unit 4" compare equal.
static REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b(street|st)\b", " st "),
        (r"\b(avenue|ave)\b", " ave "),
        (r"\b(road|rd)\b", " rd "),
        (r"\b(boulevard|blvd)\b", " blvd "),
        (r"\b(place|pl)\b", " pl "),
        (r"\b(court|ct)\b", " ct "),
        (r"\b(apartment|apt|unit|floor|fl)\b", " "),
    ]
    .iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("static pattern"), *replacement))
    .collect()
});

/// Normalize a street address for equality comparison.
///
/// Case-folds, treats `#` as a separator, strips punctuation, collapses
/// street-type abbreviation variance, drops unit designators, and squeezes
/// whitespace. Returns an empty string when nothing addressable remains.
#[must_use]
pub fn normalize_address(value: &str) -> String {
    let mut value = value.trim().to_lowercase();
    value = value.replace('#', " ");
    value = NON_ALNUM.replace_all(&value, " ").into_owned();
    for (pattern, replacement) in REWRITES.iter() {
        value = pattern.replace_all(&value, *replacement).into_owned();
    }
    WHITESPACE.replace_all(value.trim(), " ").into_owned()
}

/// Token set of a normalized address, for Jaccard similarity.
#[must_use]
pub fn token_set(value: &str) -> BTreeSet<String> {
    normalize_address(value)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of the token sets of two addresses. 0.0 when either
/// side has no tokens.
#[must_use]
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let ta = token_set(a);
    let tb = token_set(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let overlap = ta.intersection(&tb).count();
    let union = ta.union(&tb).count();
    if union == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        overlap as f64 / union as f64
    }
}
