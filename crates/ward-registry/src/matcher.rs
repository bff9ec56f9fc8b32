//! Address-to-property resolution.
//!
//! The matcher serves the risk stage: violation and 311 events arrive with
//! raw addresses, and each must resolve to a registry key or be counted as
//! unlinked. Strategies run in a fixed order; the first definitive match
//! wins.

use std::collections::BTreeMap;

use ward_core::entities::PropertyRecord;
use ward_core::enums::MatchMethod;
use ward_normalize::address::{jaccard_similarity, normalize_address};

/// Strategies in resolution order. `Synthesized` is not a lookup strategy;
/// it is the registry builder's fallback for records that never linked.
const STRATEGY_ORDER: &[MatchMethod] = &[
    MatchMethod::ExactAddress,
    MatchMethod::ExactComposite,
    MatchMethod::FuzzyJaccard,
];

/// A successful resolution: the key, which strategy produced it, and the
/// similarity confidence (1.0 for exact strategies).
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub property_key: String,
    pub method: MatchMethod,
    pub confidence: f64,
}

/// Lookup tables from normalized address forms to property keys.
///
/// Backed by `BTreeMap` so fuzzy scans visit candidates in a fixed order
/// and tie-breaks are deterministic across runs.
#[derive(Debug, Default)]
pub struct AddressIndex {
    exact: BTreeMap<String, String>,
    composite: BTreeMap<String, String>,
}

impl AddressIndex {
    /// Index a built registry. Both the plain normalized address and the
    /// address + district composite map to the property key.
    #[must_use]
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let mut index = Self::default();
        for record in records {
            if record.normalized_address.is_empty() {
                continue;
            }
            index
                .exact
                .entry(record.normalized_address.clone())
                .or_insert_with(|| record.property_key.clone());

            if let Some(district) = record.district.as_deref() {
                let composite =
                    normalize_address(&format!("{} {district}", record.normalized_address));
                if !composite.is_empty() {
                    index
                        .composite
                        .entry(composite)
                        .or_insert_with(|| record.property_key.clone());
                }
            }
        }
        index
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.composite.is_empty()
    }
}

/// Resolver over an [`AddressIndex`] with a configured fuzzy threshold.
#[derive(Debug)]
pub struct Matcher<'a> {
    index: &'a AddressIndex,
    fuzzy_threshold: f64,
    fuzzy_enabled: bool,
}

impl<'a> Matcher<'a> {
    #[must_use]
    pub const fn new(index: &'a AddressIndex, fuzzy_threshold: f64, fuzzy_enabled: bool) -> Self {
        Self {
            index,
            fuzzy_threshold,
            fuzzy_enabled,
        }
    }

    /// Resolve an event address to a property key, or `None` when every
    /// strategy declines; the caller records the event as unlinked.
    #[must_use]
    pub fn resolve(&self, address: &str, district: Option<&str>) -> Option<Resolution> {
        let normalized = normalize_address(address);
        if normalized.is_empty() {
            return None;
        }

        for strategy in STRATEGY_ORDER {
            let resolution = match strategy {
                MatchMethod::ExactAddress => self.try_exact(&normalized),
                MatchMethod::ExactComposite => self.try_composite(&normalized, district),
                MatchMethod::FuzzyJaccard => self.try_fuzzy(&normalized),
                MatchMethod::Synthesized => None,
            };
            if resolution.is_some() {
                return resolution;
            }
        }
        None
    }

    fn try_exact(&self, normalized: &str) -> Option<Resolution> {
        self.index.exact.get(normalized).map(|key| Resolution {
            property_key: key.clone(),
            method: MatchMethod::ExactAddress,
            confidence: 1.0,
        })
    }

    fn try_composite(&self, normalized: &str, district: Option<&str>) -> Option<Resolution> {
        let district = district?;
        let composite = normalize_address(&format!("{normalized} {district}"));
        self.index.composite.get(&composite).map(|key| Resolution {
            property_key: key.clone(),
            method: MatchMethod::ExactComposite,
            confidence: 1.0,
        })
    }

    /// Scan the exact index for the best Jaccard similarity. Candidates are
    /// visited in key order, and only a strictly better score replaces the
    /// current best, so equal-scoring ties resolve to the lexicographically
    /// first address.
    fn try_fuzzy(&self, normalized: &str) -> Option<Resolution> {
        if !self.fuzzy_enabled {
            return None;
        }
        let mut best: Option<(&String, f64)> = None;
        for (candidate, key) in &self.index.exact {
            let score = jaccard_similarity(normalized, candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((key, score));
            }
        }
        match best {
            Some((key, score)) if score >= self.fuzzy_threshold => Some(Resolution {
                property_key: key.clone(),
                method: MatchMethod::FuzzyJaccard,
                confidence: score,
            }),
            _ => None,
        }
    }
}
