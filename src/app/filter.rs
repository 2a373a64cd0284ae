//! Search filtering over a loaded collection.
//!
//! The filter is a pure derivation of `(collection, term) -> filtered collection`.
//! [`apply`] is the plain function; [`FilterEngine`] wraps it with a one-entry
//! memo keyed on the collection's identity and the normalized term, so
//! re-reading the list without changing either input does no work.
//!
//! # Matching Rules
//!
//! 1. **Normalize**: trim the term and lowercase it
//! 2. **Empty term**: every item matches (identity)
//! 3. **Substring** (default): the term occurs in the lowercased name or description
//! 4. **Fuzzy**: every whitespace-separated token fuzzy-matches the lowercased
//!    name or description (Skim algorithm)
//!
//! # Example
//!
//! ```rust
//! use medlist::app::filter::apply;
//! use medlist::domain::Medicine;
//!
//! let items = vec![Medicine::new("1", "Amoxicillin"), Medicine::new("2", "Paracetamol")];
//! let found = apply(&items, "  AMOX ");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, "1");
//! ```

use crate::domain::{Collection, Medicine};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Deserialize;
use std::sync::Arc;

/// How a search term is matched against an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring of name or description.
    #[default]
    Substring,

    /// Case-insensitive fuzzy match of every token against name or description.
    Fuzzy,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown match mode '{other}'")),
        }
    }
}

/// Trims and case-folds a search term.
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Returns the items whose name or description contains `term`, case-insensitively.
///
/// Source order is preserved. An empty or whitespace-only term returns every item.
#[must_use]
pub fn apply(collection: &[Medicine], term: &str) -> Vec<Medicine> {
    apply_with(collection, term, MatchMode::Substring)
}

/// Like [`apply`] with an explicit [`MatchMode`].
#[must_use]
pub fn apply_with(collection: &[Medicine], term: &str, mode: MatchMode) -> Vec<Medicine> {
    let needle = normalize_term(term);
    if needle.is_empty() {
        return collection.to_vec();
    }

    let matcher = Matcher::new(&needle, mode);
    collection
        .iter()
        .filter(|medicine| matcher.matches(medicine))
        .cloned()
        .collect()
}

/// A prepared term for one filtering pass.
struct Matcher<'a> {
    needle: &'a str,
    tokens: Vec<&'a str>,
    fuzzy: Option<SkimMatcherV2>,
}

impl<'a> Matcher<'a> {
    fn new(needle: &'a str, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Substring => Self {
                needle,
                tokens: Vec::new(),
                fuzzy: None,
            },
            MatchMode::Fuzzy => Self {
                needle,
                tokens: needle.split_whitespace().collect(),
                fuzzy: Some(SkimMatcherV2::default()),
            },
        }
    }

    fn matches(&self, medicine: &Medicine) -> bool {
        let name = medicine.name.to_lowercase();
        let description = medicine.description_text().to_lowercase();

        match &self.fuzzy {
            None => name.contains(self.needle) || description.contains(self.needle),
            Some(fuzzy) => self.tokens.iter().all(|token| {
                fuzzy.fuzzy_match(&name, token).is_some()
                    || fuzzy.fuzzy_match(&description, token).is_some()
            }),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    source: Collection,
    term: String,
    result: Collection,
}

/// Memoizing filter over a shared [`Collection`].
///
/// The memo holds the last `(collection pointer, normalized term)` pair and its
/// result. Asking again with the same `Arc` and an equivalent term returns the
/// cached `Arc` without recomputing; any other input recomputes and replaces the
/// memo. The result never depends on memo state.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    mode: MatchMode,
    cache: Option<CacheEntry>,
}

impl FilterEngine {
    #[must_use]
    pub const fn new(mode: MatchMode) -> Self {
        Self { mode, cache: None }
    }

    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Changes the match mode and drops the memo.
    pub fn set_mode(&mut self, mode: MatchMode) {
        if self.mode != mode {
            self.mode = mode;
            self.cache = None;
        }
    }

    /// Returns the filtered view of `collection` for `term`.
    ///
    /// An empty term yields `collection` itself (same `Arc`).
    pub fn filtered(&mut self, collection: &Collection, term: &str) -> Collection {
        let term = normalize_term(term);
        if term.is_empty() {
            return Arc::clone(collection);
        }

        if let Some(entry) = &self.cache {
            if Arc::ptr_eq(&entry.source, collection) && entry.term == term {
                tracing::trace!("filter memo hit");
                return Arc::clone(&entry.result);
            }
        }

        let _span = tracing::debug_span!("apply_search_filter",
            total = collection.len(),
            term_len = term.len(),
            mode = ?self.mode
        )
        .entered();

        let result: Collection = apply_with(collection, &term, self.mode).into();
        tracing::debug!(filtered_count = result.len(), "search filter applied");

        self.cache = Some(CacheEntry {
            source: Arc::clone(collection),
            term,
            result: Arc::clone(&result),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(id: &str, name: &str, description: &str) -> Medicine {
        Medicine {
            description: Some(description.to_string()),
            ..Medicine::new(id, name)
        }
    }

    fn sample() -> Vec<Medicine> {
        vec![
            medicine("1", "Amoxicillin", "Used to treat infections such as ear infections"),
            medicine("2", "Paracetamol", "Used to alleviate mild to moderate pain"),
            medicine("3", "Ibuprofen", "Anti-inflammatory pain relief"),
            Medicine::new("4", "Antifungal"),
        ]
    }

    #[test]
    fn test_empty_term_is_identity() {
        let items = sample();
        assert_eq!(apply(&items, ""), items);
        assert_eq!(apply(&items, "   "), items);
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let found = apply(&sample(), "amox");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Amoxicillin");

        assert_eq!(apply(&sample(), "AMOXICILLIN").len(), 1);
    }

    #[test]
    fn test_matches_description() {
        let ids: Vec<_> = apply(&sample(), "PAIN").into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(apply(&sample(), "xyz").is_empty());
    }

    #[test]
    fn test_empty_collection_yields_empty() {
        assert!(apply(&[], "amox").is_empty());
        assert!(apply(&[], "").is_empty());
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let items = sample();
        let term = "in";
        let found = apply(&items, term);

        let mut cursor = items.iter();
        for item in &found {
            assert!(
                item.name.to_lowercase().contains(term)
                    || item.description_text().to_lowercase().contains(term)
            );
            assert!(cursor.any(|candidate| candidate == item), "order or membership broken");
        }
    }

    #[test]
    fn test_fuzzy_mode_matches_scattered_letters() {
        let found = apply_with(&sample(), "amxcln", MatchMode::Fuzzy);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        assert!(apply_with(&sample(), "amxcln", MatchMode::Substring).is_empty());
    }

    #[test]
    fn test_fuzzy_mode_requires_every_token() {
        let found = apply_with(&sample(), "para pain", MatchMode::Fuzzy);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_match_mode_from_str() {
        assert_eq!("Fuzzy".parse::<MatchMode>().unwrap(), MatchMode::Fuzzy);
        assert_eq!("substring".parse::<MatchMode>().unwrap(), MatchMode::Substring);
        assert!("regex".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_engine_memoizes_on_identity_and_term() {
        let mut engine = FilterEngine::default();
        let collection: Collection = sample().into();

        let first = engine.filtered(&collection, "amox");
        let second = engine.filtered(&collection, " AMOX ");
        assert!(Arc::ptr_eq(&first, &second));

        let other_term = engine.filtered(&collection, "pain");
        assert!(!Arc::ptr_eq(&first, &other_term));
    }

    #[test]
    fn test_engine_recomputes_for_new_collection() {
        let mut engine = FilterEngine::default();
        let old: Collection = sample().into();
        let new: Collection = sample()[..1].to_vec().into();

        let before = engine.filtered(&old, "pain");
        let after = engine.filtered(&new, "pain");

        assert_eq!(before.len(), 2);
        assert!(after.is_empty());
    }

    #[test]
    fn test_engine_empty_term_returns_same_collection() {
        let mut engine = FilterEngine::new(MatchMode::Fuzzy);
        let collection: Collection = sample().into();
        assert!(Arc::ptr_eq(&engine.filtered(&collection, ""), &collection));
    }

    #[test]
    fn test_engine_set_mode_drops_memo() {
        let mut engine = FilterEngine::default();
        let collection: Collection = sample().into();

        assert!(engine.filtered(&collection, "amxcln").is_empty());
        engine.set_mode(MatchMode::Fuzzy);
        assert_eq!(engine.filtered(&collection, "amxcln").len(), 1);
    }
}
