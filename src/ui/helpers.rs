//! Shared formatting utilities for the presenter layer.
//!
//! # Features
//!
//! - **Match Highlighting**: Computes and marks character ranges matching a search term
//! - **Truncation**: Shortens long descriptions on a character boundary
//! - **Relative Time**: Formats "5m ago" style timestamps
//!
//! All ranges are `(start, end)` character indices, start inclusive and end
//! exclusive, never byte offsets.
//!
//! # Example
//!
//! ```rust
//! use medlist::app::MatchMode;
//! use medlist::ui::helpers::{highlight_ranges, mark_ranges};
//!
//! let ranges = highlight_ranges("Amoxicillin", "amox", MatchMode::Substring);
//! assert_eq!(ranges, vec![(0, 4)]);
//! assert_eq!(mark_ranges("Amoxicillin", &ranges, "[", "]"), "[Amox]icillin");
//! ```

use crate::app::filter::normalize_term;
use crate::app::MatchMode;
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Computes the character ranges of `text` that match `term`.
///
/// Substring mode marks every non-overlapping occurrence of the whole term.
/// Fuzzy mode marks the matched characters, with adjacent positions merged
/// into one range. An empty term, or no match, yields no ranges.
///
/// # Parameters
///
/// * `text` - Text shown to the user
/// * `term` - Search term as entered (trimmed and case-folded here)
/// * `mode` - Matching rule in effect for the list
#[must_use]
pub fn highlight_ranges(text: &str, term: &str, mode: MatchMode) -> Vec<(usize, usize)> {
    let needle = normalize_term(term);
    if needle.is_empty() {
        return vec![];
    }

    match mode {
        MatchMode::Substring => substring_ranges(&FoldedText::new(text), &needle),
        MatchMode::Fuzzy => {
            let folded = FoldedText::new(text);
            let haystack: String = folded.chars.iter().collect();
            let matcher = SkimMatcherV2::default();
            matcher
                .fuzzy_indices(&haystack, &needle)
                .map(|(_score, indices)| {
                    let mut positions: Vec<usize> =
                        indices.iter().filter_map(|&i| folded.origin.get(i).copied()).collect();
                    positions.dedup();
                    coalesce(&positions)
                })
                .unwrap_or_default()
        }
    }
}

/// Lowercased text with each folded character mapped back to the index of
/// the original character it came from. Lowercasing can expand one character
/// into several (`İ` folds to `i̇`).
struct FoldedText {
    chars: Vec<char>,
    origin: Vec<usize>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        for (index, c) in text.chars().enumerate() {
            for folded in c.to_lowercase() {
                chars.push(folded);
                origin.push(index);
            }
        }
        Self { chars, origin }
    }

    /// Maps a folded `[start, end)` range onto original character indices.
    fn original_range(&self, start: usize, end: usize) -> (usize, usize) {
        (self.origin[start], self.origin[end - 1] + 1)
    }
}

fn substring_ranges(folded: &FoldedText, needle: &str) -> Vec<(usize, usize)> {
    let haystack = &folded.chars;
    let pattern: Vec<char> = needle.chars().collect();
    if pattern.is_empty() || pattern.len() > haystack.len() {
        return vec![];
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i + pattern.len() <= haystack.len() {
        if haystack[i..i + pattern.len()] == pattern[..] {
            let (start, end) = folded.original_range(i, i + pattern.len());
            match ranges.last_mut() {
                Some(last) if last.1 > start => last.1 = last.1.max(end),
                _ => ranges.push((start, end)),
            }
            i += pattern.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Merges sorted character indices into contiguous ranges.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start = None;
    let mut prev = None;

    for &idx in indices {
        match (start, prev) {
            (Some(_), Some(p)) if idx == p + 1 => {
                prev = Some(idx);
            }
            (Some(s), Some(p)) => {
                ranges.push((s, p + 1));
                start = Some(idx);
                prev = Some(idx);
            }
            _ => {
                start = Some(idx);
                prev = Some(idx);
            }
        }
    }

    if let (Some(s), Some(p)) = (start, prev) {
        ranges.push((s, p + 1));
    }
    ranges
}

/// Wraps each range of `text` in `open`/`close` markers.
///
/// Ranges past the end of the text are clamped.
#[must_use]
pub fn mark_ranges(text: &str, ranges: &[(usize, usize)], open: &str, close: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);
        out.push_str(open);
        out.extend(&chars[start..end]);
        out.push_str(close);
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Shortens `text` to at most `max_chars` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let head: String = text.chars().take(keep).collect();
    format!("{}...", head.trim_end())
}

/// Formats how long ago `then` was, relative to `now`.
///
/// Returns "just now", "Xm ago", "Xh ago", or "Xd ago". Timestamps in the
/// future count as "just now".
#[must_use]
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - then).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}
