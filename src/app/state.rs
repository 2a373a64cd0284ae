//! List state management and snapshot computation.
//!
//! This module defines [`ListState`], the single source of truth for one list
//! screen: the fetch lifecycle ([`FetchState`]), the current search term, and the
//! memoizing filter. Presenters never see `ListState` directly; they read
//! [`ListSnapshot`]s computed from it.
//!
//! # State Components
//!
//! - **Fetch state**: `Idle`, `Loading`, `Success`, or `Failed`, with the
//!   previously visible collection carried through `Loading`/`Failed` on refresh
//! - **Search term**: Owned by the presenter, pushed in via events
//! - **Filter engine**: Derives the visible items from (collection, term)
//! - **Torn down**: Once set, nothing mutates the state again
//!
//! # Example
//!
//! ```rust
//! use medlist::app::{ListState, MatchMode};
//!
//! let mut state = ListState::new(MatchMode::Substring);
//! let snapshot = state.snapshot();
//! assert!(!snapshot.loading);
//! assert!(snapshot.items.is_empty());
//! ```

use super::filter::{FilterEngine, MatchMode};
use super::modes::FetchMode;
use crate::domain::{CatalogError, Collection, ErrorKind, Medicine};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A classified fetch failure as stored in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CatalogError> for FetchFailure {
    fn from(error: &CatalogError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Request lifecycle of a list.
///
/// Exactly one variant is active. `stale` carries the collection that stays on
/// screen during and after a refresh.
#[derive(Debug, Clone, Default)]
pub enum FetchState {
    /// Nothing requested yet, or the error was dismissed with nothing to show.
    #[default]
    Idle,

    /// A request is in flight.
    Loading {
        mode: FetchMode,
        stale: Option<Collection>,
    },

    /// The last request succeeded.
    Success(Collection),

    /// The last request failed.
    Failed {
        failure: FetchFailure,
        stale: Option<Collection>,
    },
}

impl FetchState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns the collection currently on screen, if any.
    #[must_use]
    pub const fn visible(&self) -> Option<&Collection> {
        match self {
            Self::Idle => None,
            Self::Success(collection) => Some(collection),
            Self::Loading { stale, .. } | Self::Failed { stale, .. } => stale.as_ref(),
        }
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Read-only view of a list published to presenters.
///
/// `items` is the filtered view of the visible collection; `total` is the size
/// of the visible collection before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    /// A request is in flight.
    pub loading: bool,

    /// The in-flight request is a refresh over items that are still shown.
    pub refreshing: bool,

    /// Classification label of the last failure (`"NetworkError"`, ...).
    pub error: Option<String>,

    /// Full message of the last failure.
    pub error_detail: Option<String>,

    /// Visible items matching the search term, in source order.
    pub items: Arc<[Medicine]>,

    /// Number of visible items before filtering.
    pub total: usize,

    /// Current search term as entered.
    pub search_term: String,

    /// When the visible collection was fetched.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Central state container for one list.
///
/// Mutated only by [`handle_event`](super::handle_event).
#[derive(Debug, Clone)]
pub struct ListState {
    /// Request lifecycle.
    pub fetch: FetchState,

    /// Search term as entered by the presenter.
    pub search_term: String,

    /// Time of the last successful fetch.
    pub updated_at: Option<DateTime<Utc>>,

    /// Set once the owning screen is gone.
    pub torn_down: bool,

    filter: FilterEngine,
}

impl ListState {
    #[must_use]
    pub fn new(match_mode: MatchMode) -> Self {
        Self {
            fetch: FetchState::Idle,
            search_term: String::new(),
            updated_at: None,
            torn_down: false,
            filter: FilterEngine::new(match_mode),
        }
    }

    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.filter.mode()
    }

    /// Switches the match rule; the filter memo is dropped.
    pub(crate) fn set_match_mode(&mut self, mode: MatchMode) {
        self.filter.set_mode(mode);
    }

    /// Computes the presenter view of the current state.
    ///
    /// Takes `&mut self` only to reuse the filter memo; the result is a pure
    /// function of the fetch state and search term.
    pub fn snapshot(&mut self) -> ListSnapshot {
        let (items, total) = match self.fetch.visible() {
            Some(collection) => (
                self.filter.filtered(collection, &self.search_term),
                collection.len(),
            ),
            None => (Arc::from(Vec::new()), 0),
        };

        let failure = self.fetch.failure();
        let refreshing = matches!(&self.fetch, FetchState::Loading { stale: Some(_), .. });

        ListSnapshot {
            loading: self.fetch.is_loading(),
            refreshing,
            error: failure.map(|f| f.kind.to_string()),
            error_detail: failure.map(|f| f.message.clone()),
            items,
            total,
            search_term: self.search_term.clone(),
            updated_at: self.updated_at,
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}
