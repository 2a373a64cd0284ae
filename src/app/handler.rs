//! Event handling and state transition logic.
//!
//! This module implements the pure state machine behind a list: it takes an
//! event, mutates [`ListState`], and returns whether anything observable changed
//! plus the side effects to run. It performs no I/O, which keeps every lifecycle
//! rule testable without a runtime.
//!
//! # Architecture
//!
//! ```text
//! Presenter → Event → handle_event → ListState → Action::Fetch → DataSource
//!                          ↑                                         ↓
//!                          └──── FetchSucceeded / FetchFailed ───────┘
//! ```
//!
//! # Rules
//!
//! - At most one fetch in flight: `Load`/`Refresh`/`Retry` while loading do nothing
//! - `Refresh` keeps the visible collection on screen; `Load`/`Retry` clear it
//! - A failed refresh keeps the old collection and adds an error
//! - Responses are dropped when no request is pending or after teardown
//!
//! # Example
//!
//! ```rust
//! use medlist::app::{handle_event, Action, Event, FetchMode, ListState};
//!
//! let mut state = ListState::default();
//! let (changed, actions) = handle_event(&mut state, &Event::Load);
//! assert!(changed);
//! assert_eq!(actions, vec![Action::Fetch { mode: FetchMode::Load }]);
//!
//! // A second load while the first is pending is ignored.
//! let (changed, actions) = handle_event(&mut state, &Event::Load);
//! assert!(!changed);
//! assert!(actions.is_empty());
//! ```

use super::actions::Action;
use super::filter::MatchMode;
use super::modes::FetchMode;
use super::state::{FetchFailure, FetchState, ListState};
use crate::domain::Collection;

/// Events triggered by the presenter or by completed requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Initial load request.
    Load,
    /// Pull-to-refresh request.
    Refresh,
    /// User-initiated recovery from an error.
    Retry,
    /// The pending request returned a collection.
    FetchSucceeded(Collection),
    /// The pending request failed.
    FetchFailed(FetchFailure),
    /// The presenter's search term changed.
    SearchChanged(String),
    /// The presenter switched between substring and fuzzy matching.
    MatchModeChanged(MatchMode),
    /// The presenter acknowledged the error indicator.
    DismissError,
    /// The owning screen is gone.
    Teardown,
}

/// Processes an event, mutates list state, and returns actions to execute.
///
/// # Returns
///
/// `(changed, actions)`: `changed` is `true` when the presenter-visible state
/// differs from before, `actions` are the side effects to run in order.
#[must_use]
pub fn handle_event(state: &mut ListState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event = event.name()).entered();

    if state.torn_down {
        tracing::debug!("list torn down, ignoring event");
        return (false, vec![]);
    }

    match event {
        Event::Load => start_fetch(state, FetchMode::Load),
        Event::Refresh => start_fetch(state, FetchMode::Refresh),
        Event::Retry => start_fetch(state, FetchMode::Retry),
        Event::FetchSucceeded(collection) => {
            if !state.fetch.is_loading() {
                tracing::debug!("no request pending, discarding response");
                return (false, vec![]);
            }
            tracing::debug!(count = collection.len(), "fetch succeeded");
            state.fetch = FetchState::Success(collection.clone());
            state.updated_at = Some(chrono::Utc::now());
            (true, vec![])
        }
        Event::FetchFailed(failure) => {
            let FetchState::Loading { stale, .. } = &state.fetch else {
                tracing::debug!("no request pending, discarding failure");
                return (false, vec![]);
            };
            tracing::debug!(
                kind = %failure.kind,
                kept_items = stale.as_ref().map_or(0, |c| c.len()),
                "fetch failed"
            );
            state.fetch = FetchState::Failed {
                failure: failure.clone(),
                stale: stale.clone(),
            };
            (true, vec![])
        }
        Event::SearchChanged(term) => {
            if state.search_term == *term {
                return (false, vec![]);
            }
            state.search_term.clone_from(term);
            (true, vec![])
        }
        Event::MatchModeChanged(mode) => {
            if state.match_mode() == *mode {
                return (false, vec![]);
            }
            state.set_match_mode(*mode);
            (true, vec![])
        }
        Event::DismissError => {
            let FetchState::Failed { stale, .. } = &state.fetch else {
                return (false, vec![]);
            };
            state.fetch = stale
                .clone()
                .map_or(FetchState::Idle, FetchState::Success);
            (true, vec![])
        }
        Event::Teardown => {
            tracing::debug!("tearing down list");
            state.torn_down = true;
            state.fetch = FetchState::Idle;
            (false, vec![])
        }
    }
}

fn start_fetch(state: &mut ListState, mode: FetchMode) -> (bool, Vec<Action>) {
    if state.fetch.is_loading() {
        tracing::debug!(%mode, "fetch already in flight, ignoring");
        return (false, vec![]);
    }

    let stale = if mode.keeps_stale_items() {
        state.fetch.visible().cloned()
    } else {
        None
    };

    tracing::debug!(%mode, keeps_items = stale.is_some(), "starting fetch");
    state.fetch = FetchState::Loading { mode, stale };
    (true, vec![Action::Fetch { mode }])
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Refresh => "refresh",
            Self::Retry => "retry",
            Self::FetchSucceeded(_) => "fetch_succeeded",
            Self::FetchFailed(_) => "fetch_failed",
            Self::SearchChanged(_) => "search_changed",
            Self::MatchModeChanged(_) => "match_mode_changed",
            Self::DismissError => "dismiss_error",
            Self::Teardown => "teardown",
        }
    }
}
