//! Async list controller.
//!
//! [`ListController`] drives the pure [`handle_event`] state machine against a
//! [`DataSource`]. It owns the [`ListState`], executes the [`Action`]s the
//! handler returns, and publishes a fresh [`ListSnapshot`] on a
//! `tokio::sync::watch` channel whenever something observable changes.
//!
//! # Execution Model
//!
//! The controller is meant for a single cooperative task. The only suspension
//! points are the data source calls and the debounce timer. The state lock is
//! a plain `std::sync::Mutex` that is never held across an `.await`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use medlist::app::{ListController, MatchMode};
//! use medlist::source::StaticSource;
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! runtime.block_on(async {
//!     let controller = ListController::new(
//!         Arc::new(StaticSource::builtin()),
//!         MatchMode::Substring,
//!         Duration::from_millis(300),
//!     );
//!     controller.load().await;
//!     controller.set_search("amox");
//!
//!     let snapshot = controller.snapshot();
//!     assert_eq!(snapshot.items.len(), 1);
//!     assert_eq!(snapshot.total, 6);
//! });
//! ```

use super::actions::Action;
use super::debounce::Debouncer;
use super::filter::MatchMode;
use super::handler::{handle_event, Event};
use super::state::{FetchFailure, ListSnapshot, ListState};
use crate::domain::{Collection, MedicinePatch, Result};
use crate::source::DataSource;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

/// Fetch coordinator and subscribe/notify hub for one list.
pub struct ListController<S: DataSource + ?Sized> {
    source: Arc<S>,
    state: Mutex<ListState>,
    snapshots: watch::Sender<ListSnapshot>,
    debouncer: Debouncer,
}

impl<S: DataSource + ?Sized> ListController<S> {
    /// Creates an idle controller. Nothing is fetched until [`load`](Self::load).
    #[must_use]
    pub fn new(source: Arc<S>, match_mode: MatchMode, debounce: Duration) -> Self {
        let mut state = ListState::new(match_mode);
        let (snapshots, _) = watch::channel(state.snapshot());

        Self {
            source,
            state: Mutex::new(state),
            snapshots,
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Loads the collection, showing a loading indicator with nothing behind it.
    ///
    /// A no-op while another request is in flight.
    pub async fn load(&self) {
        self.dispatch(Event::Load).await;
    }

    /// Re-fetches while the current items stay visible.
    ///
    /// If the request fails the old items remain, flagged with an error.
    pub async fn refresh(&self) {
        self.dispatch(Event::Refresh).await;
    }

    /// User-initiated recovery from an error; behaves like [`load`](Self::load).
    pub async fn retry(&self) {
        self.dispatch(Event::Retry).await;
    }

    /// Applies a search term immediately.
    pub fn set_search(&self, term: impl Into<String>) {
        let _ = self.apply(&Event::SearchChanged(term.into()));
    }

    /// Switches between substring and fuzzy matching for the current term.
    pub fn set_match_mode(&self, mode: MatchMode) {
        let _ = self.apply(&Event::MatchModeChanged(mode));
    }

    /// Applies a search term once input has been quiet for the debounce delay.
    ///
    /// # Returns
    ///
    /// `true` if this term was applied, `false` if a newer call superseded it.
    pub async fn search_debounced(&self, term: impl Into<String>) -> bool {
        let term = term.into();
        if !self.debouncer.settle().await {
            tracing::trace!(term_len = term.len(), "search superseded");
            return false;
        }
        self.set_search(term);
        true
    }

    /// Clears the error indicator, keeping any items that were behind it.
    pub fn dismiss_error(&self) {
        let _ = self.apply(&Event::DismissError);
    }

    /// Detaches the controller from its presenter.
    ///
    /// The collection is discarded and any response still in flight is dropped
    /// when it arrives. Subscribers are not notified.
    pub fn teardown(&self) {
        let mut state = self.lock();
        let _ = handle_event(&mut state, &Event::Teardown);
        let cleared = state.snapshot();
        drop(state);

        self.snapshots.send_if_modified(|current| {
            *current = cleared;
            false
        });
    }

    /// Returns the most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    ///
    /// The receiver sees the current snapshot immediately and is woken on every
    /// observable change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.snapshots.subscribe()
    }

    /// Patches one item in the data source, then refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the data source's error unchanged. The list state is not touched
    /// when the update fails.
    pub async fn update_item(&self, id: &str, patch: &MedicinePatch) -> Result<()> {
        let span = tracing::debug_span!("update_item", id);
        async {
            if let Err(error) = self.source.update(id, patch).await {
                tracing::warn!(kind = %error.kind(), %error, "update failed");
                return Err(error);
            }
            self.refresh().await;
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Deletes one item from the data source, then refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the data source's error unchanged. The list state is not touched
    /// when the removal fails.
    pub async fn remove_item(&self, id: &str) -> Result<()> {
        let span = tracing::debug_span!("remove_item", id);
        async {
            if let Err(error) = self.source.remove(id).await {
                tracing::warn!(kind = %error.kind(), %error, "remove failed");
                return Err(error);
            }
            self.refresh().await;
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, event: Event) {
        let mut pending: VecDeque<Action> = self.apply(&event).into();
        while let Some(action) = pending.pop_front() {
            let outcome = self.execute(action).await;
            pending.extend(self.apply(&outcome));
        }
    }

    /// Runs the handler and publishes a snapshot if anything visible changed.
    fn apply(&self, event: &Event) -> Vec<Action> {
        let mut state = self.lock();
        let (changed, actions) = handle_event(&mut state, event);

        if changed && !state.torn_down {
            let snapshot = state.snapshot();
            drop(state);
            self.snapshots.send_replace(snapshot);
        }
        actions
    }

    async fn execute(&self, action: Action) -> Event {
        match action {
            Action::Fetch { mode } => {
                let span = tracing::debug_span!("fetch_all", %mode);
                async {
                    match self.source.fetch_all().await {
                        Ok(items) => {
                            tracing::debug!(count = items.len(), "fetched collection");
                            Event::FetchSucceeded(Collection::from(items))
                        }
                        Err(error) => {
                            tracing::warn!(kind = %error.kind(), %error, "fetch failed");
                            Event::FetchFailed(FetchFailure::from(&error))
                        }
                    }
                }
                .instrument(span)
                .await
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: DataSource + ?Sized> std::fmt::Debug for ListController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("snapshot", &*self.snapshots.borrow())
            .field("debounce", &self.debouncer.delay())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Medicine;
    use crate::source::StaticSource;

    fn controller(items: Vec<Medicine>) -> ListController<StaticSource> {
        ListController::new(
            Arc::new(StaticSource::new(items)),
            MatchMode::Substring,
            Duration::from_millis(300),
        )
    }

    #[tokio::test]
    async fn test_load_publishes_to_subscribers() {
        let controller = controller(vec![Medicine::new("1", "Amoxicillin")]);
        let mut rx = controller.subscribe();
        assert!(rx.borrow_and_update().items.is_empty());

        controller.load().await;

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.items.len(), 1);
    }

    #[tokio::test]
    async fn test_unchanged_search_does_not_notify() {
        let controller = controller(vec![Medicine::new("1", "Amoxicillin")]);
        controller.load().await;
        controller.set_search("amox");

        let mut rx = controller.subscribe();
        rx.borrow_and_update();
        controller.set_search("amox");
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_match_mode_switch_publishes_new_view() {
        let controller = controller(vec![
            Medicine::new("1", "Amoxicillin"),
            Medicine::new("2", "Antifungal"),
        ]);
        controller.load().await;
        controller.set_search("amx");
        assert!(controller.snapshot().items.is_empty());

        let mut rx = controller.subscribe();
        rx.borrow_and_update();
        controller.set_match_mode(MatchMode::Fuzzy);

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].name, "Amoxicillin");

        controller.set_match_mode(MatchMode::Fuzzy);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_remove_item_refreshes_list() {
        let controller = controller(vec![
            Medicine::new("1", "Amoxicillin"),
            Medicine::new("2", "Paracetamol"),
        ]);
        controller.load().await;

        controller.remove_item("1").await.unwrap();

        let ids: Vec<_> = controller.snapshot().items.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_state_untouched() {
        let controller = controller(vec![Medicine::new("1", "Amoxicillin")]);
        controller.load().await;
        let before = controller.snapshot();

        let patch = MedicinePatch {
            name: Some("Renamed".to_string()),
            ..MedicinePatch::default()
        };
        let error = controller.update_item("missing", &patch).await.unwrap_err();

        assert_eq!(error.kind(), crate::domain::ErrorKind::Server);
        assert_eq!(controller.snapshot(), before);
    }

    #[tokio::test]
    async fn test_teardown_clears_without_notifying() {
        let controller = controller(vec![Medicine::new("1", "Amoxicillin")]);
        controller.load().await;

        let mut rx = controller.subscribe();
        rx.borrow_and_update();
        controller.teardown();

        assert!(!rx.has_changed().unwrap());
        assert!(controller.snapshot().items.is_empty());

        controller.load().await;
        assert!(controller.snapshot().items.is_empty());
    }
}
