//! Application layer coordinating state, events, and actions.
//!
//! This module sits between presenters (the CLI, or any UI) and the data
//! sources. It implements the fetch/filter lifecycle shared by every list
//! screen as one reusable controller.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Presenter → Events → Event Handler → State Mutations → Actions → DataSource
//!                           ↑                                         ↓
//!                           └──────── Fetch Outcomes ─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Async driver executing actions and publishing snapshots
//! - [`debounce`]: Quiet-period gate for search input
//! - [`filter`]: Search matching and the memoizing filter engine
//! - [`handler`]: Event processing logic and state transitions
//! - [`modes`]: Why a fetch was started
//! - [`state`]: Fetch lifecycle, list state, and snapshot computation
//!
//! # Example
//!
//! ```rust
//! use medlist::app::{handle_event, Event, ListState};
//!
//! let mut state = ListState::default();
//! let (changed, actions) = handle_event(&mut state, &Event::Refresh);
//! assert!(changed);
//! assert_eq!(actions.len(), 1);
//! ```

pub mod actions;
pub mod controller;
pub mod debounce;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::ListController;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use filter::{FilterEngine, MatchMode};
pub use handler::{handle_event, Event};
pub use modes::FetchMode;
pub use state::{FetchFailure, FetchState, ListSnapshot, ListState};
