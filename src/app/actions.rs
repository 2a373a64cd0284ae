//! Actions representing side effects to be executed by the controller.
//!
//! The event handler never performs I/O. When a transition needs the data
//! source, it returns an [`Action`] and the controller executes it, feeding the
//! outcome back in as another event.
//!
//! # Example
//!
//! ```rust
//! use medlist::app::{Action, FetchMode};
//!
//! let actions = vec![Action::Fetch { mode: FetchMode::Load }];
//! assert_eq!(actions.len(), 1);
//! ```

use super::modes::FetchMode;

/// Commands representing side effects to be executed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Calls `fetch_all` on the data source and reports the outcome as
    /// `FetchSucceeded` or `FetchFailed`.
    Fetch {
        /// Which user intent started the request.
        mode: FetchMode,
    },
}
