//! Fetch mode types for the list lifecycle.
//!
//! The three ways a user can ask for data share one request path and differ only
//! in how the currently visible list is treated while the request is in flight.
//!
//! # Example
//!
//! ```rust
//! use medlist::app::FetchMode;
//!
//! assert!(FetchMode::Refresh.keeps_stale_items());
//! assert!(!FetchMode::Retry.keeps_stale_items());
//! ```

use std::fmt;

/// Why a fetch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Initial load. The list shows a loading indicator until data arrives.
    Load,

    /// Pull-to-refresh. The previously displayed items stay visible until the
    /// new result arrives, and remain visible if it fails.
    Refresh,

    /// User-initiated recovery from an error. Behaves exactly like `Load`.
    Retry,
}

impl FetchMode {
    /// Returns `true` if the visible collection is retained during the request.
    #[must_use]
    pub const fn keeps_stale_items(self) -> bool {
        matches!(self, Self::Refresh)
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => f.write_str("load"),
            Self::Refresh => f.write_str("refresh"),
            Self::Retry => f.write_str("retry"),
        }
    }
}
