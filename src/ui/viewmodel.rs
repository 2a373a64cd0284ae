//! View model types representing renderable list state.
//!
//! View models are computed from a [`ListSnapshot`] and consumed by the
//! renderer. They contain no business logic, only display-ready data: labels,
//! truncated text, and pre-computed highlight ranges.
//!
//! # Example
//!
//! ```rust
//! use medlist::app::{ListState, MatchMode};
//! use medlist::ui::viewmodel::{compute_viewmodel, ListStatus};
//!
//! let snapshot = ListState::new(MatchMode::Substring).snapshot();
//! let vm = compute_viewmodel(&snapshot, chrono::Utc::now());
//! assert_eq!(vm.header.title, "Medicines (0)");
//! assert_eq!(vm.status, ListStatus::Ready);
//! ```

use crate::app::{ListSnapshot, MatchMode};
use crate::domain::Medicine;
use crate::ui::helpers::{highlight_ranges, time_ago, truncate};
use chrono::{DateTime, Utc};

/// Roughly two lines of card text.
const DESCRIPTION_MAX_CHARS: usize = 80;

/// Complete presenter view model for one list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogViewModel {
    pub header: HeaderInfo,

    /// What the list area shows besides the cards.
    pub status: ListStatus,

    /// Cards to display, in list order.
    pub cards: Vec<MedicineCard>,

    /// Shown instead of cards when the ready list is empty.
    pub empty_state: Option<EmptyState>,

    /// Present when a search term is active.
    pub search_bar: Option<SearchBarInfo>,

    /// "Updated 5m ago" style freshness line.
    pub updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Lifecycle indicator for the list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// Initial load with nothing to show yet.
    Loading { message: String },

    /// A refresh is running over the items on screen.
    Refreshing,

    /// The request failed and there is nothing to show.
    Failed {
        title: String,
        detail: String,
        retry_label: String,
    },

    /// A refresh failed; the old items stay on screen under a banner.
    Stale { banner: String },

    Ready,
}

/// Display information for a single medicine.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineCard {
    pub id: String,
    pub name: String,
    pub price: String,

    /// Star label such as `"★ 4.9"`.
    pub rating: String,

    /// Description cut to card length.
    pub description: String,

    pub image: Option<String>,

    /// Character ranges of `name` matching the search term.
    pub name_highlights: Vec<(usize, usize)>,

    /// Character ranges of `description` matching the search term.
    pub description_highlights: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// e.g. `"2 of 6"`.
    pub match_count: String,
}

/// Builds the view model for `snapshot` with substring highlighting.
#[must_use]
pub fn compute_viewmodel(snapshot: &ListSnapshot, now: DateTime<Utc>) -> CatalogViewModel {
    compute_viewmodel_with(snapshot, MatchMode::Substring, now)
}

/// Builds the view model for `snapshot`, highlighting matches with `mode`.
///
/// # Parameters
///
/// * `snapshot` - State published by the list controller
/// * `mode` - Match mode the list filters with, so highlights agree with results
/// * `now` - Reference time for the freshness line
#[must_use]
pub fn compute_viewmodel_with(
    snapshot: &ListSnapshot,
    mode: MatchMode,
    now: DateTime<Utc>,
) -> CatalogViewModel {
    let status = status_for(snapshot);
    let searching = !snapshot.search_term.trim().is_empty();

    let cards = snapshot
        .items
        .iter()
        .map(|medicine| card_for(medicine, &snapshot.search_term, mode))
        .collect::<Vec<_>>();

    let empty_state = (status == ListStatus::Ready && cards.is_empty()).then(|| {
        if searching {
            EmptyState {
                message: "No medicines found".to_string(),
                subtitle: "Try a different search term".to_string(),
            }
        } else {
            EmptyState {
                message: "No medicines available".to_string(),
                subtitle: "Pull to refresh".to_string(),
            }
        }
    });

    let search_bar = searching.then(|| SearchBarInfo {
        query: snapshot.search_term.clone(),
        match_count: format!("{} of {}", cards.len(), snapshot.total),
    });

    CatalogViewModel {
        header: HeaderInfo {
            title: format!("Medicines ({})", snapshot.total),
        },
        status,
        cards,
        empty_state,
        search_bar,
        updated: snapshot
            .updated_at
            .map(|at| format!("Updated {}", time_ago(at, now))),
    }
}

fn status_for(snapshot: &ListSnapshot) -> ListStatus {
    if snapshot.loading {
        return if snapshot.refreshing {
            ListStatus::Refreshing
        } else {
            ListStatus::Loading {
                message: "Loading medicines...".to_string(),
            }
        };
    }

    match &snapshot.error {
        Some(kind) if snapshot.total > 0 => ListStatus::Stale {
            banner: format!("Refresh failed: {kind}"),
        },
        Some(kind) => ListStatus::Failed {
            title: "Error loading data".to_string(),
            detail: snapshot.error_detail.clone().unwrap_or_else(|| kind.clone()),
            retry_label: "Try Again".to_string(),
        },
        None => ListStatus::Ready,
    }
}

fn card_for(medicine: &Medicine, term: &str, mode: MatchMode) -> MedicineCard {
    let description = truncate(medicine.description_text(), DESCRIPTION_MAX_CHARS);

    MedicineCard {
        id: medicine.id.clone(),
        name: medicine.name.clone(),
        price: medicine.price.clone(),
        rating: format!("★ {:.1}", medicine.rating),
        name_highlights: highlight_ranges(&medicine.name, term, mode),
        description_highlights: highlight_ranges(&description, term, mode),
        description,
        image: medicine.image.clone(),
    }
}
