//! Presenter layer: view models and plain-text rendering.
//!
//! # Architecture
//!
//! ```text
//! ListSnapshot → compute_viewmodel → CatalogViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types computed from a list snapshot
//! - [`renderer`]: Writes a view model as plain text
//! - [`helpers`]: Highlighting, truncation, and relative time formatting

pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{
    compute_viewmodel, compute_viewmodel_with, CatalogViewModel, EmptyState, HeaderInfo,
    ListStatus, MedicineCard, SearchBarInfo,
};
