//! Data source abstraction.
//!
//! This module defines the [`DataSource`] trait that abstracts over where the
//! catalog comes from. The list controller depends only on this contract, so the
//! static catalog and the remote API are interchangeable without changing any
//! list logic.
//!
//! # Design Philosophy
//!
//! The trait is minimal: one read and the two writes the edit flow needs. Each
//! method is a single suspension point; everything around it in the controller is
//! synchronous.

use crate::domain::error::Result;
use crate::domain::{Medicine, MedicinePatch};
use futures_util::future::BoxFuture;

/// Remote read/write access to the medicine collection.
///
/// Methods return boxed futures so the trait stays object-safe and the binary can
/// pick a backend at runtime (`Arc<dyn DataSource>`).
///
/// # Implementations
///
/// - [`StaticSource`](crate::source::StaticSource): In-memory built-in catalog
/// - [`HttpSource`](crate::source::HttpSource): Remote mock API over HTTP
///
/// # Error Contract
///
/// Implementations classify every failure into a [`CatalogError`](crate::CatalogError)
/// fetch kind (`Network`, `Server`, `Parse`, `Validation`). They never panic.
///
/// # Examples
///
/// ```
/// use medlist::source::{DataSource, StaticSource};
///
/// let rt = tokio::runtime::Builder::new_current_thread().build()?;
/// let source = StaticSource::builtin();
/// let items = rt.block_on(source.fetch_all())?;
/// assert_eq!(items.len(), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait DataSource: Send + Sync {
    /// Fetches the full collection in source order.
    ///
    /// # Errors
    ///
    /// Returns a classified error if the collection cannot be retrieved or decoded.
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Medicine>>>;

    /// Applies `patch` to the medicine identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch is invalid, the medicine does not exist, or
    /// the write fails.
    fn update<'a>(&'a self, id: &'a str, patch: &'a MedicinePatch) -> BoxFuture<'a, Result<()>>;

    /// Deletes the medicine identified by `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medicine does not exist or the delete fails.
    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
}
