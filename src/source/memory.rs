//! In-memory data source.
//!
//! Serves the built-in catalog (or any seeded list) from memory. Writes mutate
//! the in-memory list, so a later `fetch_all` reflects them, matching how the
//! remote API behaves.

use crate::domain::catalog;
use crate::domain::error::{CatalogError, Result};
use crate::domain::{Medicine, MedicinePatch};
use crate::source::backend::DataSource;
use futures_util::future::BoxFuture;
use tokio::sync::RwLock;
use tracing::Instrument;

/// In-memory catalog backend.
///
/// # Thread Safety
///
/// The list sits behind a `tokio::sync::RwLock`; reads never block each other.
#[derive(Debug)]
pub struct StaticSource {
    items: RwLock<Vec<Medicine>>,
}

impl StaticSource {
    /// Creates a source serving `items` in the given order.
    #[must_use]
    pub fn new(items: Vec<Medicine>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Creates a source seeded with the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(catalog::builtin())
    }

    fn not_found(id: &str) -> CatalogError {
        CatalogError::Server {
            status: 404,
            message: format!("medicine {id} not found"),
        }
    }
}

impl Default for StaticSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DataSource for StaticSource {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Medicine>>> {
        Box::pin(async move {
            let items = self.items.read().await.clone();
            tracing::debug!(count = items.len(), "served static catalog");
            Ok(items)
        })
    }

    fn update<'a>(&'a self, id: &'a str, patch: &'a MedicinePatch) -> BoxFuture<'a, Result<()>> {
        let span = tracing::debug_span!("static_update", id = %id);
        Box::pin(
            async move {
                patch.validate()?;

                let mut items = self.items.write().await;
                let slot = items
                    .iter_mut()
                    .find(|m| m.id == id)
                    .ok_or_else(|| Self::not_found(id))?;
                *slot = patch.apply_to(slot);

                tracing::debug!("medicine updated");
                Ok(())
            }
            .instrument(span),
        )
    }

    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut items = self.items.write().await;
            let position = items
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| Self::not_found(id))?;
            items.remove(position);

            tracing::debug!(id = %id, remaining = items.len(), "medicine removed");
            Ok(())
        })
    }
}
