//! Remote mock API data source.
//!
//! Talks to a REST collection endpoint (`GET /medicines`, `PUT /medicines/{id}`,
//! `DELETE /medicines/{id}`) with no authentication. Every failure is classified
//! at this boundary so callers only ever see the catalog error taxonomy.

use crate::domain::error::{CatalogError, Result};
use crate::domain::{Medicine, MedicinePatch};
use crate::source::backend::DataSource;
use crate::source::models::decode_collection;
use futures_util::future::BoxFuture;
use reqwest::{Client, Response, Url};
use std::time::Duration;
use tracing::Instrument;

/// Default collection endpoint of the public mock API.
pub const DEFAULT_API_URL: &str = "https://68cd09cdda4697a7f304859f.mockapi.io/medicines";

/// HTTP catalog backend.
///
/// Holds a pooled `reqwest::Client` configured with a per-request timeout.
/// Timeouts surface as [`CatalogError::Network`].
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: Url,
}

impl HttpSource {
    /// Creates a source for the collection at `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the URL is empty, is not an absolute
    /// hierarchical URL, or the HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use medlist::source::HttpSource;
    /// use std::time::Duration;
    ///
    /// let source = HttpSource::new("https://example.test/medicines/", Duration::from_secs(5))?;
    /// assert_eq!(source.base_url(), "https://example.test/medicines");
    /// # Ok::<(), medlist::CatalogError>(())
    /// ```
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let raw = base_url.into();
        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(CatalogError::Config("api_url cannot be empty".to_string()));
        }

        let base_url = Url::parse(trimmed)
            .map_err(|e| CatalogError::Config(format!("invalid api_url '{raw}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!("api_url '{raw}' cannot hold item paths")));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolves the resource URL of one item.
    ///
    /// The id always lands in a single percent-encoded path segment. Dot-only
    /// ids would name the collection or its parent, and ids carrying `%` could
    /// smuggle pre-encoded separators, so both are rejected.
    fn item_url(&self, id: &str) -> Result<Url> {
        if matches!(id.trim(), "" | "." | "..") || id.contains('%') {
            return Err(CatalogError::Validation(format!("invalid identifier '{id}'")));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::Config(format!("{} cannot hold item paths", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Maps a non-success status to [`CatalogError::Server`].
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body.trim().chars().take(200).collect()
        };

        Err(CatalogError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

impl DataSource for HttpSource {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Medicine>>> {
        let span = tracing::debug_span!("http_fetch_all", url = %self.base_url);
        Box::pin(
            async move {
                let response = self.client.get(self.base_url.clone()).send().await?;
                let response = Self::check_status(response).await?;
                let bytes = response.bytes().await?;

                tracing::debug!(bytes = bytes.len(), "catalog payload received");
                decode_collection(&bytes)
            }
            .instrument(span),
        )
    }

    fn update<'a>(&'a self, id: &'a str, patch: &'a MedicinePatch) -> BoxFuture<'a, Result<()>> {
        let span = tracing::debug_span!("http_update", id = %id);
        Box::pin(
            async move {
                patch.validate()?;
                let url = self.item_url(id)?;

                let response = self.client.put(url).json(patch).send().await?;
                Self::check_status(response).await?;

                tracing::debug!("medicine updated");
                Ok(())
            }
            .instrument(span),
        )
    }

    fn remove<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        let span = tracing::debug_span!("http_remove", id = %id);
        Box::pin(
            async move {
                let url = self.item_url(id)?;
                let response = self.client.delete(url).send().await?;
                Self::check_status(response).await?;

                tracing::debug!("medicine removed");
                Ok(())
            }
            .instrument(span),
        )
    }
}
