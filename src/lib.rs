//! Medlist: a searchable medicine catalog with a reusable remote-list controller.
//!
//! Medlist provides:
//! - A single generic list controller owning the fetch/refresh/retry lifecycle
//! - Client-side search with substring or fuzzy matching, memoized per collection
//! - Debounced search input
//! - Two data sources: the built-in static catalog and a remote mock API
//! - Item update and removal through the same data source abstraction
//! - A headless presenter model plus a plain-text renderer for the CLI

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Fetch coordination (ListController)              │
//! │  - Filtering and debouncing                         │
//! └─────────────────────────────────────────────────────┘
//!         │                                       │
//! ┌───────────────────────┐       ┌───────────────────────────┐
//! │ UI Layer (ui/)        │       │ Source Layer (source/)    │
//! │ - View models         │       │ - DataSource trait        │
//! │ - Text rendering      │       │ - Static / HTTP backends  │
//! │ - Highlighting        │       │ - Validating wire decode  │
//! └───────────────────────┘       └───────────────────────────┘
//!         │                                       │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Medicine model and built-in catalog (domain/)    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: List state machine, controller, filter, debouncer
//! - [`domain`]: Core domain types (Medicine, errors, built-in catalog)
//! - [`source`]: Data source contract and its implementations
//! - [`ui`]: Presenter view models and rendering
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Read from `config.toml` in the platform config directory
//! (`~/.config/medlist/config.toml` on Linux). Every key is optional:
//!
//! ```toml
//! source = "remote"              # "static" or "remote"
//! api_url = "https://68cd09cdda4697a7f304859f.mockapi.io/medicines"
//! request_timeout_secs = 10
//! search_debounce_ms = 300
//! match_mode = "fuzzy"           # "substring" or "fuzzy"
//! trace_level = "debug"
//! log_file = "~/medlist.log"
//! ```
//!
//! # Example
//!
//! ```rust
//! use medlist::{initialize, Config};
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
//! runtime.block_on(async {
//!     let controller = initialize(&Config::default())?;
//!     controller.load().await;
//!     controller.set_search("antifungal");
//!
//!     let snapshot = controller.snapshot();
//!     assert_eq!(snapshot.items.len(), 3);
//!     Ok::<(), medlist::CatalogError>(())
//! })?;
//! # Ok::<(), medlist::CatalogError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod source;
pub mod ui;

pub use app::{
    handle_event, Action, Event, FetchMode, FetchState, ListController, ListSnapshot, ListState,
    MatchMode,
};
pub use domain::{CatalogError, ErrorKind, Medicine, MedicinePatch, Result};
pub use source::{DataSource, HttpSource, StaticSource, DEFAULT_API_URL};

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Which data source backs the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The built-in catalog, held in memory.
    #[default]
    Static,

    /// The remote mock API at `api_url`.
    Remote,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown source '{other}' (expected static or remote)")),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// Application configuration.
///
/// Loaded from TOML; every field has a default, so an empty file is valid.
/// Command-line flags override individual fields after loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data source backing the list. Default: `static`
    pub source: SourceKind,

    /// Base URL of the remote collection. Default: [`DEFAULT_API_URL`]
    pub api_url: String,

    /// Per-request timeout for the remote source. Default: 10
    pub request_timeout_secs: u64,

    /// Quiet period before a typed search term is applied. Default: 300
    pub search_debounce_ms: u64,

    /// How search terms match items. Default: `substring`
    pub match_mode: MatchMode,

    /// Log filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file path. Default: `medlist.log` in the platform data directory
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Static,
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 10,
            search_debounce_ms: 300,
            match_mode: MatchMode::Substring,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Config` for malformed TOML, unknown enum values,
    /// or values rejected by [`validate`](Self::validate).
    ///
    /// # Example
    ///
    /// ```rust
    /// use medlist::{Config, MatchMode, SourceKind};
    ///
    /// let config = Config::from_toml_str("source = \"remote\"\nmatch_mode = \"fuzzy\"")?;
    /// assert_eq!(config.source, SourceKind::Remote);
    /// assert_eq!(config.match_mode, MatchMode::Fuzzy);
    /// assert_eq!(config.request_timeout_secs, 10);
    /// # Ok::<(), medlist::CatalogError>(())
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| CatalogError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or
    /// `CatalogError::Config` if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads the default configuration file if it exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) when the file exists.
    pub fn discover() -> Result<Self> {
        let path = infrastructure::default_config_file();
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Config` for a zero request timeout, or an empty
    /// `api_url` when the remote source is selected.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CatalogError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.source == SourceKind::Remote && self.api_url.trim().is_empty() {
            return Err(CatalogError::Config(
                "api_url is required for the remote source".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Builds the list controller described by `config`.
///
/// The controller starts idle; call [`ListController::load`] to fetch.
///
/// # Errors
///
/// Returns `CatalogError::Config` if the configuration is invalid or the HTTP
/// client cannot be built.
pub fn initialize(config: &Config) -> Result<ListController<dyn DataSource>> {
    config.validate()?;
    tracing::debug!(
        source = %config.source,
        match_mode = ?config.match_mode,
        debounce_ms = config.search_debounce_ms,
        "initializing medicine list"
    );

    let source: Arc<dyn DataSource> = match config.source {
        SourceKind::Static => Arc::new(StaticSource::builtin()),
        SourceKind::Remote => Arc::new(HttpSource::new(
            config.api_url.clone(),
            config.request_timeout(),
        )?),
    };

    Ok(ListController::new(
        source,
        config.match_mode,
        config.search_debounce(),
    ))
}
