//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::infrastructure::paths;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with rotating file output.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans and events by the resolved level
/// 2. Formats them as plain text lines with span context
/// 3. Writes to the rotating log file
///
/// # Parameters
///
/// * `config` - Configuration holding `trace_level` and `log_file`
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # File Location
///
/// `config.log_file` if set (a leading `~` is expanded), otherwise
/// `medlist.log` in the platform data directory. If the directory cannot be
/// created the log goes to stderr instead.
///
/// # Initialization Behavior
///
/// Idempotent: only the first call installs a subscriber.
///
/// # Example
///
/// ```rust
/// use medlist::observability::init_tracing;
/// use medlist::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     log_file: Some(dir.path().join("medlist.log")),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = resolve_filter(config.trace_level.as_deref());

    let log_file = config
        .log_file
        .as_ref()
        .map_or_else(paths::default_log_file, paths::expand_tilde);

    let dir_ready = log_file
        .parent()
        .map_or(true, |dir| dir.as_os_str().is_empty() || std::fs::create_dir_all(dir).is_ok());

    let registry = tracing_subscriber::registry().with(filter);

    if dir_ready {
        let layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(FileWriter::new(log_file));
        let _ = registry.with(layer).try_init();
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        let _ = registry.with(layer).try_init();
    }
}

/// Builds the level filter: `RUST_LOG` wins, then the configured level, then `info`.
fn resolve_filter(trace_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(trace_level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
