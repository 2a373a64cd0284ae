//! Platform path resolution for configuration and log files.
//!
//! Directories come from `directories::ProjectDirs`, so they follow the
//! platform convention (`~/.config/medlist` and `~/.local/share/medlist` on
//! Linux). When no home directory can be determined, paths fall back to a
//! `.medlist` directory under the current working directory.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "medlist";
const FALLBACK_DIR: &str = ".medlist";

/// Name of the configuration file inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the log file inside [`data_dir`].
pub const LOG_FILE_NAME: &str = "medlist.log";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Returns the configuration directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(FALLBACK_DIR),
        |dirs| dirs.config_dir().to_path_buf(),
    )
}

/// Returns the data directory, where logs are written by default.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(FALLBACK_DIR),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

/// Returns the default configuration file path.
///
/// ```
/// use medlist::infrastructure::paths::default_config_file;
///
/// assert!(default_config_file().ends_with("config.toml"));
/// ```
#[must_use]
pub fn default_config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Returns the default log file path.
#[must_use]
pub fn default_log_file() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or when no home directory is known, are
/// returned unchanged.
///
/// ```
/// use medlist::infrastructure::paths::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/log/medlist.log"), PathBuf::from("/var/log/medlist.log"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}
