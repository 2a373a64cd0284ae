//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where configuration is read from and where logs are written.

pub mod paths;

pub use paths::{config_dir, data_dir, default_config_file, default_log_file, expand_tilde};
