//! Structured logging with file output.
//!
//! Every layer of the crate emits `tracing` spans and events. This module
//! installs the subscriber that turns them into log lines.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → medlist.log (+ rotated backups)
//! ```
//!
//! # Features
//!
//! - **File Output**: Logs go to `medlist.log` in the platform data directory
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Stderr Fallback**: Used when the log directory cannot be created
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
