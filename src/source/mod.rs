//! Data source layer for reading and editing the catalog.
//!
//! This module provides the [`DataSource`] abstraction the list controller depends
//! on, plus the two backends the application ships with.
//!
//! # Modules
//!
//! - `backend`: Data source trait
//! - `models`: Wire record types and validating decode
//! - `memory`: Built-in in-memory catalog
//! - `http`: Remote mock API over HTTP

pub mod backend;
pub mod http;
pub mod memory;
pub mod models;

pub use backend::DataSource;
pub use http::{HttpSource, DEFAULT_API_URL};
pub use memory::StaticSource;
pub use models::{decode_collection, MedicineRecord};
