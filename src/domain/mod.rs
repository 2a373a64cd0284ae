//! Domain layer for the medicine catalog.
//!
//! This module contains the core domain types, independent of any transport or
//! presentation concern.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`medicine`]: Medicine record, collections, and edit patches
//! - [`catalog`]: Built-in static catalog
//!
//! # Examples
//!
//! ```
//! use medlist::domain::{Medicine, Result};
//!
//! fn create_medicine() -> Result<Medicine> {
//!     Ok(Medicine::new("1", "Amoxicillin"))
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod medicine;

pub use error::{CatalogError, ErrorKind, Result};
pub use medicine::{Collection, Medicine, MedicinePatch};
