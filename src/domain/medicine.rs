//! Medicine domain model and edit patches.
//!
//! This module defines the immutable [`Medicine`] record displayed by the catalog,
//! the [`Collection`] type the list controller hands around, and the
//! [`MedicinePatch`] used by the edit flow to update a record in a data source.

use crate::domain::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An ordered, shared, read-only sequence of medicines.
///
/// Order is whatever the data source returned. A successful fetch replaces the
/// collection wholesale, so the `Arc` pointer doubles as an identity for
/// memoizing derived views.
pub type Collection = Arc<[Medicine]>;

/// A single catalog entry.
///
/// Values are only produced by validated decoding (see
/// [`crate::source::models::decode_collection`]) or by the built-in catalog, so
/// `id` and `name` are always non-blank.
///
/// # Fields
///
/// - `id`: Stable identifier, unique within a collection
/// - `name`: Display name
/// - `price`: Display price, kept as text (`"$199.99"`, `"12.5"`)
/// - `rating`: Star rating, `0.0` when the source has none
/// - `description`: Optional free text
/// - `image`: Optional image URI or asset reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub price: String,
    pub rating: f64,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl Medicine {
    /// Creates a medicine with just an identifier and a name.
    ///
    /// Price is empty and rating is zero; use struct update syntax for the rest.
    ///
    /// # Examples
    ///
    /// ```
    /// use medlist::domain::Medicine;
    ///
    /// let m = Medicine::new("1", "Amoxicillin");
    /// assert_eq!(m.rating, 0.0);
    /// assert!(m.description.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: String::new(),
            rating: 0.0,
            description: None,
            image: None,
        }
    }

    /// Returns the description or an empty string.
    #[must_use]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// A partial update for a medicine.
///
/// Only fields that are `Some` are changed. Serializes to a JSON object holding
/// just those fields, which is the body the remote API expects for `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MedicinePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.rating.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }

    /// Checks the patch against the same rules decoding enforces.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if the name is blank or the rating is
    /// negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CatalogError::Validation("name cannot be blank".to_string()));
            }
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() || rating < 0.0 {
                return Err(CatalogError::Validation(format!("invalid rating {rating}")));
            }
        }
        Ok(())
    }

    /// Returns a copy of `medicine` with this patch applied. The identifier never changes.
    #[must_use]
    pub fn apply_to(&self, medicine: &Medicine) -> Medicine {
        let mut patched = medicine.clone();
        if let Some(name) = &self.name {
            patched.name.clone_from(name);
        }
        if let Some(price) = &self.price {
            patched.price.clone_from(price);
        }
        if let Some(rating) = self.rating {
            patched.rating = rating;
        }
        if let Some(description) = &self.description {
            patched.description = Some(description.clone());
        }
        if let Some(image) = &self.image {
            patched.image = Some(image.clone());
        }
        patched
    }
}
