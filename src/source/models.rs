//! Wire record models and validating decode.
//!
//! This module defines the raw record shape a remote catalog returns. These types
//! are separate from the domain [`Medicine`] so the lenient wire format (string or
//! numeric ids, `star` vs `rating`, `desc` vs `description`) never leaks past the
//! source boundary.
//!
//! Decoding is two-stage: JSON parsing failures are [`CatalogError::Parse`], and
//! records that parse but lack required fields are [`CatalogError::Validation`].

use crate::domain::error::{CatalogError, Result};
use crate::domain::Medicine;
use serde::Deserialize;
use std::collections::HashSet;

/// A JSON scalar that may arrive either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Represents a medicine record as served by the remote API.
///
/// Every field is optional at this layer; [`MedicineRecord::into_medicine`]
/// decides which ones are required. Alternate spellings are kept in their own
/// fields since a record may carry both (`id` next to a Mongo `_id`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MedicineRecord {
    pub id: Option<Scalar>,

    #[serde(rename = "_id")]
    pub object_id: Option<Scalar>,

    pub name: Option<String>,

    pub price: Option<Scalar>,

    pub rating: Option<Scalar>,

    pub star: Option<Scalar>,

    pub description: Option<String>,

    pub desc: Option<String>,

    pub image: Option<String>,
}

impl MedicineRecord {
    /// Validates the record and converts it to a domain [`Medicine`].
    ///
    /// # Rules
    ///
    /// - `id` (or `_id` when `id` is blank) must be present and non-blank
    /// - `name` must be present and non-blank
    /// - `rating` defaults to `0` when missing or empty, and must otherwise be a
    ///   non-negative number
    /// - `price` defaults to an empty string
    /// - `rating` wins over `star` and `description` wins over `desc`
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] describing the first broken rule.
    pub fn into_medicine(self) -> Result<Medicine> {
        let identifier = |scalar: Option<Scalar>| {
            scalar
                .map(Scalar::into_text)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let id = identifier(self.id)
            .or_else(|| identifier(self.object_id))
            .ok_or_else(|| CatalogError::Validation("record is missing an identifier".to_string()))?;

        let name = self
            .name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CatalogError::Validation(format!("record {id} is missing a name")))?;

        let rating = match self.rating.or(self.star).map(Scalar::into_text) {
            None => 0.0,
            Some(text) if text.trim().is_empty() => 0.0,
            Some(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite() && *r >= 0.0)
                .ok_or_else(|| {
                    CatalogError::Validation(format!("record {id} has invalid rating '{text}'"))
                })?,
        };

        Ok(Medicine {
            id,
            name,
            price: self.price.map(Scalar::into_text).unwrap_or_default(),
            rating,
            description: self.description.or(self.desc),
            image: self.image,
        })
    }
}

/// Decodes a catalog payload into an ordered list of medicines.
///
/// The payload must be a JSON array of objects. Source order is preserved and
/// identifiers must be unique across the payload.
///
/// # Errors
///
/// - [`CatalogError::Parse`] if the bytes are not a JSON array of objects
/// - [`CatalogError::Validation`] if any record fails validation or an identifier repeats
///
/// # Examples
///
/// ```
/// use medlist::source::models::decode_collection;
///
/// let items = decode_collection(br#"[{"id": 1, "name": "Amoxicillin", "star": "4.9"}]"#)?;
/// assert_eq!(items[0].id, "1");
/// assert_eq!(items[0].rating, 4.9);
/// # Ok::<(), medlist::CatalogError>(())
/// ```
pub fn decode_collection(bytes: &[u8]) -> Result<Vec<Medicine>> {
    let records: Vec<MedicineRecord> = serde_json::from_slice(bytes)
        .map_err(|e| CatalogError::Parse(format!("failed to parse catalog payload: {e}")))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut medicines = Vec::with_capacity(records.len());

    for record in records {
        let medicine = record.into_medicine()?;
        if !seen.insert(medicine.id.clone()) {
            return Err(CatalogError::Validation(format!(
                "duplicate identifier {}",
                medicine.id
            )));
        }
        medicines.push(medicine);
    }

    tracing::debug!(count = medicines.len(), "decoded catalog payload");
    Ok(medicines)
}
