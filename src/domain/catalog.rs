//! Built-in medicine catalog.
//!
//! The static list shown when no remote API is configured. Identifiers are
//! unique even where display names repeat.

use crate::domain::medicine::Medicine;

const INFECTION_BLURB: &str =
    "Used to treat infections such as respiratory tract infections, ear infections...";
const PAIN_BLURB: &str =
    "Used to alleviate mild to moderate pain such as headaches, toothaches...";

const ENTRIES: [(&str, &str, &str, &str); 6] = [
    ("1", "Amoxicillin", INFECTION_BLURB, "assets/anh04.png"),
    ("2", "Paracetamol", PAIN_BLURB, "assets/anh05.png"),
    ("3", "Ibuprofen", INFECTION_BLURB, "assets/anh07.png"),
    ("4", "Antifungal", PAIN_BLURB, "assets/anh08.png"),
    ("5", "Antifungal", PAIN_BLURB, "assets/anh08.png"),
    ("6", "Antifungal", PAIN_BLURB, "assets/anh08.png"),
];

/// Returns the built-in catalog in display order.
#[must_use]
pub fn builtin() -> Vec<Medicine> {
    ENTRIES
        .iter()
        .map(|(id, name, description, image)| Medicine {
            id: (*id).to_string(),
            name: (*name).to_string(),
            price: "$199.99".to_string(),
            rating: 4.9,
            description: Some((*description).to_string()),
            image: Some((*image).to_string()),
        })
        .collect()
}
