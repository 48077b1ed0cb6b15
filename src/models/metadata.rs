//! Metadata model describing a location

use serde::{Deserialize, Serialize};

/// Descriptive record as uploaded in the metadata file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    /// Identifier of the location this record describes
    pub id: String,
    /// Location category (park, museum, ...)
    #[serde(rename = "type")]
    pub location_type: String,
    /// Average user rating
    pub rating: f64,
    /// Number of user reviews
    pub reviews: i32,
}

impl Metadata {
    /// Create a new metadata record
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        location_type: impl Into<String>,
        rating: f64,
        reviews: i32,
    ) -> Self {
        Self {
            id: id.into(),
            location_type: location_type.into(),
            rating,
            reviews,
        }
    }
}
