//! Location models for geographic coordinates and their merged form

use serde::{Deserialize, Serialize};

use super::Metadata;

/// A geographic record as uploaded in the locations file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Location {
    /// Identifier shared with the metadata file
    pub id: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    /// Join this location with its metadata record
    #[must_use]
    pub fn merge(&self, metadata: &Metadata) -> MergedLocation {
        MergedLocation {
            id: self.id.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            location_type: metadata.location_type.clone(),
            rating: metadata.rating,
            reviews: metadata.reviews,
        }
    }
}

/// A location joined with the metadata sharing its id
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MergedLocation {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub location_type: String,
    pub rating: f64,
    pub reviews: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_takes_geography_from_location() {
        let location = Location::new("a", 46.8182, 8.2275);
        let metadata = Metadata::new("a", "park", 4.5, 10);
        let merged = location.merge(&metadata);

        assert_eq!(merged.id, "a");
        assert_eq!(merged.latitude, 46.8182);
        assert_eq!(merged.longitude, 8.2275);
        assert_eq!(merged.location_type, "park");
        assert_eq!(merged.rating, 4.5);
        assert_eq!(merged.reviews, 10);
    }

    #[test]
    fn test_merged_location_serializes_type_field() {
        let merged = Location::new("a", 1.0, 2.0).merge(&Metadata::new("a", "cafe", 3.0, 1));
        let value = serde_json::to_value(&merged).unwrap();
        assert_eq!(value["type"], "cafe");
        assert!(value.get("location_type").is_none());
    }

    #[test]
    fn test_location_rejects_unknown_fields() {
        let result: Result<Location, _> =
            serde_json::from_str(r#"{"id":"a","latitude":1.0,"longitude":2.0,"name":"x"}"#);
        assert!(result.is_err());
    }
}
