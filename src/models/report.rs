//! Response model bundling the merged records with their statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MergedLocation;

/// Result of processing one pair of uploaded files
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    /// Locations that found a metadata match, in first-appearance order
    pub merged_data: Vec<MergedLocation>,
    /// Number of merged locations per type
    pub type_count: BTreeMap<String, u64>,
    /// Mean rating per type, rounded to two decimals
    pub average_ratings: BTreeMap<String, f64>,
    /// Merged location with the most reviews, `null` when nothing merged
    pub most_reviewed: Option<MergedLocation>,
    /// Ids of locations without metadata, in input order
    pub incomplete_data: Vec<String>,
}
