//! Merge of locations with their metadata and the statistics over the result
//!
//! The join is an inner join on `id`. Locations without metadata are dropped
//! from the merged set and reported as incomplete instead. All statistics are
//! computed over the merged set only.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::Result;
use crate::error::{Document, InsightsError};
use crate::models::{Location, LocationReport, MergedLocation, Metadata};

/// How repeated ids within one uploaded file are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later records replace earlier ones with the same id
    #[default]
    LastWins,
    /// Any repeated id fails the request
    Reject,
}

/// Computes a [`LocationReport`] from one pair of uploads
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: DuplicatePolicy,
}

impl Aggregator {
    /// Create an aggregator with the given duplicate-id policy
    #[must_use]
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    /// Merge both inputs and compute every statistic
    #[instrument(skip_all, fields(locations = locations.len(), metadata = metadata.len()))]
    pub fn analyze(&self, locations: &[Location], metadata: &[Metadata]) -> Result<LocationReport> {
        if self.policy == DuplicatePolicy::Reject {
            ensure_unique(Document::Locations, locations.iter().map(|l| l.id.as_str()))?;
            ensure_unique(Document::Metadata, metadata.iter().map(|m| m.id.as_str()))?;
        }

        let merged_data = merge(locations, metadata);
        let report = LocationReport {
            type_count: type_counts(&merged_data),
            average_ratings: average_ratings(&merged_data),
            most_reviewed: most_reviewed(&merged_data).cloned(),
            incomplete_data: incomplete_data(locations, &merged_data),
            merged_data,
        };

        info!(
            "Merged {} of {} locations ({} incomplete, {} types)",
            report.merged_data.len(),
            locations.len(),
            report.incomplete_data.len(),
            report.type_count.len()
        );
        Ok(report)
    }
}

fn ensure_unique<'a>(document: Document, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(InsightsError::duplicate_id(document, id));
        }
    }
    Ok(())
}

/// Inner join of `locations` and `metadata` on `id`.
///
/// Repeated metadata ids resolve to the last record. A repeated location id
/// keeps the slot of its first occurrence and the contents of its last.
#[must_use]
pub fn merge(locations: &[Location], metadata: &[Metadata]) -> Vec<MergedLocation> {
    let lookup: HashMap<&str, &Metadata> =
        metadata.iter().map(|m| (m.id.as_str(), m)).collect();

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut merged: Vec<MergedLocation> = Vec::new();

    for location in locations {
        let Some(meta) = lookup.get(location.id.as_str()) else {
            debug!("No metadata for location '{}'", location.id);
            continue;
        };

        let entry = location.merge(meta);
        match slots.get(location.id.as_str()) {
            Some(&slot) => merged[slot] = entry,
            None => {
                slots.insert(location.id.as_str(), merged.len());
                merged.push(entry);
            }
        }
    }

    merged
}

/// Number of merged locations per type
#[must_use]
pub fn type_counts(merged: &[MergedLocation]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for location in merged {
        *counts.entry(location.location_type.clone()).or_insert(0) += 1;
    }
    counts
}

/// Mean rating per type, rounded to two decimals
#[must_use]
pub fn average_ratings(merged: &[MergedLocation]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for location in merged {
        let (sum, count) = totals
            .entry(location.location_type.as_str())
            .or_insert((0.0, 0));
        *sum += location.rating;
        *count += 1;
    }

    totals
        .into_iter()
        .map(|(location_type, (sum, count))| {
            (location_type.to_string(), round_to_cents(sum / count as f64))
        })
        .collect()
}

/// Round half up on `value * 100`
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Entry with the most reviews. Ties go to the earliest entry.
#[must_use]
pub fn most_reviewed(merged: &[MergedLocation]) -> Option<&MergedLocation> {
    merged.iter().fold(None, |best, candidate| match best {
        Some(current) if current.reviews >= candidate.reviews => Some(current),
        _ => Some(candidate),
    })
}

/// Ids of `locations` that did not make it into `merged`, in input order
#[must_use]
pub fn incomplete_data(locations: &[Location], merged: &[MergedLocation]) -> Vec<String> {
    let merged_ids: HashSet<&str> = merged.iter().map(|m| m.id.as_str()).collect();
    locations
        .iter()
        .filter(|l| !merged_ids.contains(l.id.as_str()))
        .map(|l| l.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn analyze(locations: &[Location], metadata: &[Metadata]) -> LocationReport {
        Aggregator::default().analyze(locations, metadata).unwrap()
    }

    #[test]
    fn test_single_match() {
        let report = analyze(
            &[Location::new("a", 1.0, 2.0)],
            &[Metadata::new("a", "park", 4.5, 10)],
        );

        let expected = MergedLocation {
            id: "a".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            location_type: "park".to_string(),
            rating: 4.5,
            reviews: 10,
        };
        assert_eq!(report.merged_data, vec![expected.clone()]);
        assert_eq!(report.type_count, BTreeMap::from([("park".to_string(), 1)]));
        assert_eq!(report.average_ratings, BTreeMap::from([("park".to_string(), 4.5)]));
        assert_eq!(report.most_reviewed, Some(expected));
        assert!(report.incomplete_data.is_empty());
    }

    #[test]
    fn test_no_metadata() {
        let report = analyze(&[Location::new("b", 3.0, 4.0)], &[]);

        assert!(report.merged_data.is_empty());
        assert_eq!(report.incomplete_data, vec!["b".to_string()]);
        assert!(report.type_count.is_empty());
        assert!(report.average_ratings.is_empty());
        assert!(report.most_reviewed.is_none());
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(analyze(&[], &[]), LocationReport::default());
    }

    #[test]
    fn test_metadata_without_location_is_ignored() {
        let report = analyze(&[], &[Metadata::new("ghost", "park", 5.0, 1)]);
        assert!(report.merged_data.is_empty());
        assert!(report.incomplete_data.is_empty());
    }

    #[test]
    fn test_grouping_by_type() {
        let locations = vec![
            Location::new("a", 0.0, 0.0),
            Location::new("b", 0.0, 0.0),
            Location::new("c", 0.0, 0.0),
            Location::new("d", 0.0, 0.0),
        ];
        let metadata = vec![
            Metadata::new("a", "park", 4.0, 1),
            Metadata::new("b", "park", 5.0, 2),
            Metadata::new("c", "museum", 3.333, 3),
        ];
        let report = analyze(&locations, &metadata);

        assert_eq!(report.type_count["park"], 2);
        assert_eq!(report.type_count["museum"], 1);
        assert_eq!(report.average_ratings["park"], 4.5);
        assert_eq!(report.average_ratings["museum"], 3.33);
        assert_eq!(report.incomplete_data, vec!["d".to_string()]);
        assert_eq!(report.most_reviewed.map(|m| m.id), Some("c".to_string()));
    }

    #[test]
    fn test_merged_order_follows_locations() {
        let locations = vec![
            Location::new("z", 0.0, 0.0),
            Location::new("a", 0.0, 0.0),
        ];
        let metadata = vec![
            Metadata::new("a", "park", 1.0, 1),
            Metadata::new("z", "park", 1.0, 1),
        ];
        let ids: Vec<String> = merge(&locations, &metadata).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["z".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_most_reviewed_tie_keeps_first() {
        let locations = vec![
            Location::new("a", 0.0, 0.0),
            Location::new("b", 0.0, 0.0),
            Location::new("c", 0.0, 0.0),
        ];
        let metadata = vec![
            Metadata::new("a", "park", 1.0, 5),
            Metadata::new("b", "park", 1.0, 9),
            Metadata::new("c", "park", 1.0, 9),
        ];
        let report = analyze(&locations, &metadata);
        assert_eq!(report.most_reviewed.map(|m| m.id), Some("b".to_string()));
    }

    #[test]
    fn test_duplicate_metadata_last_wins() {
        let locations = vec![Location::new("a", 0.0, 0.0)];
        let metadata = vec![
            Metadata::new("a", "park", 1.0, 1),
            Metadata::new("a", "museum", 2.0, 2),
        ];
        let merged = merge(&locations, &metadata);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].location_type, "museum");
        assert_eq!(merged[0].reviews, 2);
    }

    #[test]
    fn test_duplicate_location_keeps_first_slot_last_contents() {
        let locations = vec![
            Location::new("a", 1.0, 1.0),
            Location::new("b", 2.0, 2.0),
            Location::new("a", 3.0, 3.0),
        ];
        let metadata = vec![
            Metadata::new("a", "park", 1.0, 1),
            Metadata::new("b", "park", 1.0, 1),
        ];
        let merged = merge(&locations, &metadata);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "a");
        assert_eq!(merged[0].latitude, 3.0);
        assert_eq!(merged[1].id, "b");
    }

    #[test]
    fn test_repeated_unmatched_location_reported_each_time() {
        let locations = vec![
            Location::new("x", 0.0, 0.0),
            Location::new("x", 1.0, 1.0),
        ];
        let report = analyze(&locations, &[]);
        assert_eq!(report.incomplete_data, vec!["x".to_string(), "x".to_string()]);
    }

    #[rstest]
    #[case::locations(
        vec![
            Location::new("a", 0.0, 0.0),
            Location::new("a", 1.0, 1.0),
        ],
        vec![],
        Document::Locations
    )]
    #[case::metadata(
        vec![Location::new("a", 0.0, 0.0)],
        vec![
            Metadata::new("a", "park", 1.0, 1),
            Metadata::new("a", "park", 2.0, 2),
        ],
        Document::Metadata
    )]
    fn test_reject_policy(
        #[case] locations: Vec<Location>,
        #[case] metadata: Vec<Metadata>,
        #[case] expected: Document,
    ) {
        let err = Aggregator::new(DuplicatePolicy::Reject)
            .analyze(&locations, &metadata)
            .unwrap_err();
        match err {
            InsightsError::DuplicateId { document, id } => {
                assert_eq!(document, expected);
                assert_eq!(id, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reject_policy_accepts_unique_ids() {
        let report = Aggregator::new(DuplicatePolicy::Reject)
            .analyze(
                &[Location::new("a", 0.0, 0.0), Location::new("b", 0.0, 0.0)],
                &[Metadata::new("a", "park", 1.0, 1)],
            )
            .unwrap();
        assert_eq!(report.merged_data.len(), 1);
        assert_eq!(report.incomplete_data, vec!["b".to_string()]);
    }

    #[rstest]
    #[case(4.5, 4.5)]
    #[case(3.333, 3.33)]
    #[case(2.675_000_1, 2.68)]
    #[case(1.005_1, 1.01)]
    #[case(4.994, 4.99)]
    #[case(0.0, 0.0)]
    #[case(-1.255, -1.25)]
    fn test_round_to_cents(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_to_cents(value), expected);
    }
}
