//! `location-insights` - location and metadata merging service
//!
//! This library decodes uploaded location and metadata files, joins them on
//! their shared id, and computes per-type statistics over the result. The
//! [`web`] module exposes the whole pipeline as a single HTTP endpoint.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod models;
pub mod web;

// Re-export core types for public API
pub use aggregator::{Aggregator, DuplicatePolicy};
pub use config::InsightsConfig;
pub use error::{Document, InsightsError};
pub use models::{Location, LocationReport, MergedLocation, Metadata};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, InsightsError>;

/// Decode both uploads and compute their report
pub fn process(
    aggregator: &Aggregator,
    locations: &[u8],
    metadata: &[u8],
) -> Result<LocationReport> {
    let (locations, metadata) = decoder::decode_documents(locations, metadata)?;
    aggregator.analyze(&locations, &metadata)
}
