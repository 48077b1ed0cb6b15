//! Data models for the location insights service
//!
//! This module contains the records exchanged with clients:
//! - Location: Geographic coordinates keyed by id
//! - Metadata: Descriptive details keyed by the same id
//! - Report: Merged records and the statistics computed over them

pub mod location;
pub mod metadata;
pub mod report;

// Re-export all public types for convenient access
pub use location::{Location, MergedLocation};
pub use metadata::Metadata;
pub use report::LocationReport;
