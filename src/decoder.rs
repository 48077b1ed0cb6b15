//! Decoding of the uploaded JSON documents into typed records

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::{Document, InsightsError};
use crate::models::{Location, Metadata};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode one document as a JSON array of `T`. A leading UTF-8 BOM is skipped.
fn decode_array<T: DeserializeOwned>(document: Document, bytes: &[u8]) -> Result<Vec<T>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let records: Vec<T> =
        serde_json::from_slice(bytes).map_err(|e| InsightsError::malformed(document, e))?;
    debug!("Decoded {} records from {} file", records.len(), document);
    Ok(records)
}

/// Decode the locations file
pub fn decode_locations(bytes: &[u8]) -> Result<Vec<Location>> {
    decode_array(Document::Locations, bytes)
}

/// Decode the metadata file
pub fn decode_metadata(bytes: &[u8]) -> Result<Vec<Metadata>> {
    decode_array(Document::Metadata, bytes)
}

/// Decode both uploads. Either one failing fails the pair.
#[instrument(skip_all, fields(locations_bytes = locations.len(), metadata_bytes = metadata.len()))]
pub fn decode_documents(
    locations: &[u8],
    metadata: &[u8],
) -> Result<(Vec<Location>, Vec<Metadata>)> {
    let locations = decode_locations(locations)?;
    let metadata = decode_metadata(metadata)?;
    Ok((locations, metadata))
}
