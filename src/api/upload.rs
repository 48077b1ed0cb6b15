//! Extraction of the two uploaded files from a multipart request

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use tracing::debug;

use crate::Result;
use crate::error::{Document, InsightsError};

/// Raw contents of both required parts
#[derive(Debug)]
pub struct UploadedFiles {
    pub locations: Bytes,
    pub metadata: Bytes,
}

fn upload_error(err: MultipartError) -> InsightsError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        InsightsError::UploadTooLarge
    } else {
        InsightsError::invalid_upload(err.body_text())
    }
}

/// Read every part, keeping `locationsFile` and `metadataFile`.
/// Unknown parts are skipped. A repeated part replaces the earlier one.
pub async fn read_uploads(mut multipart: Multipart) -> Result<UploadedFiles> {
    let mut locations = None;
    let mut metadata = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();
        let slot = if name == Document::Locations.field_name() {
            &mut locations
        } else if name == Document::Metadata.field_name() {
            &mut metadata
        } else {
            debug!("Skipping unexpected multipart field '{}'", name);
            continue;
        };

        let bytes = field.bytes().await.map_err(upload_error)?;
        debug!("Received {} ({} bytes)", name, bytes.len());
        *slot = Some(bytes);
    }

    Ok(UploadedFiles {
        locations: locations.ok_or(InsightsError::MissingPart {
            name: Document::Locations.field_name(),
        })?,
        metadata: metadata.ok_or(InsightsError::MissingPart {
            name: Document::Metadata.field_name(),
        })?,
    })
}
