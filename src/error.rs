//! Error types and handling for the location insights service

use std::fmt;

use thiserror::Error;

/// Which uploaded file an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Locations,
    Metadata,
}

impl Document {
    /// Multipart field name the document is uploaded under
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Document::Locations => "locationsFile",
            Document::Metadata => "metadataFile",
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Locations => write!(f, "locations"),
            Document::Metadata => write!(f, "metadata"),
        }
    }
}

/// Main error type for the location insights service
#[derive(Error, Debug)]
pub enum InsightsError {
    /// An uploaded file is not a JSON array of the expected records
    #[error("Malformed {document} file: {source}")]
    MalformedInput {
        document: Document,
        #[source]
        source: serde_json::Error,
    },

    /// An id repeats within one file while duplicates are rejected
    #[error("Duplicate id '{id}' in {document} file")]
    DuplicateId { document: Document, id: String },

    /// A required multipart part was not sent
    #[error("Missing required file: {name}")]
    MissingPart { name: &'static str },

    /// The request body could not be read as multipart form data
    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    /// The request body exceeded the configured upload limit
    #[error("Upload exceeds the configured size limit")]
    UploadTooLarge,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl InsightsError {
    /// Create a new malformed input error
    pub fn malformed(document: Document, source: serde_json::Error) -> Self {
        Self::MalformedInput { document, source }
    }

    /// Create a new duplicate id error
    pub fn duplicate_id<S: Into<String>>(document: Document, id: S) -> Self {
        Self::DuplicateId {
            document,
            id: id.into(),
        }
    }

    /// Create a new invalid upload error
    pub fn invalid_upload<S: Into<String>>(message: S) -> Self {
        Self::InvalidUpload {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the message returned to API clients. Never includes the parser detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            InsightsError::MalformedInput { .. } | InsightsError::InvalidUpload { .. } => {
                "Invalid file format".to_string()
            }
            InsightsError::DuplicateId { .. } => "Duplicate id".to_string(),
            InsightsError::MissingPart { name } => format!("Missing required file: {name}"),
            InsightsError::UploadTooLarge => "File too large".to_string(),
            InsightsError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
        }
    }
}
