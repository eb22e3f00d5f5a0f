//! Error types for metadata access

use thiserror::Error;

/// Error raised by a metadata source
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Query error: {0}")]
    Query(String),

    #[error("Metadata error: {0}")]
    Metadata(String),
}

/// Result type alias for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;
