//! Error types for the Extractor

use thiserror::Error;
use wikimeta_domain::EntityIdError;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The entity identifier is absent or malformed
    #[error("Invalid entity identifier: {0}")]
    InvalidEntityId(#[from] EntityIdError),

    /// The query endpoint failed for this entity
    #[error("Failed to fetch properties for {entity}: {message}")]
    Query {
        /// Entity the query was issued for
        entity: String,
        /// Underlying failure
        message: String,
    },

    /// The entity lookup endpoint failed
    #[error("Failed to look up {entity}: {message}")]
    Lookup {
        /// Entity that was looked up
        entity: String,
        /// Underlying failure
        message: String,
    },

    /// A result row lacked a required column
    #[error("Malformed result row {row}: missing column '{column}'")]
    MalformedRow {
        /// Zero-based row index
        row: usize,
        /// Missing column name
        column: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
