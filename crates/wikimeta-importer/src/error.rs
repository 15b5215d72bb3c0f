//! Importer error types

use thiserror::Error;
use wikimeta_domain::EntityIdError;
use wikimeta_extractor::ExtractorError;

/// Errors that can occur during an import
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document does not record which entity it describes
    #[error("Document {document} has no '{key}' field")]
    MissingEntityId {
        /// Document that was read
        document: String,
        /// Metadata key that was expected
        key: String,
    },

    /// The recorded or given entity identifier is malformed
    #[error("Invalid entity identifier: {0}")]
    InvalidEntityId(#[from] EntityIdError),

    /// Fetching properties failed
    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    /// A search returned no usable candidate
    #[error("No entity found for '{0}'")]
    NoMatch(String),

    /// Document store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
