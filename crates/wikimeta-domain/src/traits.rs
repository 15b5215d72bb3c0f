//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the extraction pipeline and
//! infrastructure. Implementations live in other crates.

use crate::{Binding, EntityId, Metadata, SearchHit};
use async_trait::async_trait;
use std::fmt;

/// Read-only access to the knowledge graph
///
/// Implemented by the infrastructure layer (wikimeta-client)
#[async_trait]
pub trait KnowledgeGraph: Send + Sync {
    /// Error type for endpoint operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Free-text entity lookup in a single language
    async fn search_entities(&self, query: &str, language: &str)
        -> Result<Vec<SearchHit>, Self::Error>;

    /// Label and description of one entity, first matching language wins
    async fn entity_details(&self, id: &EntityId, languages: &[String])
        -> Result<SearchHit, Self::Error>;

    /// Run a SELECT query and return its result bindings
    async fn select(&self, sparql: &str) -> Result<Vec<Binding>, Self::Error>;
}

/// Handle to a document owned by the host application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef(String);

impl DocumentRef {
    /// Create a handle from a host path
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Host path of the document
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Document metadata storage provided by the host
///
/// Implemented by the host layer (the CLI's front-matter store, or an
/// in-memory store in tests)
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve a document path, creating an empty document if needed
    async fn resolve_document(&self, path: &str) -> Result<DocumentRef, Self::Error>;

    /// Current metadata of a document; empty when it has none
    async fn read_metadata(&self, doc: &DocumentRef) -> Result<Metadata, Self::Error>;

    /// Atomically read, modify and write back the metadata of a document
    async fn update_metadata<F>(&self, doc: &DocumentRef, update: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Metadata) + Send;
}
