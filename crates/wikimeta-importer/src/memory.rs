//! In-memory document store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use wikimeta_domain::{DocumentRef, Metadata, MetadataStore};

/// Errors raised by [`MemoryStore`]
#[derive(Error, Debug)]
pub enum MemoryStoreError {
    /// No document exists at the path
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A previous holder of the lock panicked
    #[error("Store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for MemoryStoreError {
    fn from(_: PoisonError<T>) -> Self {
        MemoryStoreError::Poisoned
    }
}

/// Metadata store backed by a shared map of path → metadata
///
/// Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<String, Metadata>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document
    pub fn insert(&self, path: impl Into<String>, metadata: Metadata) -> DocumentRef {
        let path = path.into();
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        documents.insert(path.clone(), metadata);
        DocumentRef::new(path)
    }

    /// Snapshot of a document's metadata
    pub fn get(&self, path: &str) -> Option<Metadata> {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        documents.get(path).cloned()
    }

    /// Paths of every stored document, sorted
    pub fn paths(&self) -> Vec<String> {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let mut paths: Vec<String> = documents.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl MetadataStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn resolve_document(&self, path: &str) -> Result<DocumentRef, Self::Error> {
        let mut documents = self.documents.lock()?;
        documents.entry(path.to_string()).or_default();
        Ok(DocumentRef::new(path))
    }

    async fn read_metadata(&self, doc: &DocumentRef) -> Result<Metadata, Self::Error> {
        let documents = self.documents.lock()?;
        documents
            .get(doc.path())
            .cloned()
            .ok_or_else(|| MemoryStoreError::NotFound(doc.path().to_string()))
    }

    async fn update_metadata<F>(&self, doc: &DocumentRef, update: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Metadata) + Send,
    {
        let mut documents = self.documents.lock()?;
        let metadata = documents
            .get_mut(doc.path())
            .ok_or_else(|| MemoryStoreError::NotFound(doc.path().to_string()))?;
        update(metadata);
        Ok(())
    }
}
