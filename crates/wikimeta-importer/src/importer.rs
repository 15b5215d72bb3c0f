//! Fetch-then-merge orchestration

use crate::{ImportError, MergeConfig, MergeOutcome, MergePolicy, SkipReason};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wikimeta_domain::{DocumentRef, EntityId, KnowledgeGraph, MetadataStore};
use wikimeta_extractor::{build_link, EntitySearch, PropertyExtractor, QueryOptions};

/// Summary of one completed import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    /// Document that received the properties
    pub document: DocumentRef,

    /// Entity the properties were fetched for
    pub entity: EntityId,

    /// Entity description, when the endpoint returned one
    pub description: Option<String>,

    /// Properties written to the document
    pub written: Vec<String>,

    /// Properties left out, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

/// Imports entity properties into documents of a metadata store
pub struct Importer<G, S>
where
    G: KnowledgeGraph,
    S: MetadataStore,
{
    extractor: PropertyExtractor<G>,
    search: EntitySearch<G>,
    store: S,
    policy: MergePolicy,
    options: QueryOptions,
}

impl<G, S> Importer<G, S>
where
    G: KnowledgeGraph,
    S: MetadataStore,
{
    /// Create a new importer
    ///
    /// Both configurations are validated up front.
    pub fn new(
        graph: G,
        store: S,
        options: QueryOptions,
        merge: MergeConfig,
    ) -> Result<Self, ImportError> {
        options.validate().map_err(ImportError::Config)?;
        merge.validate().map_err(ImportError::Config)?;

        let graph = Arc::new(graph);
        Ok(Self {
            extractor: PropertyExtractor::from_shared(Arc::clone(&graph)),
            search: EntitySearch::from_shared(graph),
            store,
            policy: MergePolicy::new(merge),
            options,
        })
    }

    /// The document store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The query options in use
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Fetch the properties of `entity_id` and merge them into `doc`
    ///
    /// Nothing is written when fetching fails.
    pub async fn import_entity(
        &self,
        doc: &DocumentRef,
        entity_id: &str,
    ) -> Result<ImportReport, ImportError> {
        let id = EntityId::parse(entity_id)?;
        let extraction = self.extractor.extract_detailed(id.as_str(), &self.options).await?;

        let mut outcome = None;
        self.store
            .update_metadata(doc, |metadata| {
                let MergeOutcome { metadata: merged, written, skipped } = self
                    .policy
                    .merge(&extraction.properties, &id, std::mem::take(metadata));
                *metadata = merged;
                outcome = Some((written, skipped));
            })
            .await
            .map_err(|e| ImportError::Store(e.to_string()))?;

        let (written, skipped) = outcome.ok_or_else(|| {
            ImportError::Store(format!("Store did not apply the update to {}", doc))
        })?;

        info!(
            "Imported {} into {}: {} written, {} skipped",
            id,
            doc,
            written.len(),
            skipped.len()
        );

        Ok(ImportReport {
            document: doc.clone(),
            entity: id,
            description: extraction.description,
            written,
            skipped,
        })
    }

    /// Re-import the entity a document already records under the id key
    pub async fn import_from_document(&self, doc: &DocumentRef) -> Result<ImportReport, ImportError> {
        let key = &self.policy.config().entity_id_key;
        let metadata = self
            .store
            .read_metadata(doc)
            .await
            .map_err(|e| ImportError::Store(e.to_string()))?;

        let missing = || ImportError::MissingEntityId {
            document: doc.to_string(),
            key: key.clone(),
        };
        let entity_id = match metadata.get(key) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => {
                warn!("Field '{}' of {} is not text: {}", key, doc, other);
                return Err(missing());
            }
            None => return Err(missing()),
        };

        debug!("Document {} records entity {}", doc, entity_id);
        self.import_entity(doc, &entity_id).await
    }

    /// Search for `query`, take the first candidate and import it into the
    /// document named by `path_template`
    ///
    /// The template takes the same `${label}` and `${id}` placeholders as
    /// cross-references; the document is created when it does not exist.
    pub async fn import_search_result(
        &self,
        query: &str,
        path_template: &str,
    ) -> Result<ImportReport, ImportError> {
        let candidates = self.search.search(query, &self.options).await?;
        let entity = candidates
            .into_iter()
            .next()
            .ok_or_else(|| ImportError::NoMatch(query.to_string()))?;

        let label = entity.label().unwrap_or(entity.id().as_str());
        let path = build_link(path_template, label, entity.id().numeric());
        debug!("Search '{}' resolved to {} at {}", query, entity.id(), path);

        let doc = self
            .store
            .resolve_document(&path)
            .await
            .map_err(|e| ImportError::Store(e.to_string()))?;

        self.import_entity(&doc, entity.id().as_str()).await
    }
}
