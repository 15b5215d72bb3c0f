//! Free-text entity search across languages

use crate::config::QueryOptions;
use crate::error::ExtractorError;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use wikimeta_domain::{Entity, KnowledgeGraph};

/// Resolves free-text queries and bare identifiers to entities
pub struct EntitySearch<G>
where
    G: KnowledgeGraph,
{
    graph: Arc<G>,
}

impl<G> EntitySearch<G>
where
    G: KnowledgeGraph,
{
    /// Create a new search over a knowledge graph
    pub fn new(graph: G) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Create a search sharing an existing graph handle
    pub fn from_shared(graph: Arc<G>) -> Self {
        Self { graph }
    }

    /// Search every configured language and merge the candidates
    ///
    /// Lookups run concurrently; results are merged in language order and
    /// de-duplicated by identifier, first discovery wins. A failing language
    /// only reduces the candidate list.
    pub async fn search(
        &self,
        query: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Entity>, ExtractorError> {
        options.validate_languages().map_err(ExtractorError::Config)?;

        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let languages = options.languages();
        let lookups = languages
            .iter()
            .map(|language| self.graph.search_entities(query, language));
        let responses = join_all(lookups).await;

        let mut seen = HashSet::new();
        let mut entities = Vec::new();

        for (language, response) in languages.iter().zip(responses) {
            let hits = match response {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Search for '{}' failed in language '{}': {}", query, language, e);
                    continue;
                }
            };

            debug!("Search for '{}' in '{}' returned {} hits", query, language, hits.len());

            for hit in hits {
                match Entity::try_from(hit) {
                    Ok(entity) => {
                        if seen.insert(entity.id().clone()) {
                            entities.push(entity);
                        }
                    }
                    Err(e) => warn!("Skipping malformed search hit: {}", e),
                }
            }
        }

        Ok(entities)
    }

    /// Fill in label and description for an entity known only by identifier
    ///
    /// Each field takes the first configured language that has a value.
    pub async fn describe(
        &self,
        entity: &Entity,
        options: &QueryOptions,
    ) -> Result<Entity, ExtractorError> {
        options.validate_languages().map_err(ExtractorError::Config)?;

        let hit = self
            .graph
            .entity_details(entity.id(), &options.languages())
            .await
            .map_err(|e| ExtractorError::Lookup {
                entity: entity.id().to_string(),
                message: e.to_string(),
            })?;

        Ok(entity.with_details(hit.label, hit.description))
    }
}
