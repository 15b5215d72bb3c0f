//! Wikidata Client Implementation
//!
//! Talks to the two public Wikidata services:
//!
//! - the MediaWiki action API (`wbsearchentities`, `wbgetentities`) for
//!   free-text lookup and entity labels
//! - the SPARQL query service for property extraction
//!
//! Requests are unauthenticated GETs. No retry is attempted and timeouts
//! are left at the transport defaults; callers re-invoke on failure.
//!
//! # Examples
//!
//! ```no_run
//! use wikimeta_client::{ClientConfig, WikidataClient};
//! use wikimeta_domain::KnowledgeGraph;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WikidataClient::new(ClientConfig::default())?;
//! let hits = client.search_entities("Douglas Adams", "en").await?;
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::ClientError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use wikimeta_domain::{Binding, EntityId, KnowledgeGraph, SearchHit};

/// Accept header for SPARQL JSON results
const SPARQL_JSON: &str = "application/sparql-results+json";

/// Client for the public Wikidata endpoints
#[derive(Debug, Clone)]
pub struct WikidataClient {
    config: ClientConfig,
    http: reqwest::Client,
}

/// Error object embedded in action API responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    info: String,
}

/// Response from `wbsearchentities`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
    error: Option<ApiErrorBody>,
}

/// A single language-tagged string in `wbgetentities`
#[derive(Debug, Deserialize)]
struct LanguageValue {
    value: String,
}

/// One entity record in `wbgetentities`
#[derive(Debug, Deserialize)]
struct EntityRecord {
    #[serde(default)]
    labels: HashMap<String, LanguageValue>,
    #[serde(default)]
    descriptions: HashMap<String, LanguageValue>,
}

/// Response from `wbgetentities`
#[derive(Debug, Deserialize)]
struct EntitiesResponse {
    #[serde(default)]
    entities: HashMap<String, EntityRecord>,
    error: Option<ApiErrorBody>,
}

/// SPARQL JSON results document
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<Binding>,
}

impl WikidataClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the configuration is invalid or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate().map_err(ClientError::Config)?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Create a client against the public Wikidata endpoints
    pub fn default_endpoints() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a GET request and decode a JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        accept: &str,
    ) -> Result<T, ClientError> {
        debug!("GET {} ({} params)", url, params.len());

        let response = self
            .http
            .get(url)
            .query(params)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Pick the first language in `languages` that has a value
fn first_available(values: &HashMap<String, LanguageValue>, languages: &[String]) -> Option<String> {
    languages
        .iter()
        .find_map(|lang| values.get(lang))
        .map(|v| v.value.clone())
}

#[async_trait]
impl KnowledgeGraph for WikidataClient {
    type Error = ClientError;

    async fn search_entities(&self, query: &str, language: &str) -> Result<Vec<SearchHit>, Self::Error> {
        let limit = self.config.search_limit.to_string();
        let params = [
            ("action", "wbsearchentities"),
            ("search", query),
            ("language", language),
            ("uselang", language),
            ("type", "item"),
            ("limit", limit.as_str()),
            ("format", "json"),
        ];

        let response: SearchResponse = self
            .get_json(&self.config.api_endpoint, &params, "application/json")
            .await?;

        if let Some(error) = response.error {
            return Err(ClientError::Api {
                code: error.code,
                info: error.info,
            });
        }

        debug!("Search '{}' [{}] returned {} hits", query, language, response.search.len());
        Ok(response.search)
    }

    async fn entity_details(&self, id: &EntityId, languages: &[String]) -> Result<SearchHit, Self::Error> {
        let language_list = languages.join("|");
        let params = [
            ("action", "wbgetentities"),
            ("ids", id.as_str()),
            ("props", "labels|descriptions"),
            ("languages", language_list.as_str()),
            ("format", "json"),
        ];

        let response: EntitiesResponse = self
            .get_json(&self.config.api_endpoint, &params, "application/json")
            .await?;

        if let Some(error) = response.error {
            return Err(ClientError::Api {
                code: error.code,
                info: error.info,
            });
        }

        let record = response.entities.get(id.as_str());
        Ok(SearchHit {
            id: Some(id.to_string()),
            label: record.and_then(|r| first_available(&r.labels, languages)),
            description: record.and_then(|r| first_available(&r.descriptions, languages)),
        })
    }

    async fn select(&self, sparql: &str) -> Result<Vec<Binding>, Self::Error> {
        let params = [("query", sparql), ("format", "json")];

        let response: SparqlResponse = self
            .get_json(&self.config.sparql_endpoint, &params, SPARQL_JSON)
            .await?;

        debug!("SPARQL query returned {} rows", response.results.bindings.len());
        Ok(response.results.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WikidataClient::default_endpoints().unwrap();
        assert_eq!(client.config().sparql_endpoint, crate::config::DEFAULT_SPARQL_ENDPOINT);
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig {
            search_limit: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(WikidataClient::new(config), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_first_available_language() {
        let mut values = HashMap::new();
        values.insert("fr".to_string(), LanguageValue { value: "Univers".to_string() });
        values.insert("de".to_string(), LanguageValue { value: "Universum".to_string() });

        let languages = vec!["en".to_string(), "fr".to_string(), "de".to_string()];
        assert_eq!(first_available(&values, &languages), Some("Univers".to_string()));
        assert_eq!(first_available(&values, &["it".to_string()]), None);
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Nothing listens on port 9 locally
        let client = WikidataClient::new(ClientConfig::with_base_url("http://127.0.0.1:9")).unwrap();

        let result = client.select("SELECT * WHERE {}").await;
        assert!(matches!(
            result,
            Err(ClientError::Connection(_)) | Err(ClientError::Other(_))
        ));
    }
}
