//! wikimeta Knowledge Graph Client
//!
//! Implementations of the `KnowledgeGraph` trait from `wikimeta-domain`.
//!
//! # Implementations
//!
//! - `WikidataClient`: HTTP access to the Wikidata action API and SPARQL endpoint
//! - `MockGraph`: Deterministic in-memory graph for testing
//!
//! # Examples
//!
//! ```
//! use wikimeta_client::MockGraph;
//! use wikimeta_domain::{KnowledgeGraph, SearchHit};
//!
//! # async fn example() {
//! let graph = MockGraph::default();
//! graph.add_search_results("en", vec![SearchHit {
//!     id: Some("Q42".to_string()),
//!     label: Some("Douglas Adams".to_string()),
//!     description: None,
//! }]);
//! let hits = graph.search_entities("douglas adams", "en").await.unwrap();
//! assert_eq!(hits.len(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod wikidata;

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use wikimeta_domain::{Binding, EntityId, KnowledgeGraph, SearchHit};

pub use config::ClientConfig;
pub use wikidata::WikidataClient;

/// Errors that can occur while talking to the knowledge graph
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network-level failure (DNS, refused connection, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code returned by the endpoint
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The action API reported an error in its payload
    #[error("API error ({code}): {info}")]
    Api {
        /// MediaWiki error code
        code: String,
        /// Human-readable error text
        info: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client construction or configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("Client error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::Connection(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else if e.is_builder() {
            ClientError::Config(e.to_string())
        } else {
            ClientError::Other(e.to_string())
        }
    }
}

/// Mock knowledge graph for deterministic testing
///
/// Returns pre-configured search hits and result rows without making any
/// network calls, and records every query it receives.
///
/// # Examples
///
/// ```
/// use wikimeta_client::MockGraph;
/// use wikimeta_domain::{BindingCell, KnowledgeGraph};
/// use std::collections::HashMap;
///
/// # async fn example() {
/// let graph = MockGraph::default();
/// let mut row = HashMap::new();
/// row.insert("propertyLabel".to_string(), BindingCell::new("instance of"));
/// graph.set_rows(vec![row]);
///
/// let rows = graph.select("SELECT ...").await.unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(graph.queries(), vec!["SELECT ...".to_string()]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGraph {
    searches: Arc<Mutex<HashMap<String, Vec<SearchHit>>>>,
    failing_languages: Arc<Mutex<HashSet<String>>>,
    details: Arc<Mutex<HashMap<String, SearchHit>>>,
    rows: Arc<Mutex<Vec<Binding>>>,
    select_fails: Arc<Mutex<bool>>,
    queries: Arc<Mutex<Vec<String>>>,
    search_calls: Arc<Mutex<Vec<String>>>,
}

impl MockGraph {
    /// Register the hits returned for any search in `language`
    pub fn add_search_results(&self, language: impl Into<String>, hits: Vec<SearchHit>) {
        self.searches.lock().unwrap().insert(language.into(), hits);
    }

    /// Make every search in `language` fail
    pub fn add_search_error(&self, language: impl Into<String>) {
        self.failing_languages.lock().unwrap().insert(language.into());
    }

    /// Register the label/description returned for an entity
    pub fn add_details(&self, id: impl Into<String>, hit: SearchHit) {
        self.details.lock().unwrap().insert(id.into(), hit);
    }

    /// Set the rows returned by every SELECT query
    pub fn set_rows(&self, rows: Vec<Binding>) {
        *self.rows.lock().unwrap() = rows;
    }

    /// Make every SELECT query fail
    pub fn set_select_error(&self) {
        *self.select_fails.lock().unwrap() = true;
    }

    /// SELECT queries received so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Languages of the searches received so far, in order
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    /// Total number of endpoint calls
    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len() + self.search_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl KnowledgeGraph for MockGraph {
    type Error = ClientError;

    async fn search_entities(&self, _query: &str, language: &str) -> Result<Vec<SearchHit>, Self::Error> {
        self.search_calls.lock().unwrap().push(language.to_string());

        if self.failing_languages.lock().unwrap().contains(language) {
            return Err(ClientError::Other("Mock error".to_string()));
        }

        Ok(self
            .searches
            .lock()
            .unwrap()
            .get(language)
            .cloned()
            .unwrap_or_default())
    }

    async fn entity_details(&self, id: &EntityId, _languages: &[String]) -> Result<SearchHit, Self::Error> {
        Ok(self
            .details
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| SearchHit {
                id: Some(id.to_string()),
                label: None,
                description: None,
            }))
    }

    async fn select(&self, sparql: &str) -> Result<Vec<Binding>, Self::Error> {
        self.queries.lock().unwrap().push(sparql.to_string());

        if *self.select_fails.lock().unwrap() {
            return Err(ClientError::Http {
                status: 500,
                message: "Mock error".to_string(),
            });
        }

        Ok(self.rows.lock().unwrap().clone())
    }
}
