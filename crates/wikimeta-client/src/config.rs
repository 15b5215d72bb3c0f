//! Endpoint configuration for the Wikidata client

use serde::{Deserialize, Serialize};

/// Default SPARQL query service
pub const DEFAULT_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Default MediaWiki action API
pub const DEFAULT_API_ENDPOINT: &str = "https://www.wikidata.org/w/api.php";

/// Default number of hits requested per search language
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// User-Agent sent with every request (required by the Wikimedia API policy)
pub const DEFAULT_USER_AGENT: &str = concat!(
    "wikimeta/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/your-org/wikimeta)"
);

/// Configuration for [`crate::WikidataClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// SPARQL endpoint URL
    pub sparql_endpoint: String,

    /// Action API endpoint URL (search and entity details)
    pub api_endpoint: String,

    /// User-Agent header value
    pub user_agent: String,

    /// Maximum hits per search language (the API caps this at 50)
    pub search_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sparql_endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Point both endpoints at a single base URL (used against local mocks)
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            sparql_endpoint: format!("{}/sparql", base),
            api_endpoint: format!("{}/w/api.php", base),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [("sparql_endpoint", &self.sparql_endpoint), ("api_endpoint", &self.api_endpoint)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        if self.search_limit == 0 || self.search_limit > 50 {
            return Err("search_limit must be between 1 and 50".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
