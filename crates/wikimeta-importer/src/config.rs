//! Merge configuration

use serde::{Deserialize, Serialize};

/// Default metadata key recording the imported entity
pub const DEFAULT_ENTITY_ID_KEY: &str = "wikidata entity id";

/// Configuration for merging fetched properties into document metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Replace existing values instead of keeping them
    pub overwrite: bool,

    /// When non-empty, only these properties are written
    pub allow_list: Vec<String>,

    /// Properties that are never written
    pub block_list: Vec<String>,

    /// Metadata key that receives the entity identifier
    pub entity_id_key: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            allow_list: Vec::new(),
            block_list: Vec::new(),
            entity_id_key: DEFAULT_ENTITY_ID_KEY.to_string(),
        }
    }
}

impl MergeConfig {
    /// Configuration that refreshes every fetched property
    pub fn overwriting() -> Self {
        Self {
            overwrite: true,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.entity_id_key.trim().is_empty() {
            return Err("entity_id_key must not be empty".to_string());
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
