//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wikimeta_client::ClientConfig;
use wikimeta_extractor::QueryOptions;
use wikimeta_importer::MergeConfig;

/// Default path template for documents created by search-then-import
pub const DEFAULT_IMPORT_TEMPLATE: &str = "db/${label}.md";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Query, filtering and naming options
    #[serde(default)]
    pub query: QueryOptions,

    /// Merge rules for imports
    #[serde(default)]
    pub merge: MergeConfig,

    /// Endpoint settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Directory holding the markdown documents
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Path template for documents created by search-then-import
    #[serde(default = "default_import_template")]
    pub import_template: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wikimeta").join("config.toml"))
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.query
            .validate()
            .map_err(|e| CliError::Config(format!("[query] {}", e)))?;
        self.merge
            .validate()
            .map_err(|e| CliError::Config(format!("[merge] {}", e)))?;
        self.client
            .validate()
            .map_err(|e| CliError::Config(format!("[client] {}", e)))?;
        if self.settings.import_template.trim().is_empty() {
            return Err(CliError::Config("[settings] import_template must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            root: default_root(),
            import_template: default_import_template(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_import_template() -> String {
    DEFAULT_IMPORT_TEMPLATE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.query.language, "en");
        assert_eq!(config.merge.entity_id_key, "wikidata entity id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[query]\nlanguage = \"fr,en\"\nignore_ids = true\n\n[merge]\nblock_list = [\"image\"]\n\n[settings]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.query.languages(), vec!["fr", "en"]);
        assert!(config.query.ignore_ids);
        assert!(config.query.ignore_categories);
        assert_eq!(config.merge.block_list, vec!["image".to_string()]);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn test_invalid_section_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[query]\nlanguage = \"\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("[query]"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.query = QueryOptions::strict();
        config.merge.overwrite = true;
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
