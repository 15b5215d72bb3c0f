//! Query options for property extraction and entity search

use serde::{Deserialize, Serialize};

/// Default cross-reference template
pub const DEFAULT_LINK_TEMPLATE: &str = "db/${label}";

/// Options controlling how properties are queried, filtered and named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Comma-separated language codes, in order of preference
    pub language: String,

    /// Drop values whose label starts with `Category:`
    pub ignore_categories: bool,

    /// Drop values whose label starts with `Wikipedia:`
    pub ignore_wikipedia_pages: bool,

    /// Drop properties whose name contains the word `ID`
    pub ignore_ids: bool,

    /// Exclude statements qualified by start time, end time or point in time
    pub ignore_properties_with_time_ranges: bool,

    /// Cross-reference path template with `${label}` and `${id}` placeholders
    pub internal_link_prefix: String,

    /// Replacement for runs of non-letter characters in property names;
    /// empty leaves names unchanged
    pub space_replacement: String,
}

impl QueryOptions {
    /// Language codes in order of preference
    ///
    /// # Examples
    ///
    /// ```
    /// use wikimeta_extractor::QueryOptions;
    ///
    /// let options = QueryOptions { language: "en, fr,,de".to_string(), ..Default::default() };
    /// assert_eq!(options.languages(), vec!["en", "fr", "de"]);
    /// ```
    pub fn languages(&self) -> Vec<String> {
        self.language
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), String> {
        self.validate_languages()?;
        if self.internal_link_prefix.trim().is_empty() {
            return Err("internal_link_prefix must not be empty".to_string());
        }
        Ok(())
    }

    /// Validate the language list alone
    ///
    /// Language codes are spliced into the query text, so only letters and
    /// hyphens are accepted.
    pub fn validate_languages(&self) -> Result<(), String> {
        let languages = self.languages();
        if languages.is_empty() {
            return Err("language must name at least one language code".to_string());
        }
        if let Some(bad) = languages
            .iter()
            .find(|code| !code.chars().all(|c| c.is_ascii_alphabetic() || c == '-'))
        {
            return Err(format!("invalid language code '{}'", bad));
        }
        Ok(())
    }

    /// Strict preset: every filter enabled
    pub fn strict() -> Self {
        Self {
            ignore_categories: true,
            ignore_wikipedia_pages: true,
            ignore_ids: true,
            ignore_properties_with_time_ranges: true,
            ..Self::default()
        }
    }

    /// Load options from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize options to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            ignore_categories: true,
            ignore_wikipedia_pages: true,
            ignore_ids: false,
            ignore_properties_with_time_ranges: false,
            internal_link_prefix: DEFAULT_LINK_TEMPLATE.to_string(),
            space_replacement: String::new(),
        }
    }
}
