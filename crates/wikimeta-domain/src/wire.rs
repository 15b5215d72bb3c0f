//! Wire shapes returned by the knowledge graph endpoints
//!
//! These mirror the JSON payloads as loosely as the endpoints produce them;
//! validation into domain types happens in the consuming crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of a free-text entity search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Entity identifier, e.g. `Q42`
    #[serde(default)]
    pub id: Option<String>,

    /// Display label in the requested language
    #[serde(default)]
    pub label: Option<String>,

    /// Short description in the requested language
    #[serde(default)]
    pub description: Option<String>,
}

/// A single cell of a SPARQL JSON result binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingCell {
    /// Lexical value of the cell
    pub value: String,
}

impl BindingCell {
    /// Build a cell from a lexical value
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

/// One result row: variable name → cell; unbound variables are absent
pub type Binding = HashMap<String, BindingCell>;
