//! Markdown documents with TOML front matter as a metadata store.
//!
//! A document looks like:
//!
//! ```text
//! +++
//! title = "Douglas Adams"
//! "wikidata entity id" = "Q42"
//! +++
//! Body text.
//! ```
//!
//! A document without a leading `+++` line has empty metadata.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};
use wikimeta_domain::{DocumentRef, Metadata, MetadataStore};

/// Front matter delimiter line
pub const DELIMITER: &str = "+++";

/// Errors raised by [`FrontMatterStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system error
    #[error("{path}: {source}")]
    Io {
        /// Document path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Front matter is not valid TOML
    #[error("{path}: invalid front matter: {message}")]
    Parse {
        /// Document path
        path: String,
        /// Parser message
        message: String,
    },

    /// Opening delimiter without a closing one
    #[error("{0}: front matter is not terminated by '+++'")]
    Unterminated(String),

    /// Metadata could not be written as TOML
    #[error("{path}: cannot write front matter: {message}")]
    Serialize {
        /// Document path
        path: String,
        /// Serializer message
        message: String,
    },

    /// Path escapes the store root
    #[error("Invalid document path '{0}'")]
    InvalidPath(String),
}

/// Split a document into its front matter (if any) and body
pub fn split_front_matter(content: &str) -> Result<(Option<&str>, &str), String> {
    let Some(rest) = content
        .strip_prefix("+++\r\n")
        .or_else(|| content.strip_prefix("+++\n"))
    else {
        return Ok((None, content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err("unterminated".to_string())
}

/// Convert TOML front matter to metadata
pub fn toml_to_metadata(table: toml::Table) -> Metadata {
    table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect()
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect())
        }
    }
}

/// Convert metadata to a TOML table
///
/// TOML has no null; null fields and null array items are left out.
pub fn metadata_to_toml(metadata: &Metadata) -> toml::Table {
    metadata
        .iter()
        .filter_map(|(k, v)| json_to_toml(v).map(|v| (k.clone(), v)))
        .collect()
}

fn json_to_toml(value: &Value) -> Option<toml::Value> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(toml::Value::Boolean(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(toml::Value::Integer)
            .or_else(|| n.as_f64().map(toml::Value::Float)),
        Value::String(s) => Some(toml::Value::String(s.clone())),
        Value::Array(items) => Some(toml::Value::Array(
            items.iter().filter_map(json_to_toml).collect(),
        )),
        Value::Object(map) => Some(toml::Value::Table(
            map.iter()
                .filter_map(|(k, v)| json_to_toml(v).map(|v| (k.clone(), v)))
                .collect(),
        )),
    }
}

/// Fold updated metadata back into the table it was read from
///
/// Fields whose value is unchanged keep their original TOML form, so dates
/// and other TOML-only types survive a rewrite.
pub fn merge_into_table(original: toml::Table, before: &Metadata, after: &Metadata) -> toml::Table {
    let mut original = original;
    after
        .iter()
        .filter_map(|(key, value)| {
            let kept = (before.get(key) == Some(value))
                .then(|| original.remove(key))
                .flatten();
            kept.or_else(|| json_to_toml(value)).map(|v| (key.clone(), v))
        })
        .collect()
}

/// Render a document from metadata and body
pub fn render_document(metadata: &Metadata, body: &str) -> Result<String, String> {
    render_table(&metadata_to_toml(metadata), body)
}

fn render_table(table: &toml::Table, body: &str) -> Result<String, String> {
    if table.is_empty() {
        return Ok(body.to_string());
    }
    let front = toml::to_string(table).map_err(|e| e.to_string())?;
    Ok(format!("{DELIMITER}\n{front}{DELIMITER}\n{body}"))
}

/// Metadata store over markdown files below a root directory
#[derive(Debug, Clone)]
pub struct FrontMatterStore {
    root: PathBuf,
}

impl FrontMatterStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File system location of a document path
    fn locate(&self, path: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.trim().is_empty() || escapes {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    async fn read(&self, doc: &DocumentRef) -> Result<(toml::Table, String), StoreError> {
        let file = self.locate(doc.path())?;
        let content = fs::read_to_string(&file).await.map_err(|source| StoreError::Io {
            path: doc.to_string(),
            source,
        })?;

        let (front, body) = split_front_matter(&content)
            .map_err(|_| StoreError::Unterminated(doc.to_string()))?;

        let table = match front {
            Some(front) => toml::from_str(front).map_err(|e| StoreError::Parse {
                path: doc.to_string(),
                message: e.to_string(),
            })?,
            None => toml::Table::new(),
        };

        Ok((table, body.to_string()))
    }
}

#[async_trait]
impl MetadataStore for FrontMatterStore {
    type Error = StoreError;

    async fn resolve_document(&self, path: &str) -> Result<DocumentRef, Self::Error> {
        let file = self.locate(path)?;
        let io_err = |source| StoreError::Io {
            path: path.to_string(),
            source,
        };

        if fs::try_exists(&file).await.map_err(io_err)? {
            return Ok(DocumentRef::new(path));
        }

        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        fs::write(&file, "").await.map_err(io_err)?;
        debug!("Created document {}", file.display());

        Ok(DocumentRef::new(path))
    }

    async fn read_metadata(&self, doc: &DocumentRef) -> Result<Metadata, Self::Error> {
        self.read(doc).await.map(|(table, _)| toml_to_metadata(table))
    }

    async fn update_metadata<F>(&self, doc: &DocumentRef, update: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Metadata) + Send,
    {
        let (table, body) = self.read(doc).await?;
        let before = toml_to_metadata(table.clone());
        let mut metadata = before.clone();
        update(&mut metadata);

        if metadata.values().any(Value::is_null) {
            warn!("Dropping null fields from {}", doc);
        }

        let merged = merge_into_table(table, &before, &metadata);
        let rendered = render_table(&merged, &body).map_err(|message| StoreError::Serialize {
            path: doc.to_string(),
            message,
        })?;

        // Write next to the target, then swap it in
        let file = self.locate(doc.path())?;
        let staging = file.with_extension("wikimeta.tmp");
        let io_err = |source| StoreError::Io {
            path: doc.to_string(),
            source,
        };
        fs::write(&staging, rendered).await.map_err(io_err)?;
        fs::rename(&staging, &file).await.map_err(io_err)?;

        Ok(())
    }
}
