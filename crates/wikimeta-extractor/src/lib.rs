//! Wikimeta Extractor
//!
//! Turns an entity identifier into a deterministic, typed, filtered property
//! mapping, and resolves free-text queries to candidate entities.
//!
//! # Overview
//!
//! The extractor issues one fixed-shape SPARQL query per entity, validates
//! every result row, classifies each value by its datatype and builds
//! cross-reference markup for values that point at other entities.
//!
//! # Architecture
//!
//! ```text
//! EntityId → QueryBuilder → KnowledgeGraph → parser → classifier + link → PropertyMapping
//! query text → EntitySearch (one lookup per language) → Vec<Entity>
//! ```
//!
//! # Key Features
//!
//! - **Typed values**: integers, decimals, dates, text and cross-references
//! - **Filtering**: categories, meta pages, identifier properties, time-qualified statements
//! - **Renaming**: optional replacement of non-letter runs in property names
//! - **Multi-language search**: concurrent lookups, de-duplicated in language order
//!
//! # Example Usage
//!
//! ```no_run
//! use wikimeta_client::WikidataClient;
//! use wikimeta_extractor::{PropertyExtractor, QueryOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WikidataClient::default_endpoints()?;
//! let extractor = PropertyExtractor::new(client);
//!
//! let properties = extractor.extract("Q42", &QueryOptions::default()).await?;
//!
//! for (name, values) in properties.iter() {
//!     println!("{}: {} value(s)", name, values.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod extractor;
mod link;
mod parser;
mod query;
mod search;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::{classify, coerce_primitive, entity_suffix, Datatype, ValueKind};
pub use config::{QueryOptions, DEFAULT_LINK_TEMPLATE};
pub use error::ExtractorError;
pub use extractor::{process_rows, rename_property, PropertyExtractor, CATEGORY_PREFIX, WIKIPEDIA_PREFIX};
pub use link::{build_link, sanitize_label, sanitize_with, ILLEGAL_PATH_CHARS};
pub use parser::parse_bindings;
pub use query::QueryBuilder;
pub use search::EntitySearch;
pub use types::{Cell, Extraction, ResultRow};
