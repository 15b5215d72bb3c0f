//! Wikimeta Importer
//!
//! Merges fetched entity properties into the metadata block of a document.
//!
//! The Importer provides:
//! - Merge policy (overwrite flag, allow list, block list, entity id key)
//! - Import of a known entity into a document
//! - Re-import of the entity a document already records
//! - Search-then-import into a document named by a path template
//!
//! # Examples
//!
//! ```no_run
//! use wikimeta_client::WikidataClient;
//! use wikimeta_extractor::QueryOptions;
//! use wikimeta_importer::{Importer, MemoryStore, MergeConfig};
//! use wikimeta_domain::MetadataStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WikidataClient::default_endpoints()?;
//! let store = MemoryStore::new();
//! let importer = Importer::new(client, store, QueryOptions::default(), MergeConfig::default())?;
//!
//! let doc = importer.store().resolve_document("db/Douglas Adams.md").await?;
//! let report = importer.import_entity(&doc, "Q42").await?;
//! println!("{} properties written", report.written.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod importer;
mod memory;
mod policy;

#[cfg(test)]
mod tests;

pub use config::{MergeConfig, DEFAULT_ENTITY_ID_KEY};
pub use error::ImportError;
pub use importer::{ImportReport, Importer};
pub use memory::{MemoryStore, MemoryStoreError};
pub use policy::{MergeOutcome, MergePolicy, SkipReason};
