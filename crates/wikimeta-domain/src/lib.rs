//! wikimeta Domain Layer
//!
//! This crate contains the value objects and trait interfaces shared by every
//! other wikimeta crate. It performs no I/O of its own.
//!
//! ## Key Concepts
//!
//! - **Entity**: a node of the knowledge graph, identified by `Q<digits>`
//! - **Property Value**: text, integer, decimal, date or cross-reference
//! - **Property Mapping**: property name → ordered, non-empty list of values
//! - **Metadata**: the string-keyed field block of a host document
//!
//! ## Architecture
//!
//! - Pure data types and conversions only
//! - Network access lives in `wikimeta-client`
//! - Document storage is reached through [`traits::MetadataStore`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod traits;
pub mod value;
pub mod wire;

// Re-exports for convenience
pub use entity::{Entity, EntityError, EntityId, EntityIdError};
pub use traits::{DocumentRef, KnowledgeGraph, MetadataStore};
pub use value::{Metadata, PropertyMapping, PropertyValue};
pub use wire::{Binding, BindingCell, SearchHit};
