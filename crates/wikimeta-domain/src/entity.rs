//! Entity module - knowledge graph nodes and their identifiers

use crate::wire::SearchHit;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing an [`EntityId`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityIdError {
    /// The identifier was empty or whitespace only
    #[error("Entity identifier is empty")]
    Empty,

    /// The identifier does not have the `Q<digits>` shape
    #[error("Invalid entity identifier '{0}': expected Q followed by digits")]
    InvalidFormat(String),
}

/// Errors raised when building an [`Entity`] from a search payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// A required field was absent from the payload
    #[error("Search result is missing required field '{0}'")]
    MissingField(&'static str),

    /// The payload carried an identifier that does not parse
    #[error(transparent)]
    InvalidId(#[from] EntityIdError),
}

/// Identifier of a knowledge graph item, e.g. `Q42`
///
/// Only surface syntax is checked: the identifier is not guaranteed to
/// exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(String);

impl EntityId {
    /// Parse an identifier, trimming surrounding whitespace
    ///
    /// # Examples
    ///
    /// ```
    /// use wikimeta_domain::EntityId;
    ///
    /// let id = EntityId::parse(" Q42 ").unwrap();
    /// assert_eq!(id.as_str(), "Q42");
    /// assert!(EntityId::parse("42").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, EntityIdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EntityIdError::Empty);
        }

        let digits = trimmed
            .strip_prefix('Q')
            .ok_or_else(|| EntityIdError::InvalidFormat(trimmed.to_string()))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(EntityIdError::InvalidFormat(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digit run following the `Q` prefix
    pub fn numeric(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A knowledge graph entity (person, place, concept, ...)
///
/// Identity is the identifier alone; label and description are display data.
/// Entities are immutable once built. [`Entity::with_details`] returns a new
/// value rather than mutating.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    label: Option<String>,
    description: Option<String>,
}

impl Entity {
    /// Build an entity from a bare identifier; label and description unknown
    pub fn from_id(id: EntityId) -> Self {
        Self {
            id,
            label: None,
            description: None,
        }
    }

    /// Parse an identifier and build an entity from it
    pub fn parse(id: &str) -> Result<Self, EntityIdError> {
        EntityId::parse(id).map(Self::from_id)
    }

    /// Copy of this entity carrying the given display data
    pub fn with_details(&self, label: Option<String>, description: Option<String>) -> Self {
        Self {
            id: self.id.clone(),
            label,
            description,
        }
    }

    /// The entity identifier
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The display label, if known
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The description, if known
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl TryFrom<SearchHit> for Entity {
    type Error = EntityError;

    fn try_from(hit: SearchHit) -> Result<Self, Self::Error> {
        let id = hit.id.ok_or(EntityError::MissingField("id"))?;
        let label = hit.label.ok_or(EntityError::MissingField("label"))?;

        Ok(Self {
            id: EntityId::parse(&id)?,
            label: Some(label),
            description: hit.description,
        })
    }
}
