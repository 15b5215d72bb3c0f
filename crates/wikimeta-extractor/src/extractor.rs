//! Core property extraction

use crate::classifier::{classify, parse_decimal, parse_integer, ValueKind};
use crate::config::QueryOptions;
use crate::error::ExtractorError;
use crate::link::build_link;
use crate::parser::parse_bindings;
use crate::query::QueryBuilder;
use crate::types::{Extraction, ResultRow};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, trace};
use wikimeta_domain::{EntityId, KnowledgeGraph, PropertyMapping, PropertyValue};

/// Label prefix of category pages
pub const CATEGORY_PREFIX: &str = "Category:";

/// Label prefix of project meta pages
pub const WIKIPEDIA_PREFIX: &str = "Wikipedia:";

/// Whole-word `ID` in a property name
static ID_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bID\b").expect("ID word pattern is valid"));

/// Runs of characters outside Unicode general category L
static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\P{L}+").expect("non-letter pattern is valid"));

/// Fetches and normalizes the properties of one entity
pub struct PropertyExtractor<G>
where
    G: KnowledgeGraph,
{
    graph: Arc<G>,
}

impl<G> PropertyExtractor<G>
where
    G: KnowledgeGraph,
{
    /// Create a new extractor over a knowledge graph
    pub fn new(graph: G) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Create an extractor sharing an existing graph handle
    pub fn from_shared(graph: Arc<G>) -> Self {
        Self { graph }
    }

    /// Fetch the property mapping of an entity
    pub async fn extract(
        &self,
        entity_id: &str,
        options: &QueryOptions,
    ) -> Result<PropertyMapping, ExtractorError> {
        self.extract_detailed(entity_id, options)
            .await
            .map(|extraction| extraction.properties)
    }

    /// Fetch the property mapping of an entity together with its description
    /// and row statistics
    ///
    /// The identifier and options are validated before any request is made.
    /// Any endpoint failure aborts the whole extraction.
    pub async fn extract_detailed(
        &self,
        entity_id: &str,
        options: &QueryOptions,
    ) -> Result<Extraction, ExtractorError> {
        options.validate().map_err(ExtractorError::Config)?;
        let id = EntityId::parse(entity_id)?;

        let query = QueryBuilder::new(id.clone(), options.languages())
            .excluding_time_ranges(options.ignore_properties_with_time_ranges)
            .build();

        debug!("Property query for {}: {} chars", id, query.len());

        let bindings = self
            .graph
            .select(&query)
            .await
            .map_err(|e| ExtractorError::Query {
                entity: id.to_string(),
                message: e.to_string(),
            })?;

        let rows = parse_bindings(bindings)?;
        let extraction = process_rows(&rows, options);

        info!(
            "Extracted {} properties for {} ({} rows, {} dropped)",
            extraction.properties.len(),
            id,
            extraction.rows_total,
            extraction.rows_dropped
        );

        Ok(extraction)
    }
}

/// Apply filtering, renaming and value resolution to every row
pub fn process_rows(rows: &[ResultRow], options: &QueryOptions) -> Extraction {
    let mut extraction = Extraction {
        rows_total: rows.len(),
        ..Extraction::default()
    };

    for row in rows {
        if extraction.description.is_none() {
            extraction.description = row.description.as_deref().map(str::to_string);
        }

        if is_filtered(row, options) {
            trace!("Dropping filtered row '{}'", row.property_label);
            extraction.rows_dropped += 1;
            continue;
        }

        let Some(value) = resolve_value(row, options) else {
            trace!("Dropping row '{}' without a value", row.property_label);
            extraction.rows_dropped += 1;
            continue;
        };

        let name = rename_property(&row.property_label, &options.space_replacement);
        extraction.properties.push(name, value);
    }

    extraction
}

/// Whether a row is removed by the configured filters
///
/// The ID check runs against the property name before any renaming.
fn is_filtered(row: &ResultRow, options: &QueryOptions) -> bool {
    let label = row.value_label.as_deref();

    if options.ignore_categories && label.is_some_and(|l| l.starts_with(CATEGORY_PREFIX)) {
        return true;
    }
    if options.ignore_wikipedia_pages && label.is_some_and(|l| l.starts_with(WIKIPEDIA_PREFIX)) {
        return true;
    }
    options.ignore_ids && ID_WORD.is_match(&row.property_label)
}

/// Resolve a row's value; `None` drops the row
fn resolve_value(row: &ResultRow, options: &QueryOptions) -> Option<PropertyValue> {
    match classify(row) {
        ValueKind::Normalized(value) => Some(PropertyValue::Text(value)),
        ValueKind::Date => Some(PropertyValue::Date(row.value.clone())),
        ValueKind::Decimal => Some(parse_decimal(&row.value)),
        ValueKind::Integer => Some(parse_integer(&row.value)),
        ValueKind::String => Some(PropertyValue::Text(row.value.clone())),
        ValueKind::Reference { digits, label } => Some(PropertyValue::reference(&build_link(
            &options.internal_link_prefix,
            &label,
            &digits,
        ))),
        ValueKind::Label(label) => label.map(PropertyValue::Text),
    }
}

/// Replace every maximal run of non-letter characters with `replacement`
///
/// An empty replacement leaves the name unchanged.
///
/// # Examples
///
/// ```
/// use wikimeta_extractor::rename_property;
///
/// assert_eq!(rename_property("date of birth", "_"), "date_of_birth");
/// assert_eq!(rename_property("ISNI ID (2)", "-"), "ISNI-ID-");
/// ```
pub fn rename_property(name: &str, replacement: &str) -> String {
    if replacement.is_empty() {
        return name.to_string();
    }

    NON_LETTERS
        .replace_all(name, regex::NoExpand(replacement))
        .into_owned()
}
