//! SPARQL query construction for property extraction
//!
//! The query has one fixed shape. Only the entity identifier, the language
//! list and the optional time-range exclusion vary.

use wikimeta_domain::EntityId;

/// Qualifier: start time
pub const QUALIFIER_START_TIME: &str = "P580";

/// Qualifier: end time
pub const QUALIFIER_END_TIME: &str = "P582";

/// Qualifier: point in time
pub const QUALIFIER_POINT_IN_TIME: &str = "P585";

/// Builds the property query for one entity
pub struct QueryBuilder {
    entity: EntityId,
    languages: Vec<String>,
    exclude_time_ranges: bool,
}

impl QueryBuilder {
    /// Create a new query builder
    ///
    /// `languages` must already be validated; the first one selects the
    /// entity description.
    pub fn new(entity: EntityId, languages: Vec<String>) -> Self {
        Self {
            entity,
            languages,
            exclude_time_ranges: false,
        }
    }

    /// Exclude statements carrying time-range qualifiers
    pub fn excluding_time_ranges(mut self, exclude: bool) -> Self {
        self.exclude_time_ranges = exclude;
        self
    }

    /// The clause excluding time-qualified statements
    pub fn time_range_clause() -> String {
        [QUALIFIER_START_TIME, QUALIFIER_END_TIME, QUALIFIER_POINT_IN_TIME]
            .iter()
            .map(|qualifier| format!("  FILTER NOT EXISTS {{ ?statement pq:{} ?q{} . }}\n", qualifier, qualifier))
            .collect()
    }

    /// Build the complete query
    pub fn build(&self) -> String {
        let id = self.entity.as_str();
        let label_languages = self.languages.join(",");
        let description_language = self
            .languages
            .first()
            .map(String::as_str)
            .unwrap_or("en");

        let mut query = String::new();

        query.push_str("SELECT ?propertyLabel ?value ?valueLabel ?valueType ?normalizedValue ?description WHERE {\n");

        // 1. Every statement of the entity, with its main value
        query.push_str(&format!("  wd:{} ?claim ?statement .\n", id));
        query.push_str("  ?statement ?ps ?value .\n");
        query.push_str("  ?property wikibase:claim ?claim ;\n");
        query.push_str("            wikibase:statementProperty ?ps .\n");

        // 2. Quantity normalized to SI units, when the graph has one
        query.push_str("  OPTIONAL {\n");
        query.push_str("    ?property wikibase:statementValueNormalized ?psn .\n");
        query.push_str("    ?statement ?psn ?normalizedNode .\n");
        query.push_str("    ?normalizedNode wikibase:quantityAmount ?normalizedValue .\n");
        query.push_str("  }\n");

        // 3. Entity description in the preferred language
        query.push_str("  OPTIONAL {\n");
        query.push_str(&format!("    wd:{} schema:description ?description .\n", id));
        query.push_str(&format!("    FILTER(LANG(?description) = \"{}\")\n", description_language));
        query.push_str("  }\n");

        query.push_str("  BIND(DATATYPE(?value) AS ?valueType)\n");

        // 4. Optional exclusion of time-qualified statements
        if self.exclude_time_ranges {
            query.push_str(&Self::time_range_clause());
        }

        // 5. Labels: first available language wins
        query.push_str(&format!(
            "  SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{}\" . }}\n",
            label_languages
        ));
        query.push_str("}\n");

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(langs: &[&str]) -> QueryBuilder {
        QueryBuilder::new(
            EntityId::parse("Q42").unwrap(),
            langs.iter().map(|l| l.to_string()).collect(),
        )
    }

    #[test]
    fn test_query_mentions_entity_and_columns() {
        let query = builder(&["en"]).build();
        assert!(query.contains("wd:Q42 ?claim ?statement"));
        for column in ["?propertyLabel", "?value", "?valueLabel", "?valueType", "?normalizedValue", "?description"] {
            assert!(query.contains(column), "missing {}", column);
        }
    }

    #[test]
    fn test_query_languages() {
        let query = builder(&["fr", "en"]).build();
        assert!(query.contains("wikibase:language \"fr,en\""));
        assert!(query.contains("LANG(?description) = \"fr\""));
    }

    #[test]
    fn test_time_range_clause_toggle() {
        let without = builder(&["en"]).build();
        assert!(!without.contains("FILTER NOT EXISTS"));

        let with = builder(&["en"]).excluding_time_ranges(true).build();
        assert!(with.contains("FILTER NOT EXISTS { ?statement pq:P580"));
        assert!(with.contains("FILTER NOT EXISTS { ?statement pq:P582"));
        assert!(with.contains("FILTER NOT EXISTS { ?statement pq:P585"));
    }

    #[test]
    fn test_query_shape_is_deterministic() {
        assert_eq!(builder(&["en"]).build(), builder(&["en"]).build());
    }
}
