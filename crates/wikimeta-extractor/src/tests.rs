//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{EntitySearch, PropertyExtractor, QueryOptions};
    use serde_json::json;
    use wikimeta_client::MockGraph;
    use wikimeta_domain::{Binding, BindingCell, PropertyValue, SearchHit};

    const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    const ENTITY: &str = "http://www.wikidata.org/entity/";

    fn row(cells: &[(&str, &str)]) -> Binding {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), BindingCell::new(*v)))
            .collect()
    }

    fn reference(property: &str, qid: &str, label: &str) -> Binding {
        let value = format!("{}{}", ENTITY, qid);
        row(&[("propertyLabel", property), ("value", &value), ("valueLabel", label)])
    }

    fn typed(property: &str, value: &str, datatype: &str) -> Binding {
        let tag = format!("{}{}", XSD, datatype);
        row(&[("propertyLabel", property), ("value", value), ("valueType", &tag)])
    }

    fn douglas_adams_rows() -> Vec<Binding> {
        let mut first = reference("instance of", "Q5", "human");
        first.insert("description".to_string(), BindingCell::new("English writer and humorist"));

        vec![
            first,
            reference("occupation", "Q36180", "writer"),
            reference("occupation", "Q28389", "screenwriter"),
            typed("date of birth", "1952-03-11T00:00:00Z", "dateTime"),
            typed("number of children", "2", "integer"),
            typed("VIAF ID", "113230702", "string"),
            reference("topic's main category", "Q8935487", "Category:Douglas Adams"),
        ]
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let graph = MockGraph::default();
        graph.set_rows(vec![reference("instance of", "Q5", "human")]);

        let extractor = PropertyExtractor::new(graph);
        let mapping = extractor.extract("Q42", &QueryOptions::default()).await.unwrap();

        assert_eq!(
            serde_json::to_value(&mapping).unwrap(),
            json!({ "instance of": ["[[db/human]]"] })
        );
    }

    #[tokio::test]
    async fn test_realistic_entity() {
        let graph = MockGraph::default();
        graph.set_rows(douglas_adams_rows());

        let extractor = PropertyExtractor::new(graph);
        let extraction = extractor
            .extract_detailed("Q42", &QueryOptions::default())
            .await
            .unwrap();

        assert_eq!(extraction.description.as_deref(), Some("English writer and humorist"));
        assert_eq!(extraction.rows_total, 7);
        assert_eq!(extraction.rows_dropped, 1);

        assert_eq!(
            serde_json::to_value(&extraction.properties).unwrap(),
            json!({
                "instance of": ["[[db/human]]"],
                "occupation": ["[[db/writer]]", "[[db/screenwriter]]"],
                "date of birth": ["1952-03-11T00:00:00Z"],
                "number of children": [2],
                "VIAF ID": ["113230702"],
            })
        );
    }

    #[tokio::test]
    async fn test_strict_options_with_renaming() {
        let graph = MockGraph::default();
        graph.set_rows(douglas_adams_rows());

        let options = QueryOptions {
            space_replacement: "_".to_string(),
            internal_link_prefix: "people/${label}-${id}".to_string(),
            ..QueryOptions::strict()
        };
        let extractor = PropertyExtractor::new(graph.clone());
        let mapping = extractor.extract("Q42", &options).await.unwrap();

        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["date_of_birth", "instance_of", "number_of_children", "occupation"]);
        assert_eq!(
            mapping.get("instance_of").unwrap(),
            &[PropertyValue::Reference("[[people/human-5]]".to_string())]
        );

        let query = &graph.queries()[0];
        assert!(query.contains("FILTER NOT EXISTS { ?statement pq:P580"));
    }

    #[tokio::test]
    async fn test_every_key_is_non_empty() {
        let graph = MockGraph::default();
        graph.set_rows(douglas_adams_rows());

        let extractor = PropertyExtractor::new(graph);
        let mapping = extractor.extract("Q42", &QueryOptions::default()).await.unwrap();

        for (_, values) in mapping.iter() {
            assert!(!values.is_empty());
        }
    }

    #[tokio::test]
    async fn test_extraction_is_deterministic() {
        let graph = MockGraph::default();
        graph.set_rows(douglas_adams_rows());

        let extractor = PropertyExtractor::new(graph);
        let first = extractor.extract("Q42", &QueryOptions::default()).await.unwrap();
        let second = extractor.extract("Q42", &QueryOptions::default()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_search_then_extract() {
        let graph = MockGraph::default();
        graph.add_search_results(
            "en",
            vec![SearchHit {
                id: Some("Q42".to_string()),
                label: Some("Douglas Adams".to_string()),
                description: Some("English writer".to_string()),
            }],
        );
        graph.add_search_results(
            "fr",
            vec![SearchHit {
                id: Some("Q42".to_string()),
                label: Some("Douglas Adams".to_string()),
                description: Some("écrivain anglais".to_string()),
            }],
        );
        graph.set_rows(vec![reference("instance of", "Q5", "human")]);

        let options = QueryOptions {
            language: "en,fr".to_string(),
            ..QueryOptions::default()
        };

        let search = EntitySearch::new(graph.clone());
        let candidates = search.search("Douglas Adams", &options).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].description(), Some("English writer"));

        let extractor = PropertyExtractor::new(graph.clone());
        let mapping = extractor
            .extract(candidates[0].id().as_str(), &options)
            .await
            .unwrap();
        assert!(mapping.contains_key("instance of"));

        assert!(graph.queries()[0].contains("wikibase:language \"en,fr\""));
    }
}
