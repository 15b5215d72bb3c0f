//! Integration tests for the Importer

#[cfg(test)]
mod tests {
    use crate::{ImportError, Importer, MemoryStore, MergeConfig, SkipReason};
    use serde_json::json;
    use wikimeta_client::MockGraph;
    use wikimeta_domain::{Binding, BindingCell, DocumentRef, Metadata, SearchHit};
    use wikimeta_extractor::{ExtractorError, QueryOptions};

    fn reference(property: &str, qid: &str, label: &str) -> Binding {
        [
            ("propertyLabel", property.to_string()),
            ("value", format!("http://www.wikidata.org/entity/{}", qid)),
            ("valueLabel", label.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), BindingCell::new(v)))
        .collect()
    }

    fn graph() -> MockGraph {
        let graph = MockGraph::default();
        graph.set_rows(vec![
            reference("instance of", "Q5", "human"),
            reference("occupation", "Q36180", "writer"),
            reference("occupation", "Q6625963", "novelist"),
        ]);
        graph
    }

    fn metadata(value: serde_json::Value) -> Metadata {
        serde_json::from_value(value).unwrap()
    }

    fn importer(graph: MockGraph, store: MemoryStore, merge: MergeConfig) -> Importer<MockGraph, MemoryStore> {
        Importer::new(graph, store, QueryOptions::default(), merge).unwrap()
    }

    #[tokio::test]
    async fn test_import_entity() {
        let store = MemoryStore::new();
        let doc = store.insert("people/adams.md", metadata(json!({ "tags": ["author"] })));
        let importer = importer(graph(), store.clone(), MergeConfig::default());

        let report = importer.import_entity(&doc, "Q42").await.unwrap();
        assert_eq!(report.entity.as_str(), "Q42");
        assert_eq!(report.written, vec!["instance of".to_string(), "occupation".to_string()]);

        let stored = store.get("people/adams.md").unwrap();
        assert_eq!(
            serde_json::to_value(&stored).unwrap(),
            json!({
                "tags": ["author"],
                "instance of": "[[db/human]]",
                "occupation": ["[[db/writer]]", "[[db/novelist]]"],
                "wikidata entity id": "Q42",
            })
        );
    }

    #[tokio::test]
    async fn test_import_is_idempotent_without_overwrite() {
        let store = MemoryStore::new();
        let doc = store.insert("a.md", Metadata::new());
        let importer = importer(graph(), store.clone(), MergeConfig::default());

        importer.import_entity(&doc, "Q42").await.unwrap();
        let first = store.get("a.md").unwrap();

        let report = importer.import_entity(&doc, "Q42").await.unwrap();
        assert!(report.written.is_empty());
        assert!(report.skipped.iter().all(|(_, reason)| *reason == SkipReason::Exists));
        assert_eq!(store.get("a.md").unwrap(), first);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_existing() {
        let store = MemoryStore::new();
        let doc = store.insert("a.md", metadata(json!({ "instance of": "[[db/robot]]" })));
        let importer = importer(graph(), store.clone(), MergeConfig::overwriting());

        importer.import_entity(&doc, "Q42").await.unwrap();
        assert_eq!(store.get("a.md").unwrap()["instance of"], "[[db/human]]");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_document_untouched() {
        let graph = graph();
        graph.set_select_error();
        let store = MemoryStore::new();
        let doc = store.insert("a.md", metadata(json!({ "title": "Adams" })));
        let importer = importer(graph, store.clone(), MergeConfig::default());

        let err = importer.import_entity(&doc, "Q42").await.unwrap_err();
        assert!(matches!(err, ImportError::Extraction(ExtractorError::Query { .. })));
        assert!(err.to_string().contains("Q42"));
        assert_eq!(store.get("a.md").unwrap(), metadata(json!({ "title": "Adams" })));
    }

    #[tokio::test]
    async fn test_invalid_id_makes_no_request() {
        let graph = graph();
        let store = MemoryStore::new();
        let doc = store.insert("a.md", Metadata::new());
        let importer = importer(graph.clone(), store, MergeConfig::default());

        let result = importer.import_entity(&doc, "Douglas Adams").await;
        assert!(matches!(result, Err(ImportError::InvalidEntityId(_))));
        assert_eq!(graph.call_count(), 0);
    }

    #[tokio::test]
    async fn test_import_from_document() {
        let store = MemoryStore::new();
        let doc = store.insert("a.md", metadata(json!({ "wikidata entity id": "Q42" })));
        let importer = importer(graph(), store.clone(), MergeConfig::default());

        let report = importer.import_from_document(&doc).await.unwrap();
        assert_eq!(report.entity.as_str(), "Q42");
        assert!(store.get("a.md").unwrap().contains_key("occupation"));
    }

    #[tokio::test]
    async fn test_import_from_document_without_id() {
        let graph = graph();
        let store = MemoryStore::new();
        let doc = store.insert("a.md", metadata(json!({ "title": "Adams" })));
        let number = store.insert("b.md", metadata(json!({ "wikidata entity id": 42 })));
        let malformed = store.insert("c.md", metadata(json!({ "wikidata entity id": "42" })));
        let importer = importer(graph.clone(), store, MergeConfig::default());

        assert!(matches!(
            importer.import_from_document(&doc).await,
            Err(ImportError::MissingEntityId { .. })
        ));
        assert!(matches!(
            importer.import_from_document(&number).await,
            Err(ImportError::MissingEntityId { .. })
        ));
        assert!(matches!(
            importer.import_from_document(&malformed).await,
            Err(ImportError::InvalidEntityId(_))
        ));
        assert_eq!(graph.call_count(), 0);
    }

    #[tokio::test]
    async fn test_import_from_unknown_document() {
        let importer = importer(graph(), MemoryStore::new(), MergeConfig::default());
        let result = importer.import_from_document(&DocumentRef::new("nowhere.md")).await;
        assert!(matches!(result, Err(ImportError::Store(_))));
    }

    #[tokio::test]
    async fn test_import_search_result() {
        let graph = graph();
        graph.add_search_results(
            "en",
            vec![
                SearchHit {
                    id: Some("Q42".to_string()),
                    label: Some("Douglas Adams".to_string()),
                    description: Some("English writer".to_string()),
                },
                SearchHit {
                    id: Some("Q21454969".to_string()),
                    label: Some("Douglas Adams".to_string()),
                    description: Some("British physician".to_string()),
                },
            ],
        );
        let store = MemoryStore::new();
        let importer = importer(graph, store.clone(), MergeConfig::default());

        let report = importer
            .import_search_result("Douglas Adams", "people/${label} (${id}).md")
            .await
            .unwrap();

        assert_eq!(report.document.path(), "people/Douglas Adams (42).md");
        assert_eq!(store.paths(), vec!["people/Douglas Adams (42).md".to_string()]);
        assert_eq!(
            store.get("people/Douglas Adams (42).md").unwrap()["wikidata entity id"],
            "Q42"
        );
    }

    #[tokio::test]
    async fn test_import_search_without_candidates() {
        let store = MemoryStore::new();
        let importer = importer(graph(), store.clone(), MergeConfig::default());

        let result = importer.import_search_result("zzzz", "db/${label}.md").await;
        assert!(matches!(result, Err(ImportError::NoMatch(_))));
        assert!(store.paths().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let merge = MergeConfig {
            entity_id_key: String::new(),
            ..MergeConfig::default()
        };
        let result = Importer::new(MockGraph::default(), MemoryStore::new(), QueryOptions::default(), merge);
        assert!(matches!(result, Err(ImportError::Config(_))));
    }
}
