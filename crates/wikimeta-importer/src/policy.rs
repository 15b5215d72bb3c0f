//! Merge of fetched properties into existing metadata

use crate::MergeConfig;
use serde_json::Value;
use wikimeta_domain::{EntityId, Metadata, PropertyMapping, PropertyValue};

/// Result of merging one property mapping
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The merged metadata block
    pub metadata: Metadata,

    /// Properties written to the block, in key order
    pub written: Vec<String>,

    /// Properties left out, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

/// Why a fetched property was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A non-empty allow list does not name it
    NotAllowed,

    /// The block list names it
    Blocked,

    /// The key already exists and overwriting is off
    Exists,
}

/// Decides which fetched properties reach the metadata block
pub struct MergePolicy {
    config: MergeConfig,
}

impl MergePolicy {
    /// Create a new policy with the given configuration
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// Create a policy with default configuration
    pub fn default_config() -> Self {
        Self::new(MergeConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge `mapping` into `existing` and return the new metadata
    ///
    /// # Examples
    ///
    /// ```
    /// use wikimeta_domain::{EntityId, Metadata, PropertyMapping, PropertyValue};
    /// use wikimeta_importer::MergePolicy;
    ///
    /// let mut mapping = PropertyMapping::new();
    /// mapping.push("instance of", PropertyValue::reference("db/human"));
    ///
    /// let id = EntityId::parse("Q42").unwrap();
    /// let merged = MergePolicy::default_config().apply(&mapping, &id, Metadata::new());
    ///
    /// assert_eq!(merged["instance of"], "[[db/human]]");
    /// assert_eq!(merged["wikidata entity id"], "Q42");
    /// ```
    pub fn apply(&self, mapping: &PropertyMapping, id: &EntityId, existing: Metadata) -> Metadata {
        self.merge(mapping, id, existing).metadata
    }

    /// Merge `mapping` into `existing`, reporting the fate of every property
    ///
    /// Keys of `existing` not named in `mapping` are never touched. The
    /// entity id key is always set, whatever the lists and overwrite flag say.
    pub fn merge(&self, mapping: &PropertyMapping, id: &EntityId, existing: Metadata) -> MergeOutcome {
        let mut metadata = existing;
        let mut written = Vec::new();
        let mut skipped = Vec::new();

        for (key, values) in mapping.iter() {
            if let Some(reason) = self.check(key, &metadata) {
                skipped.push((key.to_string(), reason));
                continue;
            }
            metadata.insert(key.to_string(), collapse(values));
            written.push(key.to_string());
        }

        metadata.insert(
            self.config.entity_id_key.clone(),
            Value::String(id.to_string()),
        );

        MergeOutcome {
            metadata,
            written,
            skipped,
        }
    }

    /// Why `key` must not be written, if it must not
    fn check(&self, key: &str, metadata: &Metadata) -> Option<SkipReason> {
        // Both lists are checked independently; a key on both is blocked
        if self.config.block_list.iter().any(|k| k == key) {
            return Some(SkipReason::Blocked);
        }
        if !self.config.allow_list.is_empty() && !self.config.allow_list.iter().any(|k| k == key) {
            return Some(SkipReason::NotAllowed);
        }
        if !self.config.overwrite && metadata.contains_key(key) {
            return Some(SkipReason::Exists);
        }
        None
    }
}

/// Single values are stored as scalars, several as a list
fn collapse(values: &[PropertyValue]) -> Value {
    match values {
        [single] => single.to_json(),
        many => Value::Array(many.iter().map(PropertyValue::to_json).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn q42() -> EntityId {
        EntityId::parse("Q42").unwrap()
    }

    fn mapping() -> PropertyMapping {
        let mut mapping = PropertyMapping::new();
        mapping.push("instance of", PropertyValue::reference("db/human"));
        mapping.push("occupation", PropertyValue::reference("db/writer"));
        mapping.push("occupation", PropertyValue::reference("db/novelist"));
        mapping.push("number of children", PropertyValue::Integer(2));
        mapping
    }

    fn metadata(value: Value) -> Metadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_merge_into_empty() {
        let merged = MergePolicy::default_config().apply(&mapping(), &q42(), Metadata::new());

        assert_eq!(
            Value::Object(merged.into_iter().collect()),
            json!({
                "instance of": "[[db/human]]",
                "occupation": ["[[db/writer]]", "[[db/novelist]]"],
                "number of children": 2,
                "wikidata entity id": "Q42",
            })
        );
    }

    #[test]
    fn test_existing_values_kept_without_overwrite() {
        let existing = metadata(json!({ "occupation": "astronaut", "tags": ["book"] }));
        let outcome = MergePolicy::default_config().merge(&mapping(), &q42(), existing);

        assert_eq!(outcome.metadata["occupation"], "astronaut");
        assert_eq!(outcome.metadata["tags"], json!(["book"]));
        assert!(outcome
            .skipped
            .contains(&("occupation".to_string(), SkipReason::Exists)));
    }

    #[test]
    fn test_overwrite_replaces_values() {
        let existing = metadata(json!({ "occupation": "astronaut", "tags": ["book"] }));
        let merged = MergePolicy::new(MergeConfig::overwriting()).apply(&mapping(), &q42(), existing);

        assert_eq!(merged["occupation"], json!(["[[db/writer]]", "[[db/novelist]]"]));
        assert_eq!(merged["tags"], json!(["book"]));
    }

    #[test]
    fn test_allow_list() {
        let policy = MergePolicy::new(MergeConfig {
            allow_list: vec!["occupation".to_string()],
            ..MergeConfig::default()
        });
        let outcome = policy.merge(&mapping(), &q42(), Metadata::new());

        assert_eq!(outcome.written, vec!["occupation".to_string()]);
        assert!(!outcome.metadata.contains_key("instance of"));
        assert!(outcome.metadata.contains_key("wikidata entity id"));
    }

    #[test]
    fn test_block_list_wins_over_allow_list() {
        let policy = MergePolicy::new(MergeConfig {
            allow_list: vec!["occupation".to_string(), "instance of".to_string()],
            block_list: vec!["occupation".to_string()],
            ..MergeConfig::default()
        });
        let outcome = policy.merge(&mapping(), &q42(), Metadata::new());

        assert_eq!(outcome.written, vec!["instance of".to_string()]);
        assert!(outcome
            .skipped
            .contains(&("occupation".to_string(), SkipReason::Blocked)));
        assert!(outcome
            .skipped
            .contains(&("number of children".to_string(), SkipReason::NotAllowed)));
    }

    #[test]
    fn test_id_key_always_set() {
        let policy = MergePolicy::new(MergeConfig {
            allow_list: vec!["nothing".to_string()],
            entity_id_key: "wikidata".to_string(),
            ..MergeConfig::default()
        });
        let existing = metadata(json!({ "wikidata": "Q1" }));
        let merged = policy.apply(&PropertyMapping::new(), &q42(), existing);

        assert_eq!(merged["wikidata"], "Q42");
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_nan_decimal_is_text() {
        let mut mapping = PropertyMapping::new();
        mapping.push("mass", PropertyValue::Decimal(f64::NAN));
        let merged = MergePolicy::default_config().apply(&mapping, &q42(), Metadata::new());

        assert_eq!(merged["mass"], "NaN");
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent_without_overwrite(
            keys in proptest::collection::vec("[a-z ]{1,12}", 0..8),
            existing_keys in proptest::collection::vec("[a-z ]{1,12}", 0..8),
        ) {
            let mut mapping = PropertyMapping::new();
            for (i, key) in keys.iter().enumerate() {
                mapping.push(key.clone(), PropertyValue::Integer(i as i64));
            }
            let existing: Metadata = existing_keys
                .iter()
                .map(|k| (k.clone(), json!("kept")))
                .collect();

            let policy = MergePolicy::default_config();
            let once = policy.apply(&mapping, &q42(), existing);
            let twice = policy.apply(&mapping, &q42(), once.clone());

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_unrelated_keys_untouched(
            keys in proptest::collection::vec("[a-z]{1,8}", 0..8),
            overwrite in any::<bool>(),
        ) {
            let mut mapping = PropertyMapping::new();
            for key in &keys {
                mapping.push(key.clone(), PropertyValue::Text("v".to_string()));
            }
            let existing = metadata(json!({ "Unrelated": "keep me" }));

            let policy = MergePolicy::new(MergeConfig { overwrite, ..MergeConfig::default() });
            let merged = policy.apply(&mapping, &q42(), existing);

            prop_assert_eq!(&merged["Unrelated"], &json!("keep me"));
        }
    }
}
