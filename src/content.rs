use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;

use crate::record::Value;

/// Field names that never carry user-entered content: identifiers,
/// timestamps, derived values and fixed enumerations.
pub const DEFAULT_SKIP_FIELDS: [&str; 14] = [
    "id",
    "projectId",
    "createdAt",
    "updatedAt",
    "startDate",
    "endDate",
    "date",
    "predecessorId",
    "level",
    "category",
    "likelihood",
    "impact",
    "type",
    "dependencies",
];

static DEFAULT_SKIP_SET: Lazy<HashSet<String>> = Lazy::new(|| {
    DEFAULT_SKIP_FIELDS
        .iter()
        .map(|field| field.to_string())
        .collect()
});

/// True for a string that is not blank after trimming.
pub fn is_real_text(value: &Value) -> bool {
    matches!(value, Value::String(text) if !text.trim().is_empty())
}

/// Decides whether an arbitrarily shaped value holds real content.
#[derive(Debug, Clone)]
pub struct ContentDetector {
    skip: HashSet<String>,
}

impl Default for ContentDetector {
    fn default() -> Self {
        Self {
            skip: (*DEFAULT_SKIP_SET).clone(),
        }
    }
}

impl ContentDetector {
    pub fn with_skip_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_skipped(&self, field: &str) -> bool {
        self.skip.contains(field)
    }

    pub fn has_content(&self, value: &Value) -> bool {
        match value {
            Value::String(_) => is_real_text(value),
            Value::Sequence(items) => self.sequence_has_content(items),
            Value::Mapping(map) => self.mapping_has_content(map),
            Value::Null | Value::Bool(_) | Value::Number(_) => false,
        }
    }

    fn sequence_has_content(&self, items: &[Value]) -> bool {
        items.iter().any(|item| match item {
            Value::String(_) => is_real_text(item),
            Value::Mapping(map) => self.mapping_has_content(map),
            _ => false,
        })
    }

    fn mapping_has_content(&self, map: &BTreeMap<String, Value>) -> bool {
        map.iter()
            .filter(|(key, _)| !self.is_skipped(key))
            .any(|(_, value)| match value {
                Value::String(_) => is_real_text(value),
                Value::Sequence(items) => self.sequence_has_content(items),
                Value::Mapping(inner) => self.mapping_has_content(inner),
                Value::Null | Value::Bool(_) | Value::Number(_) => false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detect(value: serde_json::Value) -> bool {
        ContentDetector::default().has_content(&Value::from(value))
    }

    #[test]
    fn strings_need_non_blank_text() {
        assert!(detect(json!("hello")));
        assert!(!detect(json!("   \n\t")));
        assert!(!detect(json!("")));
    }

    #[test]
    fn scalars_are_not_content() {
        assert!(!detect(json!(42)));
        assert!(!detect(json!(true)));
        assert!(!detect(json!(null)));
    }

    #[test]
    fn sequences_look_at_strings_and_mappings_only() {
        assert!(!detect(json!([])));
        assert!(!detect(json!([" ", 3, [["nested"]]])));
        assert!(detect(json!(["", "x"])));
        assert!(detect(json!([{}, {"title": "Goal"}])));
    }

    #[test]
    fn skip_set_applies_at_every_depth() {
        assert!(!detect(json!({"id": "abc", "category": "technical"})));
        assert!(!detect(json!({"outer": {"inner": [{"type": "x", "createdAt": "2024"}]}})));
        assert!(detect(json!({"outer": {"inner": [{"type": "x", "note": "kept"}]}})));
    }

    #[test]
    fn custom_skip_fields_replace_defaults() {
        let detector = ContentDetector::with_skip_fields(["note"]);
        assert!(!detector.has_content(&Value::from(json!({"note": "ignored"}))));
        assert!(detector.has_content(&Value::from(json!({"id": "counted now"}))));
    }

    #[test]
    fn adding_text_never_removes_content() {
        let detector = ContentDetector::default();
        let samples = [
            json!({}),
            json!({"a": ""}),
            json!({"a": {"b": "deep"}}),
            json!({"id": "x", "list": [" "]}),
        ];
        for sample in samples {
            let before = detector.has_content(&Value::from(sample.clone()));
            let mut extended = sample;
            extended["addedField"] = json!("new text");
            let after = detector.has_content(&Value::from(extended));
            assert!(after, "lost content after extending (was {before})");
        }
    }
}
