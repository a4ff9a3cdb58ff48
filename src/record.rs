use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Dynamically shaped value found inside a project record.
///
/// Records arrive as loosely structured JSON; every traversal in the crate
/// matches on this enum instead of probing for properties.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Field lookup on a mapping; `None` for missing keys and non-mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => {
                number.as_f64().map(Value::Number).unwrap_or(Value::Null)
            }
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(flag) => serde_json::Value::Bool(flag),
            Value::Number(number) => serde_json::Number::from_f64(number)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(text) => serde_json::Value::String(text),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::String(text.to_string())
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

/// Top-level regions of a project record, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    ProblemAnalysis,
    ProjectIdea,
    GeneralObjectives,
    SpecificObjectives,
    ProjectManagement,
    Activities,
    Outputs,
    Outcomes,
    Impacts,
    Risks,
    Kers,
}

impl SectionKey {
    pub const ALL: [SectionKey; 11] = [
        SectionKey::ProblemAnalysis,
        SectionKey::ProjectIdea,
        SectionKey::GeneralObjectives,
        SectionKey::SpecificObjectives,
        SectionKey::ProjectManagement,
        SectionKey::Activities,
        SectionKey::Outputs,
        SectionKey::Outcomes,
        SectionKey::Impacts,
        SectionKey::Risks,
        SectionKey::Kers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::ProblemAnalysis => "problemAnalysis",
            SectionKey::ProjectIdea => "projectIdea",
            SectionKey::GeneralObjectives => "generalObjectives",
            SectionKey::SpecificObjectives => "specificObjectives",
            SectionKey::ProjectManagement => "projectManagement",
            SectionKey::Activities => "activities",
            SectionKey::Outputs => "outputs",
            SectionKey::Outcomes => "outcomes",
            SectionKey::Impacts => "impacts",
            SectionKey::Risks => "risks",
            SectionKey::Kers => "kers",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == key)
    }
}

/// A project-planning document as handed over by the data-loading layer.
///
/// Unknown keys are kept (they may matter to other consumers) but only the
/// known [`SectionKey`]s take part in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct ProjectRecord {
    fields: BTreeMap<String, Value>,
}

impl ProjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from an arbitrary value. Anything but a mapping
    /// yields an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Mapping(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Section data, or `None` when the section is absent.
    ///
    /// Null and scalar section values count as absent: only mappings and
    /// sequences are meaningful section shapes.
    pub fn section(&self, key: SectionKey) -> Option<&Value> {
        match self.fields.get(key.as_str())? {
            value @ (Value::Mapping(_) | Value::Sequence(_)) => Some(value),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    /// Present sections in canonical order.
    pub fn present_sections(&self) -> impl Iterator<Item = (SectionKey, &Value)> {
        SectionKey::ALL
            .into_iter()
            .filter_map(|key| self.section(key).map(|value| (key, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.present_sections().next().is_none()
    }
}

impl From<Value> for ProjectRecord {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<ProjectRecord> for Value {
    fn from(record: ProjectRecord) -> Self {
        Value::Mapping(record.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_nested_json() {
        let value = Value::from(json!({"a": [1, "x", null], "b": {"c": true}}));
        let a = value.get("a").and_then(Value::as_sequence).unwrap();
        assert_eq!(a[0], Value::Number(1.0));
        assert_eq!(a[1].as_str(), Some("x"));
        assert!(a[2].is_null());
        assert_eq!(value.get("b").and_then(|b| b.get("c")), Some(&Value::Bool(true)));
    }

    #[test]
    fn null_and_scalar_sections_are_absent() {
        let record = ProjectRecord::from_value(Value::from(json!({
            "risks": null,
            "kers": "not a section",
            "outputs": [],
            "projectIdea": {}
        })));
        assert!(record.section(SectionKey::Risks).is_none());
        assert!(record.section(SectionKey::Kers).is_none());
        let present: Vec<SectionKey> = record.present_sections().map(|(key, _)| key).collect();
        assert_eq!(present, vec![SectionKey::ProjectIdea, SectionKey::Outputs]);
    }

    #[test]
    fn non_mapping_record_is_empty() {
        assert!(ProjectRecord::from_value(Value::from(json!([1, 2]))).is_empty());
    }

    #[test]
    fn section_keys_round_trip_their_names() {
        for key in SectionKey::ALL {
            assert_eq!(SectionKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(SectionKey::from_key("budget"), None);
    }
}
