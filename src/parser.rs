use crate::ir::ChartDescriptor;
use crate::record::{ProjectRecord, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Syntax(String),
    #[error("project record must be a JSON object, found {0}")]
    NotAMapping(&'static str),
    #[error("unexpected chart descriptor shape: {0}")]
    Shape(String),
}

/// Decodes strict JSON, falling back to JSON5 (comments, trailing commas,
/// unquoted keys) for hand-written input.
fn decode_json(input: &str) -> Result<serde_json::Value, ParseError> {
    match serde_json::from_str::<serde_json::Value>(input) {
        Ok(value) => Ok(value),
        Err(strict_err) => json5::from_str::<serde_json::Value>(input)
            .map_err(|_| ParseError::Syntax(strict_err.to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub fn parse_project_record(input: &str) -> Result<ProjectRecord, ParseError> {
    let json = decode_json(input)?;
    if !json.is_object() {
        return Err(ParseError::NotAMapping(json_kind(&json)));
    }
    Ok(ProjectRecord::from_value(Value::from(json)))
}

/// Accepts a descriptor array, `{"charts": [...]}`, or a single descriptor.
pub fn parse_chart_descriptors(input: &str) -> Result<Vec<ChartDescriptor>, ParseError> {
    let json = decode_json(input)?;
    let items = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("charts") {
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                return Err(ParseError::Shape(format!(
                    "\"charts\" must be an array, found {}",
                    json_kind(&other)
                )));
            }
            None => vec![serde_json::Value::Object(map)],
        },
        other => {
            return Err(ParseError::Shape(format!(
                "expected an array or object, found {}",
                json_kind(&other)
            )));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<ChartDescriptor>(item)
                .map_err(|err| ParseError::Shape(format!("chart #{}: {}", idx + 1, err)))
        })
        .collect()
}
