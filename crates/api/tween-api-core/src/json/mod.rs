use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::Value;

/// Errors produced while converting host JSON into snapshot values.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("value json parse error: {0}")]
    Parse(String),
    #[error("serialize value: {0}")]
    Serialize(String),
    #[error("unsupported json number {0}")]
    Number(String),
}

/// Convert a parsed JSON document into a [`Value`], keeping key order.
pub fn value_from_json(json: &JsonValue) -> Result<Value, JsonError> {
    Ok(match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => Value::Number(
            n.as_f64()
                .ok_or_else(|| JsonError::Number(n.to_string()))?,
        ),
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => Value::List(
            items
                .iter()
                .map(value_from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        JsonValue::Object(obj) => {
            let mut map = crate::ValueMap::with_capacity(obj.len());
            for (k, v) in obj {
                map.insert(k.clone(), value_from_json(v)?);
            }
            Value::Map(map)
        }
    })
}

/// Parse JSON text into a [`Value`].
pub fn parse_value(text: &str) -> Result<Value, JsonError> {
    let json: JsonValue = serde_json::from_str(text).map_err(|e| JsonError::Parse(e.to_string()))?;
    value_from_json(&json)
}

/// Serialize a snapshot back to JSON text.
pub fn to_json_string(value: &Value) -> Result<String, JsonError> {
    serde_json::to_string(value).map_err(|e| JsonError::Serialize(e.to_string()))
}
