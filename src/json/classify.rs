//! Node classification.

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Shape of a clicked JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A single object
    Record,
    /// A non-empty array whose first element is an object
    ArrayOfRecords,
    /// Scalars, empty arrays, arrays of scalars
    Other,
}

/// Classify a node. Arrays are judged by their first element only.
pub fn classify(node: &JsonValue) -> NodeKind {
    match node {
        JsonValue::Object(_) => NodeKind::Record,
        JsonValue::Array(items) => match items.first() {
            Some(JsonValue::Object(_)) => NodeKind::ArrayOfRecords,
            _ => NodeKind::Other,
        },
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => {
            NodeKind::Other
        }
    }
}
