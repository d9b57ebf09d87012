//! JSON pretty-printing.

use super::JsonError;
use crate::config::ViewerSettings;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value as JsonValue};

/// Copy of `value` with object keys sorted at every level.
pub fn sort_keys(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<(&String, &JsonValue)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let sorted: Map<String, JsonValue> = entries
                .into_iter()
                .map(|(k, v)| (k.clone(), sort_keys(v)))
                .collect();
            JsonValue::Object(sorted)
        }
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// Serialize `value` according to the viewer settings.
///
/// An indent width of zero produces compact output.
pub fn format_json(value: &JsonValue, settings: &ViewerSettings) -> Result<String, JsonError> {
    let sorted;
    let value = if settings.sort_keys {
        sorted = sort_keys(value);
        &sorted
    } else {
        value
    };

    if settings.indent_width == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let indent = " ".repeat(settings.indent_width);
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser)?;

    String::from_utf8(out).map_err(|e| JsonError::Encoding(e.to_string()))
}
