//! Field-set derivation and projection.

use super::classify::{classify, NodeKind};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Number of keys selected by default.
pub const DEFAULT_SELECTION_LIMIT: usize = 3;

/// Keys available on a node and the subset selected for projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldSelection {
    /// All keys of the sampled record, in document order
    pub available: Vec<String>,
    /// Selected keys, in projection order
    pub selected: Vec<String>,
}

impl FieldSelection {
    /// Whether `key` is one of the available keys.
    pub fn is_available(&self, key: &str) -> bool {
        self.available.iter().any(|k| k == key)
    }

    /// Select `key` if unselected, unselect it otherwise.
    pub fn toggle(&mut self, key: &str) {
        if let Some(pos) = self.selected.iter().position(|k| k == key) {
            self.selected.remove(pos);
        } else {
            self.selected.push(key.to_string());
        }
    }
}

/// Derive the field set of a node.
///
/// Records use their own keys, arrays of records the keys of the first
/// element. Everything else has no fields.
pub fn derive_fields(node: &JsonValue) -> FieldSelection {
    let sample = match (classify(node), node) {
        (NodeKind::Record, JsonValue::Object(map)) => map,
        (NodeKind::ArrayOfRecords, JsonValue::Array(items)) => match items.first() {
            Some(JsonValue::Object(map)) => map,
            _ => return FieldSelection::default(),
        },
        _ => return FieldSelection::default(),
    };

    let available: Vec<String> = sample.keys().cloned().collect();
    let selected = available
        .iter()
        .take(DEFAULT_SELECTION_LIMIT)
        .cloned()
        .collect();

    FieldSelection {
        available,
        selected,
    }
}

/// Restrict each record to `keys`, in the order given.
///
/// Keys missing from a record are left out. An empty key list copies the
/// records unchanged.
pub fn project(records: &[JsonValue], keys: &[String]) -> Vec<JsonValue> {
    if keys.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .map(|record| {
            let mut out = Map::new();
            if let JsonValue::Object(source) = record {
                for key in keys {
                    if let Some(value) = source.get(key) {
                        out.insert(key.clone(), value.clone());
                    }
                }
            }
            JsonValue::Object(out)
        })
        .collect()
}
