//! Interactive JSON inspector state.

use crate::json::{
    aggregate, classify, derive_fields, numeric_keys, project, reorder, resolve_path,
    AggregateResult, FieldSelection, JsonError, NodeKind, SortDirection,
};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

/// State behind the JSON inspector.
///
/// Holds the last successfully parsed document, the node the user clicked,
/// the selected keys and the derived view. Derived data is always recomputed
/// from scratch when its inputs change.
#[derive(Debug, Clone, Default)]
pub struct JsonSession {
    /// Last successfully parsed document
    document: Option<JsonValue>,
    /// Message from the last failed parse
    error: Option<String>,
    /// Classification of the clicked node
    kind: Option<NodeKind>,
    /// Clicked node; records are wrapped into a one-element array
    extraction: Option<JsonValue>,
    /// Available and selected keys of the clicked node
    fields: FieldSelection,
    /// Projection of the extraction onto the selected keys
    projection: Option<JsonValue>,
    /// Keys chosen for aggregation
    sum_keys: Vec<String>,
}

impl JsonSession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a document.
    pub fn from_text(text: &str) -> Result<Self, JsonError> {
        let mut session = Self::new();
        session.load(text)?;
        Ok(session)
    }

    /// Parse new input.
    ///
    /// On failure the previous document is kept and the message is available
    /// from [`JsonSession::error`].
    pub fn load(&mut self, text: &str) -> Result<(), JsonError> {
        match serde_json::from_str::<JsonValue>(text) {
            Ok(doc) => {
                debug!(bytes = text.len(), "Parsed JSON input");
                self.document = Some(doc);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                let err = JsonError::from(e);
                debug!(error = %err, "Keeping last valid document");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Last successfully parsed document.
    pub fn document(&self) -> Option<&JsonValue> {
        self.document.as_ref()
    }

    /// Message from the last failed parse, cleared by a successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Classification of the selected node.
    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    /// Keys of the selected node.
    pub fn fields(&self) -> &FieldSelection {
        &self.fields
    }

    /// Select the node at `path` (e.g. `$.courses`).
    ///
    /// If the path does not resolve the extraction is cleared.
    pub fn select(&mut self, path: &str) {
        let node = self
            .document
            .as_ref()
            .and_then(|doc| resolve_path(doc, path))
            .cloned();

        let Some(node) = node else {
            warn!(path = %path, "Selected node not found; clearing extraction");
            self.clear_selection();
            return;
        };

        self.select_node(node);
        info!(
            path = %path,
            kind = ?self.kind,
            keys = self.fields.available.len(),
            "Selected node"
        );
    }

    /// Use `node` as the clicked node.
    pub fn select_node(&mut self, node: JsonValue) {
        let kind = classify(&node);
        self.kind = Some(kind);

        match kind {
            NodeKind::Record | NodeKind::ArrayOfRecords => {
                self.fields = derive_fields(&node);
                let records = match node {
                    JsonValue::Array(items) => items,
                    record => vec![record],
                };
                let full = project(&records, &self.fields.available);
                self.extraction = Some(JsonValue::Array(full));
            }
            NodeKind::Other => {
                self.fields = FieldSelection::default();
                self.extraction = Some(node);
            }
        }

        self.refresh();
    }

    fn clear_selection(&mut self) {
        self.kind = None;
        self.extraction = None;
        self.fields = FieldSelection::default();
        self.projection = None;
        self.sum_keys.clear();
    }

    /// Toggle a key in the selection.
    pub fn toggle_key(&mut self, key: &str) {
        self.fields.toggle(key);
        self.refresh();
    }

    /// Replace the selection.
    pub fn set_selected_keys(&mut self, keys: Vec<String>) {
        self.fields.selected = keys;
        self.refresh();
    }

    /// Recompute the projection and drop aggregate keys that are no longer
    /// numeric.
    fn refresh(&mut self) {
        self.projection = match &self.extraction {
            Some(JsonValue::Array(records)) => {
                Some(JsonValue::Array(project(records, &self.fields.selected)))
            }
            _ => None,
        };

        let numeric = self.numeric_keys();
        self.sum_keys.retain(|k| numeric.contains(k));
    }

    /// Current view: the projection if there is one, else the extraction.
    pub fn view(&self) -> Option<&JsonValue> {
        self.projection.as_ref().or(self.extraction.as_ref())
    }

    /// Sort the view by `key`.
    ///
    /// The key must be one of the available keys; otherwise the view is left
    /// untouched. Views that are not arrays are not sorted.
    pub fn order_by(&mut self, key: &str, direction: SortDirection) -> Result<(), JsonError> {
        if !self.fields.is_available(key) {
            warn!(key = %key, "Rejected sort on unknown key");
            return Err(JsonError::UnknownSortKey(key.to_string()));
        }

        let sorted = match self.view() {
            Some(JsonValue::Array(records)) => reorder(records, key, direction),
            _ => return Ok(()),
        };

        debug!(key = %key, direction = ?direction, rows = sorted.len(), "Sorted view");
        self.projection = Some(JsonValue::Array(sorted));
        Ok(())
    }

    fn view_records(&self) -> &[JsonValue] {
        match self.view() {
            Some(JsonValue::Array(records)) => records,
            _ => &[],
        }
    }

    /// Available keys that hold a number in at least one row of the view.
    pub fn numeric_keys(&self) -> Vec<String> {
        numeric_keys(self.view_records(), &self.fields.available)
    }

    /// Keys chosen for aggregation.
    pub fn sum_keys(&self) -> &[String] {
        &self.sum_keys
    }

    /// Toggle a key for aggregation. Non-numeric keys are ignored.
    pub fn toggle_sum_key(&mut self, key: &str) {
        if let Some(pos) = self.sum_keys.iter().position(|k| k == key) {
            self.sum_keys.remove(pos);
        } else if self.numeric_keys().iter().any(|k| k == key) {
            self.sum_keys.push(key.to_string());
        }
    }

    /// Aggregate the view over the chosen keys.
    pub fn aggregate(&self) -> AggregateResult {
        aggregate(self.view_records(), &self.sum_keys)
    }
}
