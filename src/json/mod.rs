//! JSON extraction, projection, ordering and aggregation.
//!
//! All functions here are pure: they take a parsed tree (or a slice of
//! records) and return new values. [`crate::JsonSession`] strings them
//! together for interactive use.

mod aggregate;
mod classify;
mod fields;
mod format;
mod order;
mod path;

pub use aggregate::{aggregate, numeric_keys, Aggregate, AggregateResult};
pub use classify::{classify, NodeKind};
pub use fields::{derive_fields, project, FieldSelection, DEFAULT_SELECTION_LIMIT};
pub use format::{format_json, sort_keys};
pub use order::{reorder, SortDirection};
pub use path::resolve_path;

/// Errors from the JSON pipeline.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("\"{0}\" is not in available keys")]
    UnknownSortKey(String),

    #[error("output is not valid UTF-8: {0}")]
    Encoding(String),
}

/// Parse a JSON document.
pub fn parse(text: &str) -> Result<serde_json::Value, JsonError> {
    Ok(serde_json::from_str(text)?)
}
