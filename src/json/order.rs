//! Record ordering.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::str::FromStr;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// String form used for non-numeric comparison.
fn coerce_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(coerce_string)
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => "[object Object]".to_string(),
    }
}

/// Compare two records by `key`.
///
/// A missing or null value on either side compares equal to anything.
fn compare_by_key(a: &JsonValue, b: &JsonValue, key: &str) -> Ordering {
    let (va, vb) = match (a.get(key), b.get(key)) {
        (Some(va), Some(vb)) if !va.is_null() && !vb.is_null() => (va, vb),
        _ => return Ordering::Equal,
    };

    if let (Some(na), Some(nb)) = (va.as_f64(), vb.as_f64()) {
        return na.partial_cmp(&nb).unwrap_or(Ordering::Equal);
    }

    coerce_string(va)
        .to_lowercase()
        .cmp(&coerce_string(vb).to_lowercase())
}

/// Stable merge sort.
///
/// `slice::sort_by` may panic when the comparator is not a total order,
/// which the null handling above does not guarantee.
fn merge_sort_by<T: Clone, F>(items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        if compare(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j].clone());
            j += 1;
        } else {
            merged.push(items[i].clone());
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..len]);
    items.clone_from_slice(&merged);
}

/// Return a copy of `records` sorted by `key`.
///
/// Numbers compare numerically, everything else as case-insensitive
/// strings. Ties keep their original order.
pub fn reorder(records: &[JsonValue], key: &str, direction: SortDirection) -> Vec<JsonValue> {
    let mut sorted = records.to_vec();
    let compare = |a: &JsonValue, b: &JsonValue| {
        let ordering = compare_by_key(a, b, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    };
    merge_sort_by(&mut sorted, &compare);
    sorted
}
