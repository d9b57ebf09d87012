//! Sum/average/count over numeric fields.

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Statistics for one key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub sum: f64,
    pub avg: f64,
    pub count: usize,
}

/// Aggregates keyed by field, in selection order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    entries: Vec<(String, Aggregate)>,
}

impl AggregateResult {
    /// Get the aggregate for a key.
    pub fn get(&self, key: &str) -> Option<Aggregate> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, aggregate)| *aggregate)
    }

    /// Keys in selection order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, aggregate)` in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Aggregate)> {
        self.entries.iter().map(|(k, a)| (k.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: &str, aggregate: Aggregate) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = aggregate,
            None => self.entries.push((key.to_string(), aggregate)),
        }
    }
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Round to 10 decimal digits.
fn round10(value: f64) -> f64 {
    (value * 1e10).round() / 1e10
}

/// Keys that hold a number in at least one record.
pub fn numeric_keys(records: &[JsonValue], available: &[String]) -> Vec<String> {
    available
        .iter()
        .filter(|key| {
            records
                .iter()
                .any(|record| record.get(key.as_str()).is_some_and(JsonValue::is_number))
        })
        .cloned()
        .collect()
}

/// Compute sum, average and count for each selected key.
///
/// Only numeric entries contribute; anything else is skipped rather than
/// counted as zero.
pub fn aggregate(records: &[JsonValue], selected: &[String]) -> AggregateResult {
    let mut result = AggregateResult::default();

    for key in selected {
        let (sum, count) = records
            .iter()
            .filter_map(|record| record.get(key.as_str()).and_then(JsonValue::as_f64))
            .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));

        let avg = if count > 0 { sum / count as f64 } else { 0.0 };

        result.insert(
            key,
            Aggregate {
                sum: round10(sum),
                avg: round10(avg),
                count,
            },
        );
    }

    result
}
