//! Node addressing within a JSON tree.

use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Key(String),
    Index(usize),
}

/// Parse a path into segments.
/// Supports: $, $.field, $.field.subfield, $.array[0], $.field[0].subfield
fn parse_path(path: &str) -> Vec<PathSegment> {
    let path = path.trim();
    let path = path.trim_start_matches("$.");
    let path = path.trim_start_matches('$');

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut current)));
                }
                let mut idx_str = String::new();
                while let Some(c) = chars.next_if(|c| *c != ']') {
                    idx_str.push(c);
                }
                chars.next();
                match idx_str.trim().parse::<usize>() {
                    Ok(idx) => segments.push(PathSegment::Index(idx)),
                    // Quoted keys: ["some key"]
                    Err(_) => segments.push(PathSegment::Key(
                        idx_str.trim().trim_matches(['"', '\'']).to_string(),
                    )),
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        segments.push(PathSegment::Key(current));
    }

    segments
}

/// Resolve a path against a JSON tree.
///
/// Returns `None` when any segment is missing.
pub fn resolve_path<'a>(root: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    parse_path(path)
        .into_iter()
        .try_fold(root, |current, segment| match segment {
            PathSegment::Key(key) => current.get(&key),
            PathSegment::Index(idx) => current.get(idx),
        })
}
