//! Field extraction: flatten a field path into candidate strings
//!
//! A field name is looked up literally first, then as a dotted path. Arrays
//! are traversed transparently, so `sections.title` reaches the title of
//! every section and `tags` yields every tag. Once the path is exhausted,
//! every string leaf below it becomes a candidate.

use serde_json::Value;

/// All string leaves reachable under `field`, in document order
///
/// Missing, null and non-string values contribute nothing.
pub fn extract_candidates<'a>(document: &'a Value, field: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    resolve(document, field, &mut out);
    out
}

fn resolve<'a>(value: &'a Value, path: &str, out: &mut Vec<&'a str>) {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(path) {
                collect_leaves(found, out);
            } else if let Some((head, rest)) = path.split_once('.') {
                if let Some(child) = map.get(head) {
                    resolve(child, rest, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve(item, path, out);
            }
        }
        _ => {}
    }
}

fn collect_leaves<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s.as_str()),
        Value::Array(items) => items.iter().for_each(|item| collect_leaves(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_leaves(item, out)),
        _ => {}
    }
}
