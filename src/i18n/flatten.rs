//! Flattener: nested message trees to dotted key paths.
//!
//! Object entries join with `.` (`nav.home`), array elements append a bracket
//! index (`faq[0]`, `faq[0].question`). An empty object or array below the
//! root is itself a key, so intentionally empty placeholders still take part
//! in key comparisons.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Flat view of one message tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedBundle {
    /// Every terminal path reached (string, scalar and empty-container leaves)
    pub keys: BTreeSet<String>,

    /// String leaves only, by path
    pub strings: BTreeMap<String, String>,
}

impl FlattenedBundle {
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Iterate string leaves as `(path, value)`.
    pub fn strings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Flatten a message tree.
pub fn flatten(value: &Value) -> FlattenedBundle {
    let mut out = FlattenedBundle::default();
    walk(value, "", &mut out);
    out
}

fn walk(value: &Value, path: &str, out: &mut FlattenedBundle) {
    match value {
        Value::Object(map) => {
            if map.is_empty() {
                record_empty(path, out);
            }
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                walk(child, &child_path, out);
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                record_empty(path, out);
            }
            for (index, child) in items.iter().enumerate() {
                walk(child, &format!("{}[{}]", path, index), out);
            }
        }
        Value::String(s) => {
            if !path.is_empty() {
                out.keys.insert(path.to_string());
                out.strings.insert(path.to_string(), s.clone());
            }
        }
        Value::Number(_) | Value::Bool(_) | Value::Null => {
            if !path.is_empty() {
                out.keys.insert(path.to_string());
            }
        }
    }
}

fn record_empty(path: &str, out: &mut FlattenedBundle) {
    if !path.is_empty() {
        out.keys.insert(path.to_string());
    }
}
