/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The `DataValue` document type and the dotted-path value resolver.
//!
//! **Important**: absence of data is normal here, not exceptional. Every
//! lookup either succeeds or yields the caller's fallback; nothing in this
//! module returns an error.

use indexmap::IndexMap;

/// A loosely-typed value inside an entity snapshot.
///
/// Maps preserve insertion order so that downstream consumers (variable
/// tables, UI display) see fields in the order the backend sent them.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A string value.
    String(String),

    /// A numeric value (JSON numbers arrive as doubles).
    Number(f64),

    /// A boolean value.
    Bool(bool),

    /// A list of values.
    List(Vec<DataValue>),

    /// An ordered map of string keys to values.
    Map(IndexMap<String, DataValue>),

    /// A null/missing value.
    Null,
}

impl DataValue {
    /// Check whether this value is "truthy" for fallback coalescing and
    /// signal-field gating.
    ///
    /// Falsy values: `Null`, `Bool(false)`, `Number(0)`, the empty string,
    /// the empty list, and the empty map. Everything else is truthy.
    ///
    /// Note that a present-but-zero number is falsy. Resolving such a field
    /// yields the fallback, not `"0"` — preserved as observed behavior of
    /// the original truthy-coalescing idiom.
    pub fn is_truthy(&self) -> bool {
        match self {
            DataValue::String(s) => !s.is_empty(),
            DataValue::Number(n) => *n != 0.0,
            DataValue::Bool(b) => *b,
            DataValue::List(items) => !items.is_empty(),
            DataValue::Map(m) => !m.is_empty(),
            DataValue::Null => false,
        }
    }

    /// Get a direct child by key. Only maps have children.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        match self {
            DataValue::Map(m) => m.get(key),
            _ => None,
        }
    }

    /// Walk a dot-separated path (e.g. `"course.name"`) and return the leaf
    /// value, or `None` at the first segment that is missing or sits under a
    /// non-map value.
    pub fn lookup(&self, path: &str) -> Option<&DataValue> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Resolve a dotted path to a display string, with a fallback.
    ///
    /// The fallback is returned when the path is missing **or** when the
    /// leaf value is falsy: `0`, `""`, `false`, and `null` all coalesce to
    /// the fallback rather than rendering as text.
    pub fn resolve(&self, path: &str, fallback: &str) -> String {
        match self.lookup(path) {
            Some(value) if value.is_truthy() => value.render(),
            _ => fallback.to_string(),
        }
    }

    /// Render this value as a display string.
    ///
    /// - String: as-is
    /// - Number: without a trailing `.0` for integral values
    /// - Bool: `"true"` / `"false"`
    /// - List: comma-joined rendered elements
    /// - Map: empty (maps are containers, not display values)
    /// - Null: empty
    pub fn render(&self) -> String {
        match self {
            DataValue::String(s) => s.clone(),
            DataValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            DataValue::Bool(b) => b.to_string(),
            DataValue::List(items) => items
                .iter()
                .map(|v| v.render())
                .collect::<Vec<_>>()
                .join(", "),
            DataValue::Map(_) => String::new(),
            DataValue::Null => String::new(),
        }
    }
}

impl Default for DataValue {
    fn default() -> Self {
        DataValue::Null
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DataValue::Null,
            serde_json::Value::Bool(b) => DataValue::Bool(b),
            serde_json::Value::Number(n) => DataValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => DataValue::String(s),
            serde_json::Value::Array(items) => {
                DataValue::List(items.into_iter().map(DataValue::from).collect())
            }
            serde_json::Value::Object(entries) => DataValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, DataValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<f64> for DataValue {
    fn from(n: f64) -> Self {
        DataValue::Number(n)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(DataValue::from("hello").is_truthy());
        assert!(DataValue::from("false").is_truthy()); // non-empty string, even "false"
        assert!(!DataValue::from("").is_truthy());

        assert!(DataValue::from(1.0).is_truthy());
        assert!(!DataValue::from(0.0).is_truthy());

        assert!(DataValue::from(true).is_truthy());
        assert!(!DataValue::from(false).is_truthy());
        assert!(!DataValue::Null.is_truthy());

        assert!(!DataValue::List(vec![]).is_truthy());
        assert!(DataValue::List(vec![DataValue::Null]).is_truthy());
    }

    #[test]
    fn test_lookup_nested_path() {
        let doc = DataValue::from(json!({
            "course": { "pricing": { "amount": 499 } }
        }));

        assert_eq!(
            doc.lookup("course.pricing.amount"),
            Some(&DataValue::Number(499.0))
        );
        assert_eq!(doc.lookup("course.pricing.currency"), None);
        assert_eq!(doc.lookup("nonexistent"), None);
        // Walking through a leaf is a miss, not an error
        assert_eq!(doc.lookup("course.pricing.amount.extra"), None);
    }

    #[test]
    fn test_resolve_returns_leaf_or_fallback() {
        let doc = DataValue::from(json!({ "full_name": "Ann", "email": "" }));

        assert_eq!(doc.resolve("full_name", "Student"), "Ann");
        assert_eq!(doc.resolve("missing", "Student"), "Student");
        // Empty string is treated the same as absent
        assert_eq!(doc.resolve("email", "your email"), "your email");
    }

    #[test]
    fn test_resolve_coalesces_falsy_leaves() {
        let doc = DataValue::from(json!({
            "referral_count": 0,
            "active": false,
            "note": null
        }));

        assert_eq!(doc.resolve("referral_count", "-"), "-");
        assert_eq!(doc.resolve("active", "-"), "-");
        assert_eq!(doc.resolve("note", "-"), "-");
    }

    #[test]
    fn test_render_numbers() {
        assert_eq!(DataValue::from(499.0).render(), "499");
        assert_eq!(DataValue::from(49.5).render(), "49.5");
    }

    #[test]
    fn test_from_json_preserves_field_order() {
        let doc = DataValue::from(json!({ "b": 1, "a": 2 }));
        let DataValue::Map(m) = doc else {
            panic!("expected map")
        };
        let keys: Vec<&str> = m.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
