//! Row sources for table views.
//!
//! A table view renders rows from a [`TableModel`]: an ordered sequence of
//! opaque rows plus a count. Rows are [`serde_json::Value`]s and renderers
//! pull fields out of them with dot-notation paths (`"customer.name"`).
//! The view never mutates its model.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// An ordered, read-only source of rows.
pub trait TableModel: fmt::Debug {
    fn row_count(&self) -> usize;

    fn rows(&self) -> Box<dyn Iterator<Item = &Value> + '_>;
}

/// The stock in-memory model.
///
/// ```rust
/// use serde::Serialize;
/// use swat::table_view::{TableModel, TableStore};
///
/// #[derive(Serialize)]
/// struct Invoice { id: u32, amt: u32 }
///
/// let store = TableStore::from_serialize(vec![
///     Invoice { id: 1, amt: 10 },
///     Invoice { id: 2, amt: 20 },
/// ]).unwrap();
///
/// assert_eq!(store.row_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStore {
    rows: Vec<Value>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Value>) -> Self {
        TableStore { rows }
    }

    /// Builds a store by serializing each item.
    pub fn from_serialize<T, I>(items: I) -> Result<Self>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let rows = items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(TableStore { rows })
    }

    pub fn push(&mut self, row: Value) {
        self.rows.push(row);
    }

    /// Serializes `row` and appends it.
    pub fn add_row<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.rows.push(serde_json::to_value(row)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Value>> for TableStore {
    fn from(rows: Vec<Value>) -> Self {
        TableStore::from_rows(rows)
    }
}

impl TableModel for TableStore {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.rows.iter())
    }
}

/// Looks up a dot-separated path in a row. An empty path is the row itself.
pub fn field<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(row);
    }
    let mut current = row;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Text form of a value: strings as-is, null as empty, others as JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        v => v.to_string(),
    }
}

/// Text form of the field at `path`, empty when missing.
pub fn field_string(row: &Value, path: &str) -> String {
    field(row, path).map(value_to_string).unwrap_or_default()
}

/// Whether a value counts as "on" for visibility bindings.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_follows_dot_paths() {
        let row = json!({"customer": {"name": "Ada", "tags": ["a", "b"]}});
        assert_eq!(field(&row, "customer.name"), Some(&json!("Ada")));
        assert_eq!(field(&row, "customer.tags.1"), Some(&json!("b")));
        assert_eq!(field(&row, "customer.missing"), None);
        assert_eq!(field(&row, ""), Some(&row));
    }

    #[test]
    fn field_string_formats_values() {
        let row = json!({"amt": 10, "note": null, "name": "x"});
        assert_eq!(field_string(&row, "amt"), "10");
        assert_eq!(field_string(&row, "note"), "");
        assert_eq!(field_string(&row, "name"), "x");
        assert_eq!(field_string(&row, "nope"), "");
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!("0")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([1])));
    }

    #[test]
    fn store_counts_and_iterates() {
        let store = TableStore::from_rows(vec![json!({"amt": 10}), json!({"amt": 20})]);
        let amounts: Vec<String> = store.rows().map(|r| field_string(r, "amt")).collect();
        assert_eq!(store.row_count(), 2);
        assert_eq!(amounts, vec!["10", "20"]);
    }
}
