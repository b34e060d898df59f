//! Read-only view of the game database fetched at startup.
//!
//! The server sends `{ data_type: { item_id: item, .. }, .. }`. Beyond that
//! top-level shape the contents are opaque: items are handed to the editor
//! as-is.

use crate::bridge::error::LoadError;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct GlobalDataBindings(Map<String, Value>);

impl GlobalDataBindings {
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn data_types(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Ids of the entries under `data_type`. Arrays are addressed by index.
    pub fn item_ids(&self, data_type: &str) -> Vec<String> {
        match self.0.get(data_type) {
            Some(Value::Object(items)) => items.keys().cloned().collect(),
            Some(Value::Array(items)) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn item(&self, data_type: &str, id: &str) -> Option<&Value> {
        match self.0.get(data_type)? {
            Value::Object(items) => items.get(id),
            Value::Array(items) => items.get(id.parse::<usize>().ok()?),
            _ => None,
        }
    }

    /// The entry's `description` string, shown in the banner while it is
    /// highlighted.
    pub fn description(&self, data_type: &str, id: &str) -> Option<&str> {
        self.item(data_type, id)?
            .get("description")
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "forms": {
            "pyrolizard": {"name": "Pyrolizard", "description": "Hot-headed lizard"},
            "mudgoo": {"name": "Mudgoo"}
        },
        "abilities": [{"name": "Tackle"}, {"name": "Ember"}],
        "version": 3
    }"#;

    #[test]
    fn lists_data_types_and_items() {
        let gdb = GlobalDataBindings::from_json(SAMPLE).unwrap();
        assert_eq!(gdb.data_types(), vec!["abilities", "forms", "version"]);
        assert_eq!(gdb.item_ids("forms"), vec!["mudgoo", "pyrolizard"]);
        assert_eq!(gdb.item_ids("abilities"), vec!["0", "1"]);
        assert!(gdb.item_ids("version").is_empty());
        assert!(gdb.item_ids("missing").is_empty());
    }

    #[test]
    fn looks_up_items() {
        let gdb = GlobalDataBindings::from_json(SAMPLE).unwrap();
        assert_eq!(gdb.item("forms", "mudgoo"), Some(&json!({"name": "Mudgoo"})));
        assert_eq!(gdb.item("abilities", "1"), Some(&json!({"name": "Ember"})));
        assert_eq!(gdb.item("abilities", "x"), None);
        assert_eq!(gdb.item("version", "0"), None);
    }

    #[test]
    fn descriptions() {
        let gdb = GlobalDataBindings::from_json(SAMPLE).unwrap();
        assert_eq!(gdb.description("forms", "pyrolizard"), Some("Hot-headed lizard"));
        assert_eq!(gdb.description("forms", "mudgoo"), None);
    }

    #[test]
    fn non_object_root_is_a_parse_error() {
        assert!(matches!(
            GlobalDataBindings::from_json("[1,2]"),
            Err(LoadError::Parse(_))
        ));
        assert!(GlobalDataBindings::from_json("{}").unwrap().is_empty());
    }
}
