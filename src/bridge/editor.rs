//! Schema-driven form editor mounted in the editor pane.
//!
//! An [`EditorInstance`] is built from a JSON schema and a starting value.
//! Form fields come from the schema's top-level `properties`; validation is
//! limited to "required" and "declared type" checks, which is all the pane
//! needs to flag bad entries.

use crate::bridge::error::{EditError, LoadError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Name of the layout region editors are mounted into.
pub const EDITOR_MOUNT: &str = "editor";

/// When field errors become visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowErrors {
    /// Only after a field has been edited.
    Interaction,
    /// Only after a field's value actually changed.
    Change,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub theme: String,
    pub compact: bool,
    pub show_errors: ShowErrors,
    pub disable_edit_json: bool,
    pub disable_collapse: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            theme: "bootstrap4".to_string(),
            compact: true,
            show_errors: ShowErrors::Always,
            disable_edit_json: true,
            disable_collapse: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Any,
}

impl FieldKind {
    fn from_schema(schema: &Value) -> Self {
        match schema.get("type").and_then(Value::as_str) {
            Some("string") => Self::String,
            Some("number") => Self::Number,
            Some("integer") => Self::Integer,
            Some("boolean") => Self::Boolean,
            Some("object") => Self::Object,
            Some("array") => Self::Array,
            _ => Self::Any,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Any => "any",
        }
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Any => true,
        }
    }

    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::Integer | Self::Boolean
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Remove the schema's `links` declarations; the form editor has no use for
/// relational links and would choke on them.
pub fn strip_links(schema: &mut Value) {
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("links");
    }
}

#[derive(Debug)]
pub struct EditorInstance {
    mount: &'static str,
    data_type: String,
    options: EditorOptions,
    schema: Value,
    initial: Value,
    value: Value,
    fields: Vec<FormField>,
    cursor: usize,
    touched: BTreeSet<usize>,
    changed: BTreeSet<usize>,
}

impl EditorInstance {
    /// Build an editor for `schema` starting at `start`. `links` is stripped
    /// from the schema before anything else looks at it.
    pub fn new(
        data_type: &str,
        options: EditorOptions,
        mut schema: Value,
        start: Value,
    ) -> Result<Self, LoadError> {
        strip_links(&mut schema);

        let root = schema
            .as_object()
            .ok_or_else(|| LoadError::Construct(format!("schema for {data_type} is not an object")))?;
        let fields = collect_fields(root)?;

        let value = match start {
            Value::Null if !fields.is_empty() => Value::Object(Map::new()),
            v if !fields.is_empty() && !v.is_object() => {
                return Err(LoadError::Construct(format!(
                    "initial value for {data_type} is not an object"
                )));
            }
            v => v,
        };

        tracing::debug!(
            data_type,
            theme = %options.theme,
            fields = fields.len(),
            "editor constructed"
        );

        Ok(Self {
            mount: EDITOR_MOUNT,
            data_type: data_type.to_string(),
            options,
            schema,
            initial: value.clone(),
            value,
            fields,
            cursor: 0,
            touched: BTreeSet::new(),
            changed: BTreeSet::new(),
        })
    }

    #[cfg(test)]
    pub fn mount(&self) -> &'static str {
        self.mount
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    #[cfg(test)]
    pub fn initial_value(&self) -> &Value {
        &self.initial
    }

    #[cfg(test)]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field_value(&self, index: usize) -> Option<&Value> {
        let field = self.fields.get(index)?;
        self.value.get(&field.name)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.fields.is_empty() {
            return;
        }
        let len = self.fields.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.initial
    }

    /// Text to pre-fill when editing field `index`, if it can be edited.
    pub fn edit_text(&self, index: usize) -> Option<String> {
        let field = self.fields.get(index)?;
        if !field.kind.is_scalar() {
            return None;
        }
        Some(match self.value.get(&field.name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    }

    /// Parse `input` according to the field's declared type and store it.
    pub fn set_field(&mut self, index: usize, input: &str) -> Result<(), EditError> {
        let Some(field) = self.fields.get(index) else {
            return Err(EditError::NotEditable(format!("field #{index}")));
        };
        let invalid = |expected| EditError::Invalid {
            field: field.name.clone(),
            expected,
            input: input.to_string(),
        };

        let new_value = match field.kind {
            FieldKind::String => Value::String(input.to_string()),
            FieldKind::Integer => input
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid("an integer"))?,
            FieldKind::Number => input
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid("a number"))?,
            FieldKind::Boolean => match input.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(invalid("true or false")),
            },
            FieldKind::Object | FieldKind::Array | FieldKind::Any => {
                return Err(EditError::NotEditable(field.name.clone()));
            }
        };

        let name = field.name.clone();
        let obj = match self.value.as_object_mut() {
            Some(obj) => obj,
            None => return Err(EditError::NotEditable(name)),
        };
        let previous = obj.insert(name, new_value.clone());
        self.touched.insert(index);
        if previous.as_ref() != Some(&new_value) {
            self.changed.insert(index);
        }
        Ok(())
    }

    /// Field errors visible under the configured [`ShowErrors`] policy.
    pub fn errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(i, _)| match self.options.show_errors {
                ShowErrors::Always => true,
                ShowErrors::Interaction => self.touched.contains(i),
                ShowErrors::Change => self.changed.contains(i),
                ShowErrors::Never => false,
            })
            .filter_map(|(_, field)| self.check_field(field))
            .collect()
    }

    pub fn error_for(&self, index: usize) -> Option<FieldError> {
        let field = self.fields.get(index)?;
        self.errors().into_iter().find(|e| e.field == field.name)
    }

    fn check_field(&self, field: &FormField) -> Option<FieldError> {
        let message = match self.value.get(&field.name) {
            None | Some(Value::Null) if field.required => "Value required".to_string(),
            None | Some(Value::Null) => return None,
            Some(v) if !field.kind.matches(v) => {
                format!("Value must be of type {}", field.kind.name())
            }
            Some(_) => return None,
        };
        Some(FieldError {
            field: field.name.clone(),
            message,
        })
    }

    /// Release the instance. Consumes it so nothing can touch it afterwards.
    pub fn destroy(self) {
        tracing::debug!(data_type = %self.data_type, mount = self.mount, "editor released");
    }
}

fn collect_fields(root: &Map<String, Value>) -> Result<Vec<FormField>, LoadError> {
    let Some(props) = root.get("properties") else {
        return Ok(Vec::new());
    };
    let props = props
        .as_object()
        .ok_or_else(|| LoadError::Construct("schema properties must be an object".to_string()))?;

    let required: BTreeSet<&str> = root
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    Ok(props
        .iter()
        .map(|(name, prop)| FormField {
            name: name.clone(),
            title: prop
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(name)
                .to_string(),
            description: prop
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            kind: FieldKind::from_schema(prop),
            required: required.contains(name.as_str())
                || prop.get("required").and_then(Value::as_bool) == Some(true),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn monster_schema() -> Value {
        json!({
            "type": "object",
            "links": [{"rel": "forms", "href": "/forms/{id}"}],
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "title": "Name"},
                "level": {"type": "integer"},
                "speed": {"type": "number", "description": "Tiles per turn"},
                "tamed": {"type": "boolean"},
                "abilities": {"type": "array"}
            }
        })
    }

    #[test]
    fn strip_links_removes_only_links() {
        let mut schema = json!({
            "type": "object",
            "links": [{"rel": "x"}],
            "properties": {"name": {"type": "string"}}
        });
        strip_links(&mut schema);
        assert_eq!(
            schema,
            json!({"type": "object", "properties": {"name": {"type": "string"}}})
        );
    }

    #[test]
    fn constructed_schema_never_has_links() {
        let ed = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), json!({}))
            .unwrap();
        assert!(ed.schema().get("links").is_none());
        assert_eq!(ed.mount(), EDITOR_MOUNT);
    }

    #[test]
    fn default_options_match_editor_setup() {
        let opts = EditorOptions::default();
        assert_eq!(opts.theme, "bootstrap4");
        assert!(opts.compact);
        assert_eq!(opts.show_errors, ShowErrors::Always);
        assert!(opts.disable_edit_json);
        assert!(opts.disable_collapse);
    }

    #[test]
    fn fields_follow_properties() {
        let ed = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), json!({}))
            .unwrap();
        let names: Vec<_> = ed.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["abilities", "level", "name", "speed", "tamed"]);

        let name = ed.fields().iter().find(|f| f.name == "name").unwrap();
        assert!(name.required);
        assert_eq!(name.title, "Name");
        let speed = ed.fields().iter().find(|f| f.name == "speed").unwrap();
        assert_eq!(speed.description.as_deref(), Some("Tiles per turn"));
        assert_eq!(speed.kind, FieldKind::Number);
    }

    #[test]
    fn non_object_schema_fails_construction() {
        let err = EditorInstance::new("x", EditorOptions::default(), json!([1, 2]), json!(null))
            .unwrap_err();
        assert!(matches!(err, LoadError::Construct(_)));
    }

    #[test]
    fn bad_properties_fail_construction() {
        let err = EditorInstance::new(
            "x",
            EditorOptions::default(),
            json!({"properties": "nope"}),
            json!({}),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Construct(_)));
    }

    #[test]
    fn scalar_start_for_object_form_fails() {
        let err = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), json!(5))
            .unwrap_err();
        assert!(matches!(err, LoadError::Construct(_)));
    }

    #[test]
    fn null_start_becomes_empty_object() {
        let ed = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), Value::Null)
            .unwrap();
        assert_eq!(ed.value(), &json!({}));
    }

    #[test]
    fn always_shows_required_and_type_errors() {
        let ed = EditorInstance::new(
            "monsters",
            EditorOptions::default(),
            monster_schema(),
            json!({"level": "high"}),
        )
        .unwrap();
        let errors = ed.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.field == "name" && e.message == "Value required"));
        assert!(errors
            .iter()
            .any(|e| e.field == "level" && e.message == "Value must be of type integer"));
    }

    #[test]
    fn interaction_policy_hides_untouched_errors() {
        let opts = EditorOptions {
            show_errors: ShowErrors::Interaction,
            ..EditorOptions::default()
        };
        let mut ed = EditorInstance::new("monsters", opts, monster_schema(), json!({"level": "high"}))
            .unwrap();
        assert!(ed.errors().is_empty());

        let name_idx = ed.fields().iter().position(|f| f.name == "name").unwrap();
        ed.set_field(name_idx, "").unwrap();
        assert!(ed.errors().is_empty());
    }

    #[test]
    fn set_field_parses_by_kind() {
        let mut ed = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), json!({}))
            .unwrap();
        let idx = |ed: &EditorInstance, n: &str| ed.fields().iter().position(|f| f.name == n).unwrap();

        let level = idx(&ed, "level");
        ed.set_field(level, " 7 ").unwrap();
        let tamed = idx(&ed, "tamed");
        ed.set_field(tamed, "true").unwrap();
        let speed = idx(&ed, "speed");
        ed.set_field(speed, "1.5").unwrap();
        let name = idx(&ed, "name");
        ed.set_field(name, "Pyrolizard").unwrap();

        assert_eq!(
            ed.value(),
            &json!({"level": 7, "tamed": true, "speed": 1.5, "name": "Pyrolizard"})
        );
        assert!(ed.is_dirty());
        assert!(ed.errors().is_empty());
    }

    #[test]
    fn set_field_rejects_bad_input() {
        let mut ed = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), json!({}))
            .unwrap();
        let level = ed.fields().iter().position(|f| f.name == "level").unwrap();
        let err = ed.set_field(level, "lots").unwrap_err();
        assert!(matches!(err, EditError::Invalid { expected: "an integer", .. }));

        let abilities = ed.fields().iter().position(|f| f.name == "abilities").unwrap();
        assert_eq!(
            ed.set_field(abilities, "[]"),
            Err(EditError::NotEditable("abilities".into()))
        );
        assert!(!ed.is_dirty());
    }

    #[test]
    fn edit_text_only_for_scalars() {
        let ed = EditorInstance::new(
            "monsters",
            EditorOptions::default(),
            monster_schema(),
            json!({"name": "Bob", "level": 3}),
        )
        .unwrap();
        let pos = |n: &str| ed.fields().iter().position(|f| f.name == n).unwrap();
        assert_eq!(ed.edit_text(pos("name")).as_deref(), Some("Bob"));
        assert_eq!(ed.edit_text(pos("level")).as_deref(), Some("3"));
        assert_eq!(ed.edit_text(pos("speed")).as_deref(), Some(""));
        assert_eq!(ed.edit_text(pos("abilities")), None);
    }

    #[test]
    fn cursor_wraps() {
        let mut ed = EditorInstance::new("monsters", EditorOptions::default(), monster_schema(), json!({}))
            .unwrap();
        ed.move_cursor(-1);
        assert_eq!(ed.cursor(), 4);
        ed.move_cursor(2);
        assert_eq!(ed.cursor(), 1);
    }
}
