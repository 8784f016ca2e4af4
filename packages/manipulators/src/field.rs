//! Field configuration and scope
//!
//! Serde model of the per-field configuration object a form host hands to
//! the template manipulators, plus the evaluation scope carrying the field's
//! id and name. Everything here is read-only input.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::Result;

/// `templateOptions.p`, `templateOptions['p']` or `templateOptions["p"]`
static TEMPLATE_OPTION_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^templateOptions(?:\.([\w$]+)|\['([^']*)'\]|\["([^"]*)"\])$"#).unwrap()
});

/// `key` of a field: a model property path, or any numeric key.
///
/// Numbers are kept as JSON numbers so negative and fractional keys
/// survive; they never address a nested property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldKey {
    Name(String),
    Number(Number),
}

impl FieldKey {
    /// `a.b`, `a[0]` and similar keys address a nested model property.
    pub fn is_property_accessor(&self) -> bool {
        match self {
            FieldKey::Name(key) => {
                key.contains('.') || (key.contains('[') && key.contains(']'))
            }
            FieldKey::Number(_) => false,
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKey::Name(key) => write!(f, "{}", key),
            FieldKey::Number(number) => write!(f, "{}", stringify_number(number)),
        }
    }
}

/// `skipNgModelAttrsManipulator`: skip everything, or skip what a selector matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkipManipulator {
    Bool(bool),
    Selector(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    #[serde(default)]
    pub skip_ng_model_attrs_manipulator: Option<SkipManipulator>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: IndexMap<String, Value>,
}

/// A rule describing how one templateOptions entry becomes an attribute.
///
/// Every slot is an attribute name; which slots are filled decides the
/// policy (see [`crate::manipulator::attrs`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgModelAttr {
    /// Plain attribute: literal value, or `{{reference}}` when overridden.
    #[serde(default)]
    pub attribute: Option<String>,
    /// Expression-bound attribute whose value is the option reference.
    #[serde(default)]
    pub bound: Option<String>,
    /// Valueless attribute present when the literal is truthy.
    #[serde(default)]
    pub boolean: Option<String>,
    /// Event attribute evaluating the option as a statement.
    #[serde(default)]
    pub statement: Option<String>,
    /// Attribute always set to the rule's own name.
    #[serde(default)]
    pub value: Option<String>,
    /// templateOptions property to read, when it differs from the rule name.
    #[serde(default)]
    pub prop: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(default)]
    pub key: Option<FieldKey>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template_options: IndexMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expression_properties: IndexMap<String, Value>,
    #[serde(default)]
    pub model_options: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validators: IndexMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub validation: Validation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: FieldData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extras: FieldData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ng_model_attrs: IndexMap<String, NgModelAttr>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ng_model_el_attrs: IndexMap<String, Value>,
}

impl FieldConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let field: FieldConfig = serde_json::from_str(json)?;
        Ok(field)
    }

    /// The skip setting, read from `data` first and `extras` second.
    pub fn skip_setting(&self) -> Option<&SkipManipulator> {
        self.data
            .skip_ng_model_attrs_manipulator
            .as_ref()
            .or(self.extras.skip_ng_model_attrs_manipulator.as_ref())
    }

    /// Literal templateOptions value; `null` counts as absent.
    pub fn template_option(&self, prop: &str) -> Option<&Value> {
        self.template_options.get(prop).filter(|v| !v.is_null())
    }

    /// Expression-property override for a templateOptions property, under
    /// any of the `templateOptions.p`, `templateOptions['p']` and
    /// `templateOptions["p"]` spellings.
    pub fn expression_override(&self, prop: &str) -> Option<&Value> {
        self.expression_properties
            .iter()
            .find(|(path, _)| template_option_path(path) == Some(prop))
            .map(|(_, value)| value)
            .filter(|v| !v.is_null())
    }

    pub fn has_getter_setter(&self) -> bool {
        self.model_options
            .as_ref()
            .and_then(|options| options.get("getterSetter"))
            .is_some_and(is_truthy)
    }
}

/// Evaluation scope of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldScope {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl FieldScope {
    pub fn new(id: impl Into<String>) -> Self {
        FieldScope {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let scope: FieldScope = serde_json::from_str(json)?;
        Ok(scope)
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The templateOptions property an expressionProperties key overrides.
fn template_option_path(path: &str) -> Option<&str> {
    let caps = TEMPLATE_OPTION_PATH.captures(path)?;
    (1..=3).find_map(|group| caps.get(group)).map(|m| m.as_str())
}

/// A literal as it reads once written into an attribute, following
/// JavaScript `String(value)`: arrays join their items with commas and
/// objects read `[object Object]`.
pub fn stringify_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => stringify_number(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => stringify_literal(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

fn stringify_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
