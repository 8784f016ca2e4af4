//! Attribute resolution
//!
//! Turns a field configuration into the ordered set of attributes the bound
//! element should carry. Each templateOptions rule is an [`NgModelAttr`]
//! whose filled slots select the policy:
//!
//! | slots                  | override present          | literal present                 |
//! |------------------------|---------------------------|---------------------------------|
//! | `bound`                | `bound` = reference       | `bound` = reference             |
//! | `boolean` + `bound`    | `bound` = reference       | bare `boolean` if truthy        |
//! | `attribute` + `bound`  | `bound` = reference       | `attribute` = literal           |
//! | `attribute`            | `attribute` = `{{reference}}` | `attribute` = literal       |
//! | `statement`            | nothing                   | `statement` = `$eval(reference)` |
//! | `value`                | `value` = rule name       | `value` = rule name             |
//!
//! An override always wins over a literal for the same rule.

use indexmap::IndexMap;

use crate::config::ManipulatorConfig;
use crate::error::{ManipulatorError, Result};
use crate::field::{is_truthy, stringify_literal, FieldConfig, NgModelAttr};

pub const CUSTOM_VALIDATION_ATTR: &str = "formly-custom-validation";

const BOUND_ONLY: &[&str] = &[];
const BOTH_BOOLEAN_AND_BOUND: &[&str] = &["required", "disabled"];
const BOTH_ATTRIBUTE_AND_BOUND: &[&str] = &["pattern", "minlength"];
const STATEMENT_ONLY: &[&str] = &["change", "keydown", "keyup", "keypress", "click", "focus", "blur"];
const ATTRIBUTE_ONLY: &[&str] = &["placeholder", "min", "max", "step", "tabindex", "type"];

/// Options that default to the bound form but can be emitted unbound.
const PREFER_BOUND: &[&str] = &["maxlength"];

/// Value of a resolved attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Valueless attribute (`required`).
    Bare,
    /// Static text copied verbatim.
    Literal(String),
    /// Expression the framework evaluates (`options.templateOptions['x']`).
    Reference(String),
    /// Expression written as `{{...}}` interpolation.
    Interpolation(String),
}

impl AttrValue {
    /// Attribute text, or `None` for a bare attribute.
    pub fn text(&self) -> Option<String> {
        match self {
            AttrValue::Bare => None,
            AttrValue::Literal(text) | AttrValue::Reference(text) => Some(text.clone()),
            AttrValue::Interpolation(expr) => Some(format!("{{{{{}}}}}", expr)),
        }
    }
}

/// Ordered attribute name → value mapping.
///
/// Names are ASCII-lowercased like HTML attribute names, so `NAME` and
/// `name` are one entry; a later insert replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAttrs {
    attrs: IndexMap<String, AttrValue>,
}

impl ResolvedAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) {
        let mut name = name.into();
        name.make_ascii_lowercase();
        self.attrs.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name.to_ascii_lowercase().as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name.to_ascii_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn extend(&mut self, other: ResolvedAttrs) {
        // Both sides are already lowercased.
        self.attrs.extend(other.attrs);
    }
}

/// Reference expression for a templateOptions property.
pub fn template_option_ref(prop: &str) -> String {
    format!("options.templateOptions['{}']", prop)
}

impl NgModelAttr {
    pub fn bound_only(name: &str) -> Self {
        NgModelAttr {
            bound: Some(format!("ng-{}", name)),
            ..Default::default()
        }
    }

    pub fn boolean_and_bound(name: &str) -> Self {
        NgModelAttr {
            boolean: Some(name.to_string()),
            bound: Some(format!("ng-{}", name)),
            ..Default::default()
        }
    }

    pub fn attribute_and_bound(name: &str) -> Self {
        NgModelAttr {
            attribute: Some(name.to_string()),
            bound: Some(format!("ng-{}", name)),
            ..Default::default()
        }
    }

    pub fn statement_only(name: &str) -> Self {
        NgModelAttr {
            statement: Some(format!("ng-{}", name)),
            ..Default::default()
        }
    }

    pub fn attribute_only(name: &str) -> Self {
        NgModelAttr {
            attribute: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// Resolve this rule (registered under `name`) against a field.
    pub fn resolve(&self, name: &str, field: &FieldConfig) -> Result<Option<(String, AttrValue)>> {
        let prop = self.prop.as_deref().unwrap_or(name);
        let reference = template_option_ref(prop);
        let literal = field.template_option(prop);
        let overridden = field.expression_override(prop).is_some();

        if let Some(attr) = &self.value {
            return Ok(Some((attr.clone(), AttrValue::Literal(name.to_string()))));
        }

        if let (Some(statement), Some(literal)) = (&self.statement, literal) {
            if !literal.is_string() {
                return Err(ManipulatorError::InvalidStatementOption {
                    name: prop.to_string(),
                });
            }
            return Ok(Some((
                statement.clone(),
                AttrValue::Reference(format!("$eval({})", reference)),
            )));
        }

        if let (Some(bound), true) = (&self.bound, overridden) {
            return Ok(Some((bound.clone(), AttrValue::Reference(reference))));
        }

        if let (Some(attr), true) = (self.attribute.as_ref().or(self.boolean.as_ref()), overridden) {
            return Ok(Some((attr.clone(), AttrValue::Interpolation(reference))));
        }

        if let (Some(attr), Some(literal)) = (&self.attribute, literal) {
            return Ok(Some((attr.clone(), AttrValue::Literal(stringify_literal(literal)))));
        }

        // A boolean rule never falls through to its bound form.
        if let Some(boolean) = &self.boolean {
            return Ok(literal
                .filter(|value| is_truthy(value))
                .map(|_| (boolean.clone(), AttrValue::Bare)));
        }

        if let (Some(bound), Some(_)) = (&self.bound, literal) {
            return Ok(Some((bound.clone(), AttrValue::Reference(reference))));
        }

        Ok(None)
    }
}

/// The built-in templateOptions rule table, in application order.
pub fn built_in_rules(config: &ManipulatorConfig) -> IndexMap<String, NgModelAttr> {
    let mut rules = IndexMap::new();

    let (bound_only, attribute_and_bound): (Vec<&str>, Vec<&str>) = if config.prefer_unbound {
        (
            BOUND_ONLY.to_vec(),
            [BOTH_ATTRIBUTE_AND_BOUND, PREFER_BOUND].concat(),
        )
    } else {
        (
            [BOUND_ONLY, PREFER_BOUND].concat(),
            BOTH_ATTRIBUTE_AND_BOUND.to_vec(),
        )
    };

    for name in bound_only {
        rules.insert(name.to_string(), NgModelAttr::bound_only(name));
    }
    for name in BOTH_BOOLEAN_AND_BOUND {
        rules.insert(name.to_string(), NgModelAttr::boolean_and_bound(name));
    }
    for name in attribute_and_bound {
        rules.insert(name.to_string(), NgModelAttr::attribute_and_bound(name));
    }
    for name in STATEMENT_ONLY {
        rules.insert(name.to_string(), NgModelAttr::statement_only(name));
    }
    for name in ATTRIBUTE_ONLY {
        rules.insert(name.to_string(), NgModelAttr::attribute_only(name));
    }

    rules
}

/// Attributes produced by the templateOptions rules: built-ins first, with
/// the field's own `ngModelAttrs` replacing or extending them.
pub fn resolve_template_options(
    field: &FieldConfig,
    config: &ManipulatorConfig,
) -> Result<ResolvedAttrs> {
    let mut resolved = ResolvedAttrs::new();
    if field.template_options.is_empty()
        && field.expression_properties.is_empty()
        && field.ng_model_attrs.is_empty()
    {
        return Ok(resolved);
    }

    let mut rules = built_in_rules(config);
    rules.extend(field.ng_model_attrs.clone());

    for (name, rule) in &rules {
        if let Some((attr, value)) = rule.resolve(name, field)? {
            resolved.insert(attr, value);
        }
    }
    Ok(resolved)
}

/// Whether the element needs the custom-validation marker.
pub fn resolve_custom_validation(field: &FieldConfig) -> bool {
    !field.validators.is_empty() || !field.validation.messages.is_empty()
}

/// `ngModelElAttrs`, copied onto the element as literals.
pub fn resolve_element_attrs(field: &FieldConfig) -> ResolvedAttrs {
    let mut resolved = ResolvedAttrs::new();
    for (name, value) in &field.ng_model_el_attrs {
        resolved.insert(name.clone(), AttrValue::Literal(stringify_literal(value)));
    }
    resolved
}
