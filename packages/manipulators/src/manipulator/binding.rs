//! Model binding options

use super::attrs::AttrValue;
use crate::field::FieldConfig;

pub const MODEL_OPTIONS_ATTR: &str = "ng-model-options";
pub const MODEL_OPTIONS_REF: &str = "options.modelOptions";
pub const GETTER_SETTER_EXPR: &str = "options.value";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingOptions {
    /// `ng-model-options` value, present whenever the field has modelOptions.
    pub options_attr: Option<AttrValue>,
    /// New value for the model-binding attribute; `None` keeps the template's.
    pub model_value_expr: Option<String>,
}

pub fn resolve_model_options(field: &FieldConfig) -> BindingOptions {
    let options_attr = field
        .model_options
        .as_ref()
        .map(|_| AttrValue::Reference(MODEL_OPTIONS_REF.to_string()));

    let model_value_expr = if field.has_getter_setter() {
        Some(GETTER_SETTER_EXPR.to_string())
    } else {
        field
            .key
            .as_ref()
            .filter(|key| key.is_property_accessor())
            .map(|key| format!("model.{}", key))
    };

    BindingOptions {
        options_attr,
        model_value_expr,
    }
}
