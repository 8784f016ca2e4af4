#![deny(clippy::all)]

/**
 * Formly Manipulators - NAPI-RS Implementation
 *
 * Field template manipulators for form hosts, with optional Node.js bindings
 */

#[cfg(feature = "napi-bindings")]
use napi_derive::napi;

// Core modules
pub mod chars;
pub mod config;
pub mod error;
pub mod logging;
pub mod parse_util;

// Parser modules
pub mod ml_parser;
pub mod selector;

// Manipulation
pub mod field;
pub mod manipulator;
pub mod manipulators;

// Re-exports
pub use config::ManipulatorConfig;
pub use error::{ManipulatorError, Result};
pub use field::{FieldConfig, FieldKey, FieldScope, NgModelAttr, SkipManipulator};
pub use manipulator::NgModelAttrsManipulator;
pub use manipulators::{TemplateManipulator, TemplateManipulators};

/// Run the ng-model attribute manipulator once over `template`.
pub fn manipulate_template(
    template: &str,
    field: &FieldConfig,
    scope: &FieldScope,
    config: ManipulatorConfig,
) -> error::Result<String> {
    NgModelAttrsManipulator::new(config).manipulate(template, field, scope)
}

/// Manipulate a field template for a JavaScript host
///
/// `field`, `scope` and `extras` are JSON; `extras` carries the
/// `ngModelAttrsManipulatorPreferUnbound` flag.
#[cfg(feature = "napi-bindings")]
#[napi(js_name = "manipulateTemplate")]
pub fn manipulate_template_json(
    template: String,
    field: String,
    scope: String,
    extras: Option<String>,
) -> napi::Result<String> {
    let to_napi = |err: ManipulatorError| napi::Error::from_reason(err.to_string());

    let field = FieldConfig::from_json(&field).map_err(to_napi)?;
    let scope = FieldScope::from_json(&scope).map_err(to_napi)?;
    let config = match extras {
        Some(extras) => ManipulatorConfig::from_json(&extras).map_err(to_napi)?,
        None => ManipulatorConfig::default(),
    };

    manipulate_template(&template, &field, &scope, config).map_err(to_napi)
}
