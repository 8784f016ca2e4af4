//! ng-model attribute manipulator
//!
//! Resolves the attributes a field implies (identity, validation marker,
//! model options, templateOptions rules) and writes them onto the field
//! template's model-bound elements.

pub mod attrs;
pub mod binding;
pub mod identity;
pub mod rewriter;
pub mod skip;

pub use attrs::{built_in_rules, template_option_ref, AttrValue, ResolvedAttrs};
pub use binding::{resolve_model_options, BindingOptions};
pub use identity::{resolve_identity, Identity};
pub use rewriter::{ElementRewrite, NgModelAttrsManipulator, MODEL_BINDING_ATTRS};
pub use skip::{SkipEvaluator, SkipReason, SKIP_MARKER_ATTR};
