//! Template rewriter
//!
//! Finds the model-bound elements of a field template and writes the
//! resolved attributes onto every one that is not skipped.

use super::attrs::{
    resolve_custom_validation, resolve_element_attrs, resolve_template_options, AttrValue,
    ResolvedAttrs, CUSTOM_VALIDATION_ATTR,
};
use super::binding::{resolve_model_options, MODEL_OPTIONS_ATTR};
use super::identity::resolve_identity;
use super::skip::{SkipEvaluator, SkipReason};
use crate::config::ManipulatorConfig;
use crate::error::{ManipulatorError, Result};
use crate::field::{FieldConfig, FieldScope};
use crate::logging::{Logger, NullLogger};
use crate::ml_parser::{all_elements, apply_edits, serialize_attribute, Element, Parser, TextEdit};
use crate::selector::{CssSelectorMatcher, ElementMatcher};

/// Attributes that bind an element to the field's model value.
pub const MODEL_BINDING_ATTRS: &[&str] = &["ng-model", "data-ng-model"];

const TEMPLATE_URL: &str = "ng-model-attrs-template.html";

/// Everything the manipulator writes onto one bound element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRewrite {
    pub attrs: ResolvedAttrs,
    /// Replacement value for the element's model-binding attribute.
    pub model_value_expr: Option<String>,
}

/// Adds id/name, validation, model-options and templateOptions attributes
/// to the `ng-model` elements of a field template.
pub struct NgModelAttrsManipulator {
    config: ManipulatorConfig,
    matcher: Box<dyn ElementMatcher + Send + Sync>,
    logger: Box<dyn Logger>,
}

impl NgModelAttrsManipulator {
    pub fn new(config: ManipulatorConfig) -> Self {
        NgModelAttrsManipulator {
            config,
            matcher: Box::new(CssSelectorMatcher::new()),
            logger: Box::new(NullLogger::new()),
        }
    }

    pub fn with_matcher(mut self, matcher: impl ElementMatcher + Send + Sync + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    pub fn config(&self) -> &ManipulatorConfig {
        &self.config
    }

    /// Rewrite `template` for `field`.
    ///
    /// Untouched markup is returned byte for byte; a fragment without any
    /// bound element, or a field that opts out entirely, comes back unchanged.
    pub fn manipulate(
        &self,
        template: &str,
        field: &FieldConfig,
        scope: &FieldScope,
    ) -> Result<String> {
        if SkipEvaluator::skips_all(field) {
            self.logger
                .debug("skipNgModelAttrsManipulator is true; template left unchanged");
            return Ok(template.to_string());
        }

        let parsed = Parser::new().parse(template, TEMPLATE_URL);
        if parsed.has_errors() {
            for error in &parsed.errors {
                self.logger.debug(&error.contextual_message(&parsed.file, 20));
            }
            return Err(ManipulatorError::Parse(parsed.errors));
        }

        let candidates: Vec<&Element> = all_elements(&parsed.root_nodes)
            .into_iter()
            .filter(|el| model_binding_attr(el).is_some())
            .collect();
        if candidates.is_empty() {
            self.logger.warn("template has no ng-model element; nothing to manipulate");
            return Ok(template.to_string());
        }

        let evaluator = SkipEvaluator::new(field, self.matcher.as_ref(), template, &candidates)?;
        let mut targets = Vec::with_capacity(candidates.len());
        for (index, el) in candidates.iter().copied().enumerate() {
            match evaluator.skip_reason(index, el) {
                Some(SkipReason::Marker) => self.logger.debug(&format!(
                    "<{}> carries the skip marker; left unchanged",
                    el.name
                )),
                Some(SkipReason::Selector) => self.logger.debug(&format!(
                    "<{}> matches the skip selector; left unchanged",
                    el.name
                )),
                None => targets.push(el),
            }
        }
        if targets.is_empty() {
            return Ok(template.to_string());
        }

        let rewrite = self.resolve(field, scope)?;
        let edits = targets
            .iter()
            .flat_map(|el| element_edits(el, &rewrite))
            .collect();

        self.logger.debug(&format!(
            "rewrote {} ng-model element(s) with {} attribute(s)",
            targets.len(),
            rewrite.attrs.len()
        ));
        apply_edits(template, edits)
    }

    /// The attribute set for a field, independent of any template.
    pub fn resolve(&self, field: &FieldConfig, scope: &FieldScope) -> Result<ElementRewrite> {
        let mut attrs = ResolvedAttrs::new();

        let identity = resolve_identity(scope)?;
        attrs.insert("id", AttrValue::Literal(identity.id));
        attrs.insert("name", AttrValue::Literal(identity.name));

        if resolve_custom_validation(field) {
            attrs.insert(CUSTOM_VALIDATION_ATTR, AttrValue::Bare);
        }

        let binding = resolve_model_options(field);
        if let Some(options) = binding.options_attr {
            attrs.insert(MODEL_OPTIONS_ATTR, options);
        }

        attrs.extend(resolve_template_options(field, &self.config)?);
        attrs.extend(resolve_element_attrs(field));

        Ok(ElementRewrite {
            attrs,
            model_value_expr: binding.model_value_expr,
        })
    }
}

impl Default for NgModelAttrsManipulator {
    fn default() -> Self {
        Self::new(ManipulatorConfig::default())
    }
}

fn model_binding_attr(el: &Element) -> Option<&str> {
    MODEL_BINDING_ATTRS
        .iter()
        .copied()
        .find(|name| el.has_attr(name))
}

/// Source edits that apply `rewrite` to one element's start tag. Existing
/// attributes are replaced in place; new ones are appended after the last
/// attribute in resolution order.
fn element_edits(el: &Element, rewrite: &ElementRewrite) -> Vec<TextEdit> {
    let mut edits = Vec::new();

    if let (Some(expr), Some(binding_name)) = (&rewrite.model_value_expr, model_binding_attr(el)) {
        if !rewrite.attrs.contains(binding_name) {
            if let Some(attr) = el.get_attr(binding_name) {
                edits.push(TextEdit::replace(
                    attr.source_span.start.offset,
                    attr.source_span.end.offset,
                    serialize_attribute(&attr.name, Some(expr)),
                ));
            }
        }
    }

    let insertion_offset = el.attr_insertion_offset();
    for (name, value) in rewrite.attrs.iter() {
        let text = value.text();
        match el.get_attr(name) {
            Some(existing) => edits.push(TextEdit::replace(
                existing.source_span.start.offset,
                existing.source_span.end.offset,
                serialize_attribute(&existing.name, text.as_deref()),
            )),
            None => edits.push(TextEdit::insert(
                insertion_offset,
                format!(" {}", serialize_attribute(name, text.as_deref())),
            )),
        }
    }

    edits
}
