//! Skip evaluation
//!
//! Decides which model-bound elements the manipulator must leave alone.

use crate::error::Result;
use crate::field::{FieldConfig, SkipManipulator};
use crate::ml_parser::Element;
use crate::selector::ElementMatcher;

/// Marker attribute that exempts a single element.
pub const SKIP_MARKER_ATTR: &str = "formly-skip-ng-model-attrs-manipulator";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Marker,
    Selector,
}

/// Skip decisions for the candidate elements of one template.
///
/// The selector is matched once against the whole fragment, so it may
/// reach an element through its ancestors or siblings.
pub struct SkipEvaluator {
    selected: Vec<bool>,
}

impl SkipEvaluator {
    pub fn new(
        field: &FieldConfig,
        matcher: &dyn ElementMatcher,
        template: &str,
        candidates: &[&Element],
    ) -> Result<Self> {
        let selected = match field.skip_setting() {
            Some(SkipManipulator::Selector(selector)) if !selector.trim().is_empty() => {
                matcher.select(template, candidates, selector)?
            }
            _ => vec![false; candidates.len()],
        };
        Ok(SkipEvaluator { selected })
    }

    /// `true` skips the whole fragment before it is even parsed.
    pub fn skips_all(field: &FieldConfig) -> bool {
        matches!(field.skip_setting(), Some(SkipManipulator::Bool(true)))
    }

    /// Why the `index`-th candidate is skipped, if it is.
    pub fn skip_reason(&self, index: usize, element: &Element) -> Option<SkipReason> {
        if element.has_attr(SKIP_MARKER_ATTR) {
            Some(SkipReason::Marker)
        } else if self.selected.get(index).copied().unwrap_or(false) {
            Some(SkipReason::Selector)
        } else {
            None
        }
    }
}
