//! Selector Matching - CSS Selector Matching
//!
//! Resolves the skip selector of a field against the model-bound elements of
//! its template. Matching runs on an HTML5 tree of the whole fragment, so
//! combinators, attribute operators and structural pseudo-classes behave the
//! way they do in a browser.

use scraper::{Html, Selector};

use crate::error::{ManipulatorError, Result};
use crate::ml_parser::{apply_edits, serialize_attribute, Element, TextEdit};

/// Attribute used to map matched HTML5 elements back to parsed elements.
pub const NODE_INDEX_ATTR: &str = "data-formly-node-index";

/// Answers "which of these elements does this selector match".
///
/// `elements` are parsed from `template`; the result holds one flag per
/// element, in the same order. The manipulator only depends on this
/// capability, so hosts can plug in a different selector engine.
pub trait ElementMatcher {
    fn select(&self, template: &str, elements: &[&Element], selector: &str) -> Result<Vec<bool>>;
}

/// [`ElementMatcher`] backed by the `scraper` CSS engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssSelectorMatcher;

impl CssSelectorMatcher {
    pub fn new() -> Self {
        CssSelectorMatcher
    }

    /// Parse a selector list, rejecting anything the engine cannot match
    /// in full.
    pub fn compile(selector: &str) -> Result<Selector> {
        if selector.trim().is_empty() {
            return Err(ManipulatorError::InvalidSelector {
                selector: selector.to_string(),
                reason: "empty selector".to_string(),
            });
        }
        Selector::parse(selector).map_err(|e| ManipulatorError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }
}

impl ElementMatcher for CssSelectorMatcher {
    fn select(&self, template: &str, elements: &[&Element], selector: &str) -> Result<Vec<bool>> {
        let compiled = Self::compile(selector)?;
        let mut matched = vec![false; elements.len()];
        if elements.is_empty() {
            return Ok(matched);
        }

        let document = Html::parse_fragment(&tag_elements(template, elements)?);
        for el in document.select(&compiled) {
            let index = el
                .value()
                .attr(NODE_INDEX_ATTR)
                .and_then(|value| value.parse::<usize>().ok());
            if let Some(flag) = index.and_then(|i| matched.get_mut(i)) {
                *flag = true;
            }
        }
        Ok(matched)
    }
}

/// Copy of `template` with every element in `elements` tagged by its index.
fn tag_elements(template: &str, elements: &[&Element]) -> Result<String> {
    let edits = elements
        .iter()
        .enumerate()
        .map(|(i, el)| {
            TextEdit::insert(
                el.attr_insertion_offset(),
                format!(" {}", serialize_attribute(NODE_INDEX_ATTR, Some(&i.to_string()))),
            )
        })
        .collect();
    apply_edits(template, edits)
}
