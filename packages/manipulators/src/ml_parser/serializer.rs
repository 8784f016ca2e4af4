//! Fragment serializer
//!
//! Output is the original source with a set of non-overlapping text edits
//! spliced in, so every byte outside an edit is preserved.

use crate::error::{ManipulatorError, Result};

/// Replace `source[start..end]` with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl TextEdit {
    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        TextEdit {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset, offset, text)
    }
}

/// Apply `edits` to `source`. Insertions at the same offset keep their order;
/// edits whose ranges overlap are rejected.
pub fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> Result<String> {
    edits.sort_by_key(|edit| (edit.start, edit.end));

    let added: usize = edits.iter().map(|edit| edit.text.len()).sum();
    let mut output = String::with_capacity(source.len() + added);
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor
            || edit.start > edit.end
            || !source.is_char_boundary(edit.start)
            || !source.is_char_boundary(edit.end)
        {
            return Err(ManipulatorError::OverlappingEdits {
                start: edit.start,
                end: edit.end,
            });
        }
        output.push_str(&source[cursor..edit.start]);
        output.push_str(&edit.text);
        cursor = edit.end;
    }
    output.push_str(&source[cursor..]);
    Ok(output)
}

/// `name="value"`, or the bare `name` when there is no value.
pub fn serialize_attribute(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{}=\"{}\"", name, escape_attribute_value(value)),
        None => name.to_string(),
    }
}

fn escape_attribute_value(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
