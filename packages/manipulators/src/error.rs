//! Manipulator errors

use crate::parse_util::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManipulatorError {
    #[error("Template parse errors:\n{}", join_errors(.0))]
    Parse(Vec<ParseError>),

    #[error("Invalid skip selector \"{selector}\": {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Field scope has no id; an id is required to name the bound element")]
    MissingId,

    #[error("templateOptions.{name} must be a string to be used as a statement")]
    InvalidStatementOption { name: String },

    #[error("Template edit {start}..{end} overlaps another edit or runs past the template")]
    OverlappingEdits { start: usize, end: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ManipulatorError>;

fn join_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
