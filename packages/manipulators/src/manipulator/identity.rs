//! Identity of the bound element

use crate::error::{ManipulatorError, Result};
use crate::field::FieldScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub name: String,
}

/// `id` is the scope id; `name` is the scope name, falling back to the id.
pub fn resolve_identity(scope: &FieldScope) -> Result<Identity> {
    if scope.id.is_empty() {
        return Err(ManipulatorError::MissingId);
    }
    let name = scope
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(&scope.id);

    Ok(Identity {
        id: scope.id.clone(),
        name: name.to_string(),
    })
}
