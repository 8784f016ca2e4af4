//! Manipulator configuration
//!
//! Flags that a form host would otherwise keep in its global `extras`
//! object. They are passed to every manipulation explicitly.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManipulatorConfig {
    /// Emit a literal `maxlength` as the plain attribute instead of `ng-maxlength`.
    #[serde(rename = "ngModelAttrsManipulatorPreferUnbound", default)]
    pub prefer_unbound: bool,
}

impl ManipulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefer_unbound(mut self, prefer_unbound: bool) -> Self {
        self.prefer_unbound = prefer_unbound;
        self
    }

    /// Read the flags out of an `extras` JSON object; unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ManipulatorConfig = serde_json::from_str(json)?;
        Ok(config)
    }
}
