//! Template manipulator registry
//!
//! A form host runs its field templates through a list of manipulators
//! before wrapping them (`pre_wrapper`) and after (`post_wrapper`).

use crate::config::ManipulatorConfig;
use crate::error::Result;
use crate::field::{FieldConfig, FieldScope};
use crate::manipulator::NgModelAttrsManipulator;

/// A pure template transform for one field.
pub trait TemplateManipulator: Send + Sync {
    fn manipulate(&self, template: &str, field: &FieldConfig, scope: &FieldScope) -> Result<String>;
}

impl TemplateManipulator for NgModelAttrsManipulator {
    fn manipulate(&self, template: &str, field: &FieldConfig, scope: &FieldScope) -> Result<String> {
        NgModelAttrsManipulator::manipulate(self, template, field, scope)
    }
}

impl<F> TemplateManipulator for F
where
    F: Fn(&str, &FieldConfig, &FieldScope) -> Result<String> + Send + Sync,
{
    fn manipulate(&self, template: &str, field: &FieldConfig, scope: &FieldScope) -> Result<String> {
        self(template, field, scope)
    }
}

#[derive(Default)]
pub struct TemplateManipulators {
    pub pre_wrapper: Vec<Box<dyn TemplateManipulator>>,
    pub post_wrapper: Vec<Box<dyn TemplateManipulator>>,
}

impl TemplateManipulators {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock registry: the ng-model attribute manipulator runs first
    /// among the pre-wrapper manipulators.
    pub fn with_defaults(config: ManipulatorConfig) -> Self {
        TemplateManipulators {
            pre_wrapper: vec![Box::new(NgModelAttrsManipulator::new(config))],
            post_wrapper: Vec::new(),
        }
    }

    pub fn add_pre_wrapper(&mut self, manipulator: impl TemplateManipulator + 'static) {
        self.pre_wrapper.push(Box::new(manipulator));
    }

    pub fn add_post_wrapper(&mut self, manipulator: impl TemplateManipulator + 'static) {
        self.post_wrapper.push(Box::new(manipulator));
    }

    pub fn run_pre_wrapper(&self, template: &str, field: &FieldConfig, scope: &FieldScope) -> Result<String> {
        run_all(&self.pre_wrapper, template, field, scope)
    }

    pub fn run_post_wrapper(&self, template: &str, field: &FieldConfig, scope: &FieldScope) -> Result<String> {
        run_all(&self.post_wrapper, template, field, scope)
    }
}

fn run_all(
    manipulators: &[Box<dyn TemplateManipulator>],
    template: &str,
    field: &FieldConfig,
    scope: &FieldScope,
) -> Result<String> {
    manipulators
        .iter()
        .try_fold(template.to_string(), |current, manipulator| {
            manipulator.manipulate(&current, field, scope)
        })
}
