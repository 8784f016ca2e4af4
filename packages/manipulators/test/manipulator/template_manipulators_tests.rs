use std::sync::{Arc, Mutex};

use formly_manipulators::logging::{LogLevel, Logger};
use formly_manipulators::{
    manipulate_template, FieldConfig, FieldScope, ManipulatorConfig, ManipulatorError,
    NgModelAttrsManipulator, Result, TemplateManipulator, TemplateManipulators,
};
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"<input ng-model="model[options.key]">"#;

    fn wrap_in_div(template: &str, _field: &FieldConfig, _scope: &FieldScope) -> Result<String> {
        Ok(format!("<div>{}</div>", template))
    }

    fn append_label(template: &str, _field: &FieldConfig, scope: &FieldScope) -> Result<String> {
        Ok(format!("{}<label for=\"{}\"></label>", template, scope.id))
    }

    fn always_fail(_template: &str, _field: &FieldConfig, _scope: &FieldScope) -> Result<String> {
        Err(ManipulatorError::MissingId)
    }

    #[derive(Clone, Default)]
    struct RecordingLogger {
        messages: Arc<Mutex<Vec<(LogLevel, String)>>>,
    }

    impl RecordingLogger {
        fn record(&self, level: LogLevel, msg: &str) {
            self.messages.lock().unwrap().push((level, msg.to_string()));
        }

        fn at(&self, level: LogLevel) -> Vec<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, msg)| msg.clone())
                .collect()
        }
    }

    impl Logger for RecordingLogger {
        fn level(&self) -> LogLevel {
            LogLevel::Debug
        }
        fn debug(&self, msg: &str) {
            self.record(LogLevel::Debug, msg);
        }
        fn info(&self, msg: &str) {
            self.record(LogLevel::Info, msg);
        }
        fn warn(&self, msg: &str) {
            self.record(LogLevel::Warn, msg);
        }
        fn error(&self, msg: &str) {
            self.record(LogLevel::Error, msg);
        }
    }

    #[test]
    fn should_register_ng_model_attrs_manipulator_by_default() {
        let manipulators = TemplateManipulators::with_defaults(ManipulatorConfig::default());
        assert_eq!(manipulators.pre_wrapper.len(), 1);
        assert!(manipulators.post_wrapper.is_empty());

        let result = manipulators
            .run_pre_wrapper(TEMPLATE, &FieldConfig::default(), &FieldScope::new("f"))
            .unwrap();
        assert_eq!(result, r#"<input ng-model="model[options.key]" id="f" name="f">"#);
    }

    #[test]
    fn should_return_template_unchanged_with_empty_registry() {
        let manipulators = TemplateManipulators::new();
        let field = FieldConfig::default();
        let scope = FieldScope::new("f");
        assert_eq!(manipulators.run_pre_wrapper(TEMPLATE, &field, &scope).unwrap(), TEMPLATE);
        assert_eq!(manipulators.run_post_wrapper(TEMPLATE, &field, &scope).unwrap(), TEMPLATE);
    }

    #[test]
    fn should_run_manipulators_in_registration_order() {
        let mut manipulators = TemplateManipulators::with_defaults(ManipulatorConfig::default());
        manipulators.add_pre_wrapper(wrap_in_div);
        manipulators.add_pre_wrapper(append_label);

        let result = manipulators
            .run_pre_wrapper(TEMPLATE, &FieldConfig::default(), &FieldScope::new("f"))
            .unwrap();
        assert_eq!(
            result,
            r#"<div><input ng-model="model[options.key]" id="f" name="f"></div><label for="f"></label>"#
        );
    }

    #[test]
    fn should_keep_pre_and_post_wrapper_lists_separate() {
        let mut manipulators = TemplateManipulators::new();
        manipulators.add_post_wrapper(wrap_in_div);

        let field = FieldConfig::default();
        let scope = FieldScope::new("f");
        assert_eq!(manipulators.run_pre_wrapper(TEMPLATE, &field, &scope).unwrap(), TEMPLATE);
        assert_eq!(
            manipulators.run_post_wrapper(TEMPLATE, &field, &scope).unwrap(),
            format!("<div>{}</div>", TEMPLATE)
        );
    }

    #[test]
    fn should_stop_at_the_first_failing_manipulator() {
        let mut manipulators = TemplateManipulators::new();
        manipulators.add_pre_wrapper(always_fail);
        manipulators.add_pre_wrapper(wrap_in_div);

        let err = manipulators
            .run_pre_wrapper(TEMPLATE, &FieldConfig::default(), &FieldScope::new("f"))
            .unwrap_err();
        assert!(matches!(err, ManipulatorError::MissingId));
    }

    #[test]
    fn should_accept_configured_manipulators() {
        let mut manipulators = TemplateManipulators::new();
        manipulators
            .add_pre_wrapper(NgModelAttrsManipulator::new(ManipulatorConfig::new().with_prefer_unbound(true)));

        let field: FieldConfig = serde_json::from_value(json!({"templateOptions": {"maxlength": 5}})).unwrap();
        let result = manipulators
            .run_pre_wrapper(TEMPLATE, &field, &FieldScope::new("f"))
            .unwrap();
        assert!(result.contains(r#"maxlength="5""#));
        assert!(!result.contains("ng-maxlength"));
    }

    #[test]
    fn should_be_usable_as_trait_object() {
        let manipulator: Box<dyn TemplateManipulator> = Box::new(NgModelAttrsManipulator::default());
        let result = manipulator
            .manipulate(TEMPLATE, &FieldConfig::default(), &FieldScope::new("f"))
            .unwrap();
        assert!(result.contains(r#"id="f""#));
    }

    #[test]
    fn should_manipulate_template_through_free_function() {
        let scope = FieldScope::from_json(r#"{"id": "email", "name": "contact_email"}"#).unwrap();
        let field = FieldConfig::from_json(r#"{"key": "contact.email", "templateOptions": {"type": "email"}}"#).unwrap();
        let config = ManipulatorConfig::from_json(r#"{"ngModelAttrsManipulatorPreferUnbound": false}"#).unwrap();

        let result = manipulate_template(TEMPLATE, &field, &scope, config).unwrap();
        assert_eq!(
            result,
            r#"<input ng-model="model.contact.email" id="email" name="contact_email" type="email">"#
        );
    }

    #[test]
    fn should_report_invalid_field_json() {
        let err = FieldConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ManipulatorError::Json(_)));
    }

    #[test]
    fn should_log_skipped_and_missing_elements() {
        let logger = RecordingLogger::default();
        let manipulator = NgModelAttrsManipulator::default().with_logger(logger.clone());
        let field: FieldConfig =
            serde_json::from_value(json!({"data": {"skipNgModelAttrsManipulator": ".skip"}})).unwrap();
        let scope = FieldScope::new("f");

        let template = r#"<input class="skip" ng-model="x">"#;
        assert_eq!(manipulator.manipulate(template, &field, &scope).unwrap(), template);
        assert!(logger
            .at(LogLevel::Debug)
            .iter()
            .any(|msg| msg.contains("skip selector")));

        let plain = "<p>no inputs</p>";
        assert_eq!(manipulator.manipulate(plain, &field, &scope).unwrap(), plain);
        assert_eq!(logger.at(LogLevel::Warn).len(), 1);
    }
}
