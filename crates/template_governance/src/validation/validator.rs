use crate::model::template::TemplateRecord;
use crate::validation::rules::{
    ContextMatchRule, NonEmptyNameRule, RequiredFieldsRule, ValidIdRule, ValidVersionRule,
    ValidationRule,
};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Display, Formatter};

/// Caller-supplied expectations for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    pub template_id: Option<String>,
    pub version: Option<String>,
}

impl ValidationContext {
    pub fn new(template_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            version: Some(version.into()),
        }
    }
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub rule_id: &'static str,
    pub message: String,
    pub path: Option<String>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {} (at `{path}`)", self.rule_id, self.message),
            None => write!(f, "[{}] {}", self.rule_id, self.message),
        }
    }
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.errors.iter().any(|error| error.rule_id == rule_id)
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Ordered rule set applied to template documents.
pub struct TemplateValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for TemplateValidator {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl Debug for TemplateValidator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateValidator")
            .field("rules", &self.rule_ids())
            .finish()
    }
}

impl TemplateValidator {
    /// Creates a validator with no rules.
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn with_default_rules() -> Self {
        let mut validator = Self::empty();
        validator.add_rule(RequiredFieldsRule);
        validator.add_rule(ValidVersionRule);
        validator.add_rule(ValidIdRule);
        validator.add_rule(NonEmptyNameRule);
        validator.add_rule(ContextMatchRule);
        validator
    }

    pub fn add_rule(&mut self, rule: impl ValidationRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    /// Runs every rule against a template document.
    pub fn validate(&self, template: &Value, context: &ValidationContext) -> ValidationReport {
        let errors: Vec<ValidationError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.check(template, context)
                    .map(|violation| ValidationError {
                        rule_id: rule.id(),
                        message: violation.message,
                        path: violation.path,
                    })
            })
            .collect();

        debug!(
            "event=template_validate module=validation status={} errors={}",
            if errors.is_empty() { "ok" } else { "rejected" },
            errors.len()
        );
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validates an owned record against its own id and version.
    pub fn validate_record(&self, record: &TemplateRecord) -> ValidationReport {
        let context = ValidationContext::new(
            record.id.as_str(),
            record.version.version_string.as_str(),
        );
        self.validate(&record.to_document(), &context)
    }
}
