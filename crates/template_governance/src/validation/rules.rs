//! Built-in validation rules.

use crate::validation::validator::ValidationContext;
use crate::version::parse_version;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const RULE_REQUIRED_FIELDS: &str = "required-fields";
pub const RULE_VALID_VERSION: &str = "valid-version";
pub const RULE_VALID_ID: &str = "valid-id";
pub const RULE_NON_EMPTY_NAME: &str = "non-empty-name";
pub const RULE_CONTEXT_MATCH: &str = "context-match";

const VERSION_PATH: &str = "version.versionString";

static TEMPLATE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:[._-][a-z0-9]+)*$").expect("template id pattern is a valid regex")
});

/// Failure reported by one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub message: String,
    pub path: Option<String>,
}

impl RuleViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    pub fn at(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

/// One independent check over a template document.
///
/// A rule reports at most one violation per run.
pub trait ValidationRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn check(&self, template: &Value, context: &ValidationContext) -> Option<RuleViolation>;
}

fn string_field<'a>(template: &'a Value, key: &str) -> Option<&'a str> {
    template.get(key).and_then(Value::as_str)
}

fn version_text(template: &Value) -> Option<&str> {
    template
        .get("version")
        .and_then(|version| version.get("versionString"))
        .and_then(Value::as_str)
}

/// `id`, `name` and `version.versionString` must be present strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldsRule;

impl ValidationRule for RequiredFieldsRule {
    fn id(&self) -> &'static str {
        RULE_REQUIRED_FIELDS
    }

    fn check(&self, template: &Value, _context: &ValidationContext) -> Option<RuleViolation> {
        let mut missing = Vec::new();
        if string_field(template, "id").is_none() {
            missing.push("id");
        }
        if string_field(template, "name").is_none() {
            missing.push("name");
        }
        if version_text(template).is_none() {
            missing.push("version");
        }

        match missing.as_slice() {
            [] => None,
            [single] => Some(RuleViolation::at(
                format!("required field is missing or not a string: {single}"),
                *single,
            )),
            many => Some(RuleViolation::new(format!(
                "required fields are missing or not strings: {}",
                many.join(", ")
            ))),
        }
    }
}

/// `version.versionString` must parse as a semantic version when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidVersionRule;

impl ValidationRule for ValidVersionRule {
    fn id(&self) -> &'static str {
        RULE_VALID_VERSION
    }

    fn check(&self, template: &Value, _context: &ValidationContext) -> Option<RuleViolation> {
        let raw = version_text(template)?;
        parse_version(raw)
            .err()
            .map(|err| RuleViolation::at(err.to_string(), VERSION_PATH))
    }
}

/// `id` must be lowercase alphanumerics separated by single `.`, `_` or `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidIdRule;

impl ValidationRule for ValidIdRule {
    fn id(&self) -> &'static str {
        RULE_VALID_ID
    }

    fn check(&self, template: &Value, _context: &ValidationContext) -> Option<RuleViolation> {
        let id = string_field(template, "id")?;
        if TEMPLATE_ID_PATTERN.is_match(id) {
            return None;
        }
        Some(RuleViolation::at(format!("template id is invalid: `{id}`"), "id"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyNameRule;

impl ValidationRule for NonEmptyNameRule {
    fn id(&self) -> &'static str {
        RULE_NON_EMPTY_NAME
    }

    fn check(&self, template: &Value, _context: &ValidationContext) -> Option<RuleViolation> {
        let name = string_field(template, "name")?;
        if name.trim().is_empty() {
            return Some(RuleViolation::at("template name must not be blank", "name"));
        }
        None
    }
}

/// Record id and version must match what the context expects.
///
/// Versions are compared in canonical form when both sides parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextMatchRule;

impl ValidationRule for ContextMatchRule {
    fn id(&self) -> &'static str {
        RULE_CONTEXT_MATCH
    }

    fn check(&self, template: &Value, context: &ValidationContext) -> Option<RuleViolation> {
        let mut mismatches = Vec::new();

        if let (Some(expected), Some(actual)) =
            (context.template_id.as_deref(), string_field(template, "id"))
        {
            if expected != actual {
                mismatches.push(format!("id `{actual}` does not match `{expected}`"));
            }
        }
        if let (Some(expected), Some(actual)) = (context.version.as_deref(), version_text(template))
        {
            if !same_version(expected, actual) {
                mismatches.push(format!("version `{actual}` does not match `{expected}`"));
            }
        }

        if mismatches.is_empty() {
            None
        } else {
            Some(RuleViolation::new(mismatches.join("; ")))
        }
    }
}

fn same_version(left: &str, right: &str) -> bool {
    match (parse_version(left), parse_version(right)) {
        (Ok(left), Ok(right)) => left == right,
        _ => left.trim() == right.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ContextMatchRule, RequiredFieldsRule, ValidIdRule, ValidVersionRule, ValidationRule,
    };
    use crate::validation::ValidationContext;
    use serde_json::json;

    #[test]
    fn required_fields_reports_single_field_with_path() {
        let violation = RequiredFieldsRule
            .check(
                &json!({ "id": "hero", "name": "Hero" }),
                &ValidationContext::default(),
            )
            .expect("missing version must be reported");
        assert_eq!(violation.path.as_deref(), Some("version"));
    }

    #[test]
    fn required_fields_rejects_wrong_types() {
        let violation = RequiredFieldsRule
            .check(
                &json!({ "id": 7, "name": "Hero", "version": "1.0.0" }),
                &ValidationContext::default(),
            )
            .expect("mistyped fields must be reported");
        assert!(violation.message.contains("id, version"));
        assert_eq!(violation.path, None);
    }

    #[test]
    fn valid_version_points_at_version_string() {
        let violation = ValidVersionRule
            .check(
                &json!({ "version": { "versionString": "1.0" } }),
                &ValidationContext::default(),
            )
            .expect("bad version must be reported");
        assert_eq!(violation.path.as_deref(), Some("version.versionString"));
    }

    #[test]
    fn id_grammar() {
        let context = ValidationContext::default();
        for good in ["hero", "landing.hero-v2", "a_b.c"] {
            assert!(ValidIdRule.check(&json!({ "id": good }), &context).is_none(), "{good}");
        }
        for bad in ["", "Hero", "a..b", "-a", "a-", "a b"] {
            assert!(ValidIdRule.check(&json!({ "id": bad }), &context).is_some(), "{bad}");
        }
    }

    #[test]
    fn context_match_uses_canonical_versions() {
        let template = json!({ "id": "hero", "version": { "versionString": "01.0.0" } });
        assert!(ContextMatchRule
            .check(&template, &ValidationContext::new("hero", "1.0.0"))
            .is_none());

        let violation = ContextMatchRule
            .check(&template, &ValidationContext::new("card", "2.0.0"))
            .expect("mismatch must be reported");
        assert!(violation.message.contains("id `hero`"));
        assert!(violation.message.contains("version `01.0.0`"));
    }
}
