//! Rule-based template validation.
//!
//! # Responsibility
//! - Run every registered rule against a template document.
//! - Collect all failures instead of stopping at the first one.
//!
//! # Invariants
//! - Rules are independent; one rule's failure never skips another.
//! - `valid` is true iff no rule reported an error.

mod rules;
mod validator;

pub use rules::{
    ContextMatchRule, NonEmptyNameRule, RequiredFieldsRule, RuleViolation, ValidIdRule,
    ValidVersionRule, ValidationRule, RULE_CONTEXT_MATCH, RULE_NON_EMPTY_NAME,
    RULE_REQUIRED_FIELDS, RULE_VALID_ID, RULE_VALID_VERSION,
};
pub use validator::{TemplateValidator, ValidationContext, ValidationError, ValidationReport};
