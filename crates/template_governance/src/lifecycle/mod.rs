//! Template lifecycle governance.
//!
//! # Responsibility
//! - Own template records and their `status`/`locked` state.
//! - Enforce the `draft -> preview -> published -> deprecated` state machine.
//! - Gate content edits behind the lock.
//!
//! # Invariants
//! - A rejected transition or unlock leaves the record untouched.
//! - Content edits never change `status` or `locked`.

use crate::version::VersionError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod governance;
mod status;

pub use governance::TemplateGovernance;
pub use status::TemplateStatus;

/// Lifecycle and lock errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    InvalidTemplateId(String),
    TemplateNotFound(String),
    DuplicateTemplate(String),
    IllegalTransition {
        template_id: String,
        from: TemplateStatus,
        to: TemplateStatus,
    },
    /// The template is locked and cannot be edited.
    Locked(String),
    /// Unlocking in this status requires `force`.
    ForceRequired {
        template_id: String,
        status: TemplateStatus,
    },
    InvalidVersion(VersionError),
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTemplateId(value) => write!(f, "template id is invalid: `{value}`"),
            Self::TemplateNotFound(id) => write!(f, "template not found: {id}"),
            Self::DuplicateTemplate(id) => write!(f, "template already registered: {id}"),
            Self::IllegalTransition {
                template_id,
                from,
                to,
            } => write!(
                f,
                "illegal status transition for template `{template_id}`: {from} -> {to}"
            ),
            Self::Locked(id) => write!(f, "template is locked: {id}"),
            Self::ForceRequired {
                template_id,
                status,
            } => write!(
                f,
                "unlocking {status} template `{template_id}` requires force"
            ),
            Self::InvalidVersion(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidVersion(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VersionError> for LifecycleError {
    fn from(value: VersionError) -> Self {
        Self::InvalidVersion(value)
    }
}
