//! Template data migrations.
//!
//! # Responsibility
//! - Register version-to-version payload transformations per template.
//! - Resolve and apply a chain of steps bridging two versions.
//!
//! # Invariants
//! - Steps are directed edges between canonical version nodes.
//! - Resolution is breadth-first in registration order: the shortest chain
//!   wins and ties go to the first-registered step.
//! - The payload is moved through the chain; the registry never clones it.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod registry;

pub use registry::{MigrationFn, MigrationOutcome, MigrationRegistry, MigrationStep};

/// Migration registration and execution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// A step or request names a version that does not parse.
    InvalidVersion(String),
    /// A step would migrate a version onto itself.
    SelfLoop { step_id: String, version: String },
    /// No registered chain bridges the requested versions.
    NoMigrationPath {
        template_id: String,
        from: String,
        to: String,
    },
    /// The shortest chain exceeds the configured bound.
    ChainTooLong { length: usize, max: usize },
    /// One step's transformation reported a failure.
    StepFailed { step_id: String, message: String },
}

impl Display for MigrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVersion(value) => write!(f, "migration version is invalid: {value}"),
            Self::SelfLoop { step_id, version } => write!(
                f,
                "migration step `{step_id}` must change version, got {version} -> {version}"
            ),
            Self::NoMigrationPath {
                template_id,
                from,
                to,
            } => write!(
                f,
                "no migration path for template `{template_id}` from {from} to {to}"
            ),
            Self::ChainTooLong { length, max } => write!(
                f,
                "migration chain has {length} steps, exceeding the limit of {max}"
            ),
            Self::StepFailed { step_id, message } => {
                write!(f, "migration step `{step_id}` failed: {message}")
            }
        }
    }
}

impl Error for MigrationError {}
