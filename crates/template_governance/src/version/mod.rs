//! Semantic version model.
//!
//! # Responsibility
//! - Parse `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` strings.
//! - Compare, bump and range-match versions for governance decisions.
//!
//! # Invariants
//! - Comparison only looks at `(major, minor, patch)`; prerelease and build
//!   are carried but never affect precedence.
//! - A bump always drops prerelease and build metadata.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod range;
mod semver;

pub use range::{satisfies_version, VersionRange};
pub use semver::{bump_version, compare_versions, parse_version, SemanticVersion, VersionBump};

/// Version parse and range errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Input does not match the semver grammar.
    Parse(String),
    /// Range uses an operator outside `^`, `~`, `>=`, `>`.
    InvalidRange(String),
}

impl Display for VersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(value) => write!(
                f,
                "version is invalid: `{value}` (expected major.minor.patch[-prerelease][+build])"
            ),
            Self::InvalidRange(value) => write!(
                f,
                "version range is invalid: `{value}` (expected ^, ~, >= or > followed by a version)"
            ),
        }
    }
}

impl Error for VersionError {}
