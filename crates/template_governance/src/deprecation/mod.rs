//! Field deprecation tracking.
//!
//! # Responsibility
//! - Declare fields that are deprecated at one version and removed at a
//!   later one.
//! - Report which declarations apply to a payload at a given version.
//!
//! # Invariants
//! - Records are immutable once created and `removed_in > deprecated_in`.
//! - Checks never mutate the payload.
//! - A deprecation never fires before its `deprecated_in` version.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod path;
mod record;
mod registry;

pub use path::lookup_path;
pub use record::{create_deprecation, DeprecationRecord};
pub use registry::DeprecationRegistry;

/// Deprecation declaration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeprecationError {
    EmptyPath,
    InvalidVersion(String),
    RemovalNotAfterDeprecation {
        deprecated_in: String,
        removed_in: String,
    },
}

impl Display for DeprecationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "deprecation path must not be empty"),
            Self::InvalidVersion(value) => write!(f, "deprecation version is invalid: {value}"),
            Self::RemovalNotAfterDeprecation {
                deprecated_in,
                removed_in,
            } => write!(
                f,
                "removal version {removed_in} must be greater than deprecation version {deprecated_in}"
            ),
        }
    }
}

impl Error for DeprecationError {}
