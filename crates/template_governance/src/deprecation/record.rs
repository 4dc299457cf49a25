use crate::deprecation::DeprecationError;
use crate::version::{parse_version, SemanticVersion};
use serde::Serialize;
use std::cmp::Ordering;

/// Immutable field deprecation declaration.
///
/// Versions are stored in canonical text form. Fields are private so a
/// record can only come from [`create_deprecation`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationRecord {
    path: String,
    deprecated_in: String,
    removed_in: String,
    message: String,
    replacement: Option<String>,
    #[serde(skip)]
    deprecated_at: (u64, u64, u64),
    #[serde(skip)]
    removed_at: (u64, u64, u64),
}

/// Creates one validated deprecation record.
///
/// # Errors
/// - `EmptyPath` for a blank path.
/// - `InvalidVersion` when either version does not parse.
/// - `RemovalNotAfterDeprecation` unless `removed_in > deprecated_in`.
pub fn create_deprecation(
    path: impl Into<String>,
    deprecated_in: &str,
    removed_in: &str,
    message: impl Into<String>,
    replacement: Option<String>,
) -> Result<DeprecationRecord, DeprecationError> {
    let path: String = path.into();
    let path = path.trim().to_string();
    if path.is_empty() {
        return Err(DeprecationError::EmptyPath);
    }

    let deprecated = parse_declared(deprecated_in)?;
    let removed = parse_declared(removed_in)?;
    if removed.triple() <= deprecated.triple() {
        return Err(DeprecationError::RemovalNotAfterDeprecation {
            deprecated_in: deprecated.to_string(),
            removed_in: removed.to_string(),
        });
    }

    Ok(DeprecationRecord {
        path,
        deprecated_in: deprecated.to_string(),
        removed_in: removed.to_string(),
        message: message.into(),
        replacement: replacement.filter(|value| !value.trim().is_empty()),
        deprecated_at: deprecated.triple(),
        removed_at: removed.triple(),
    })
}

fn parse_declared(value: &str) -> Result<SemanticVersion, DeprecationError> {
    parse_version(value).map_err(|_| DeprecationError::InvalidVersion(value.to_string()))
}

impl DeprecationRecord {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn deprecated_in(&self) -> &str {
        &self.deprecated_in
    }

    pub fn removed_in(&self) -> &str {
        &self.removed_in
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Whether the deprecation is in effect at `version`.
    pub fn is_active_at(&self, version: &SemanticVersion) -> bool {
        version.triple().cmp(&self.deprecated_at) != Ordering::Less
    }

    /// Whether the field is past its removal version at `version`.
    pub fn is_removed_at(&self, version: &SemanticVersion) -> bool {
        version.triple().cmp(&self.removed_at) != Ordering::Less
    }

    /// Renders a one-line user-facing warning.
    pub fn warning(&self) -> String {
        let mut line = format!(
            "`{}` is deprecated since {} and will be removed in {}: {}",
            self.path, self.deprecated_in, self.removed_in, self.message
        );
        if let Some(replacement) = &self.replacement {
            line.push_str(&format!(" Use `{replacement}` instead."));
        }
        line
    }
}
