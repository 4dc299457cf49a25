use crate::version::semver::{compare_versions, parse_version, SemanticVersion};
use crate::version::VersionError;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Supported range predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// `^X.Y.Z`: compatible up to the next bump of the leftmost non-zero
    /// component.
    Caret(SemanticVersion),
    /// `~X.Y.Z`: same major and minor, patch at least `Z`.
    Tilde(SemanticVersion),
    /// `>=X.Y.Z`
    AtLeast(SemanticVersion),
    /// `>X.Y.Z`
    GreaterThan(SemanticVersion),
}

impl VersionRange {
    /// Parses one range expression.
    ///
    /// `>=` is checked before `>` so the longer operator wins. A bare version
    /// with no operator is rejected.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let trimmed = value.trim();
        let invalid = || VersionError::InvalidRange(value.to_string());

        let (constructor, rest): (fn(SemanticVersion) -> Self, &str) =
            if let Some(rest) = trimmed.strip_prefix(">=") {
                (Self::AtLeast, rest)
            } else if let Some(rest) = trimmed.strip_prefix('>') {
                (Self::GreaterThan, rest)
            } else if let Some(rest) = trimmed.strip_prefix('^') {
                (Self::Caret, rest)
            } else if let Some(rest) = trimmed.strip_prefix('~') {
                (Self::Tilde, rest)
            } else {
                return Err(invalid());
            };

        let base = parse_version(rest).map_err(|_| invalid())?;
        Ok(constructor(base))
    }

    pub fn base(&self) -> &SemanticVersion {
        match self {
            Self::Caret(base) | Self::Tilde(base) | Self::AtLeast(base) | Self::GreaterThan(base) => {
                base
            }
        }
    }

    /// Returns whether `version` falls inside this range.
    pub fn matches(&self, version: &SemanticVersion) -> bool {
        let base = self.base();
        let at_least_base = compare_versions(version, base) != Ordering::Less;
        match self {
            Self::AtLeast(_) => at_least_base,
            Self::GreaterThan(_) => compare_versions(version, base) == Ordering::Greater,
            Self::Tilde(_) => {
                at_least_base && version.major == base.major && version.minor == base.minor
            }
            Self::Caret(_) => {
                if !at_least_base {
                    return false;
                }
                if base.major > 0 {
                    version.major == base.major
                } else if base.minor > 0 {
                    version.major == 0 && version.minor == base.minor
                } else {
                    version.triple() == base.triple()
                }
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for VersionRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Caret(_) => "^",
            Self::Tilde(_) => "~",
            Self::AtLeast(_) => ">=",
            Self::GreaterThan(_) => ">",
        };
        write!(f, "{operator}{}", self.base())
    }
}

/// Evaluates `range` against `version`.
///
/// # Errors
/// - `VersionError::InvalidRange` for unknown operators or an unparseable
///   base version.
pub fn satisfies_version(version: &SemanticVersion, range: &str) -> Result<bool, VersionError> {
    Ok(VersionRange::parse(range)?.matches(version))
}
