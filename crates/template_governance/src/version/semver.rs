use crate::version::VersionError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static SEMVER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$",
    )
    .expect("semver pattern is a valid regex")
});

/// Parsed semantic version.
///
/// Equality is structural (prerelease and build included). Use
/// [`compare_versions`] for precedence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Component selector for [`bump_version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl FromStr for VersionBump {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            other => Err(format!(
                "unsupported bump kind `{other}`; expected major|minor|patch"
            )),
        }
    }
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Returns the `(major, minor, patch)` triple used for precedence.
    pub fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Returns a copy with build metadata dropped. Prerelease is kept.
    pub fn without_build(&self) -> Self {
        Self {
            build: None,
            ..self.clone()
        }
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_version(value)
    }
}

impl Display for SemanticVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{prerelease}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

/// Parses one semver string.
///
/// Surrounding whitespace is ignored. Prerelease and build are stored as raw
/// strings without splitting their dot-separated identifiers.
///
/// # Errors
/// - `VersionError::Parse` when the input does not match the grammar or a
///   numeric component overflows `u64`.
pub fn parse_version(value: &str) -> Result<SemanticVersion, VersionError> {
    let trimmed = value.trim();
    let captures = SEMVER_PATTERN
        .captures(trimmed)
        .ok_or_else(|| VersionError::Parse(value.to_string()))?;

    let numeric = |index: usize| -> Result<u64, VersionError> {
        captures[index]
            .parse::<u64>()
            .map_err(|_| VersionError::Parse(value.to_string()))
    };

    Ok(SemanticVersion {
        major: numeric(1)?,
        minor: numeric(2)?,
        patch: numeric(3)?,
        prerelease: captures.get(4).map(|m| m.as_str().to_string()),
        build: captures.get(5).map(|m| m.as_str().to_string()),
    })
}

/// Compares two versions by `(major, minor, patch)` only.
///
/// `1.0.0-alpha` and `1.0.0` compare `Equal`: prerelease precedence is not
/// part of this model.
pub fn compare_versions(a: &SemanticVersion, b: &SemanticVersion) -> Ordering {
    a.triple().cmp(&b.triple())
}

/// Returns the next release version for the selected component.
pub fn bump_version(version: &SemanticVersion, kind: VersionBump) -> SemanticVersion {
    match kind {
        VersionBump::Major => SemanticVersion::new(version.major + 1, 0, 0),
        VersionBump::Minor => SemanticVersion::new(version.major, version.minor + 1, 0),
        VersionBump::Patch => {
            SemanticVersion::new(version.major, version.minor, version.patch + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{bump_version, compare_versions, parse_version, SemanticVersion, VersionBump};
    use crate::version::VersionError;
    use std::cmp::Ordering;

    #[test]
    fn parses_full_grammar() {
        let version = parse_version("1.2.3-beta.1+build.42").expect("full version parse");
        assert_eq!(version.triple(), (1, 2, 3));
        assert_eq!(version.prerelease.as_deref(), Some("beta.1"));
        assert_eq!(version.build.as_deref(), Some("build.42"));
        assert!(version.is_prerelease());
    }

    #[test]
    fn parses_build_without_prerelease() {
        let version = parse_version("0.4.0+sha.abc").expect("build-only parse");
        assert_eq!(version.prerelease, None);
        assert_eq!(version.build.as_deref(), Some("sha.abc"));
    }

    #[test]
    fn rejects_malformed_versions() {
        for raw in ["", "1", "1.2", "v1.2.3", "1.2.3.4", "1.2.x", "1.2.3-", "1.2.3+"] {
            let err = parse_version(raw).expect_err("malformed version must fail");
            assert_eq!(err, VersionError::Parse(raw.to_string()));
        }
    }

    #[test]
    fn rejects_overflowing_component() {
        let err = parse_version("99999999999999999999.0.0").expect_err("overflow must fail");
        assert!(matches!(err, VersionError::Parse(_)));
    }

    #[test]
    fn display_is_canonical() {
        let version = parse_version(" 01.2.3-rc.1+x ").expect("padded version parse");
        assert_eq!(version.to_string(), "1.2.3-rc.1+x");
    }

    #[test]
    fn comparison_ignores_prerelease_and_build() {
        let release = parse_version("1.0.0").expect("release parse");
        let alpha = parse_version("1.0.0-alpha+b1").expect("prerelease parse");
        assert_eq!(compare_versions(&release, &alpha), Ordering::Equal);
        assert_ne!(release, alpha);
    }

    #[test]
    fn without_build_keeps_prerelease() {
        let version = parse_version("2.0.0-rc.1+sha.abc").expect("full version parse");
        assert_eq!(version.without_build().to_string(), "2.0.0-rc.1");
    }

    #[test]
    fn comparison_orders_by_component_priority() {
        let low = SemanticVersion::new(1, 9, 9);
        let high = SemanticVersion::new(2, 0, 0);
        assert_eq!(compare_versions(&low, &high), Ordering::Less);
        assert_eq!(compare_versions(&high, &low), Ordering::Greater);
        assert_eq!(
            compare_versions(&SemanticVersion::new(1, 2, 10), &SemanticVersion::new(1, 2, 9)),
            Ordering::Greater
        );
    }

    #[test]
    fn bump_resets_lower_components_and_drops_metadata() {
        let version = parse_version("1.4.7-rc.2+meta").expect("version parse");
        assert_eq!(
            bump_version(&version, VersionBump::Major),
            SemanticVersion::new(2, 0, 0)
        );
        assert_eq!(
            bump_version(&version, VersionBump::Minor),
            SemanticVersion::new(1, 5, 0)
        );
        assert_eq!(
            bump_version(&version, VersionBump::Patch),
            SemanticVersion::new(1, 4, 8)
        );
    }

    #[test]
    fn parses_bump_kind() {
        assert_eq!("minor".parse::<VersionBump>(), Ok(VersionBump::Minor));
        assert!("huge".parse::<VersionBump>().is_err());
    }
}
