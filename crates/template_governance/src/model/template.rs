//! Template record model.
//!
//! # Responsibility
//! - Carry identity, display name, version text and lifecycle state for one
//!   governed template.
//! - Provide a JSON projection for rule-based validation.
//!
//! # Invariants
//! - A new record starts as `draft` and unlocked.
//! - `version.version_string` is stored verbatim; it may be unparseable and
//!   is reported by validation/health checks instead of rejected on create.

use crate::lifecycle::TemplateStatus;
use crate::version::{parse_version, SemanticVersion, VersionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for one governed template.
pub type TemplateId = String;

/// Version wrapper holding the raw version text of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVersion {
    pub version_string: String,
}

impl TemplateVersion {
    pub fn new(version_string: impl Into<String>) -> Self {
        Self {
            version_string: version_string.into(),
        }
    }

    /// Parses the stored version text.
    pub fn parsed(&self) -> Result<SemanticVersion, VersionError> {
        parse_version(self.version_string.as_str())
    }
}

impl From<&SemanticVersion> for TemplateVersion {
    fn from(value: &SemanticVersion) -> Self {
        Self::new(value.to_string())
    }
}

/// Canonical governed template record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub id: TemplateId,
    pub name: String,
    pub version: TemplateVersion,
    pub status: TemplateStatus,
    pub locked: bool,
    /// Set when the template is prepared for publishing.
    pub author: Option<String>,
    pub changelog: Option<String>,
}

impl TemplateRecord {
    /// Creates a draft, unlocked record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version_string: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: TemplateVersion::new(version_string),
            status: TemplateStatus::Draft,
            locked: false,
            author: None,
            changelog: None,
        }
    }

    /// Returns the JSON document shape consumed by validation rules.
    pub fn to_document(&self) -> Value {
        // Serialization of plain strings/enums cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::TemplateRecord;
    use crate::lifecycle::TemplateStatus;

    #[test]
    fn new_record_starts_as_unlocked_draft() {
        let record = TemplateRecord::new("landing.hero", "Hero", "1.0.0");
        assert_eq!(record.status, TemplateStatus::Draft);
        assert!(!record.locked);
        assert_eq!(record.author, None);
    }

    #[test]
    fn document_uses_camel_case_wire_fields() {
        let record = TemplateRecord::new("landing.hero", "Hero", "1.0.0-rc.1");
        let document = record.to_document();
        assert_eq!(document["id"], "landing.hero");
        assert_eq!(document["version"]["versionString"], "1.0.0-rc.1");
        assert_eq!(document["status"], "draft");
        assert_eq!(document["locked"], false);
    }

    #[test]
    fn keeps_unparseable_version_text() {
        let record = TemplateRecord::new("landing.hero", "Hero", "next");
        assert!(record.version.parsed().is_err());
    }
}
