use crate::deprecation::DeprecationRecord;
use crate::lifecycle::{LifecycleError, TemplateStatus};
use crate::migration::{MigrationError, MigrationOutcome};
use crate::model::template::TemplateRecord;
use crate::service::context::GovernanceContext;
use crate::validation::{ValidationReport, RULE_VALID_VERSION};
use crate::version::VersionError;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced by composed workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    Lifecycle(LifecycleError),
    Migration(MigrationError),
    Version(VersionError),
    /// The record failed validation; every violated rule is listed.
    Validation(ValidationReport),
    MissingAuthor,
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lifecycle(err) => write!(f, "{err}"),
            Self::Migration(err) => write!(f, "{err}"),
            Self::Version(err) => write!(f, "{err}"),
            Self::Validation(report) => write!(f, "template validation failed: {report}"),
            Self::MissingAuthor => write!(f, "publishing requires a non-blank author"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lifecycle(err) => Some(err),
            Self::Migration(err) => Some(err),
            Self::Version(err) => Some(err),
            Self::Validation(_) | Self::MissingAuthor => None,
        }
    }
}

impl From<LifecycleError> for WorkflowError {
    fn from(value: LifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}

impl From<MigrationError> for WorkflowError {
    fn from(value: MigrationError) -> Self {
        Self::Migration(value)
    }
}

impl From<VersionError> for WorkflowError {
    fn from(value: VersionError) -> Self {
        Self::Version(value)
    }
}

/// Publication metadata supplied by the releasing author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub author: String,
    pub changelog: Option<String>,
}

impl PublishRequest {
    pub fn new(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            changelog: None,
        }
    }

    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = Some(changelog.into());
        self
    }
}

/// Template health summary.
///
/// `issues` are hard problems, `warnings` are soft concerns. Only issues
/// make a template unhealthy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl GovernanceContext {
    /// Registers a new draft, unlocked template and returns a snapshot.
    pub fn create_template(
        &mut self,
        id: &str,
        name: &str,
        version_string: &str,
    ) -> Result<TemplateRecord, WorkflowError> {
        let record = TemplateRecord::new(id, name, version_string);
        self.templates.register(record.clone())?;
        Ok(record)
    }

    /// Transitions the template to `published`, then locks it.
    ///
    /// The lock is only applied after a successful transition.
    pub fn publish_template(&mut self, template_id: &str) -> Result<(), WorkflowError> {
        self.templates
            .transition(template_id, TemplateStatus::Published)?;
        self.templates.lock(template_id)?;
        info!(
            "event=template_publish module=service status=ok template_id={}",
            template_id
        );
        Ok(())
    }

    /// Validates, publishes, locks and stamps a draft or preview template.
    ///
    /// A draft walks through `preview` on the way. Nothing is changed unless
    /// every precondition holds.
    pub fn prepare_for_publish(
        &mut self,
        template_id: &str,
        request: PublishRequest,
    ) -> Result<TemplateRecord, WorkflowError> {
        let author = request.author.trim().to_string();
        if author.is_empty() {
            return Err(WorkflowError::MissingAuthor);
        }

        let record = self
            .templates
            .get(template_id)
            .ok_or_else(|| LifecycleError::TemplateNotFound(template_id.to_string()))?;
        let report = self.validator.validate_record(record);
        if !report.valid {
            warn!(
                "event=template_prepare_publish module=service status=rejected template_id={} errors={}",
                template_id,
                report.errors.len()
            );
            return Err(WorkflowError::Validation(report));
        }

        let path: &[TemplateStatus] = match record.status {
            TemplateStatus::Draft => &[TemplateStatus::Preview, TemplateStatus::Published],
            TemplateStatus::Preview => &[TemplateStatus::Published],
            from => {
                return Err(LifecycleError::IllegalTransition {
                    template_id: template_id.to_string(),
                    from,
                    to: TemplateStatus::Published,
                }
                .into())
            }
        };

        for status in path {
            self.templates.transition(template_id, *status)?;
        }
        self.templates.lock(template_id)?;
        self.templates
            .attach_publication(template_id, author, request.changelog)?;

        info!(
            "event=template_prepare_publish module=service status=ok template_id={}",
            template_id
        );
        self.templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| LifecycleError::TemplateNotFound(template_id.to_string()).into())
    }

    /// Moves a published template to `deprecated`.
    pub fn deprecate_template(&mut self, template_id: &str) -> Result<(), WorkflowError> {
        self.templates
            .transition(template_id, TemplateStatus::Deprecated)?;
        Ok(())
    }

    /// Reports hard issues and soft warnings for one record.
    pub fn check_health(&self, record: &TemplateRecord) -> HealthReport {
        let report = self.validator.validate_record(record);
        let mut issues: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        let mut warnings = Vec::new();

        let released = matches!(
            record.status,
            TemplateStatus::Published | TemplateStatus::Deprecated
        );
        match record.version.parsed() {
            Ok(version) => {
                if released && version.is_prerelease() {
                    warnings.push(format!("released template uses prerelease version {version}"));
                }
            }
            Err(err) => {
                if !report.has_rule(RULE_VALID_VERSION) {
                    issues.push(err.to_string());
                }
            }
        }

        let health = &self.config.health;
        if health.warn_missing_changelog && is_blank(record.changelog.as_deref()) {
            warnings.push("changelog is missing".to_string());
        }
        if health.warn_missing_author && released && is_blank(record.author.as_deref()) {
            warnings.push("released template has no author".to_string());
        }
        if released && !record.locked {
            warnings.push("released template is not locked".to_string());
        }
        if record.status == TemplateStatus::Deprecated {
            warnings.push("template is deprecated".to_string());
        }

        HealthReport {
            healthy: issues.is_empty(),
            issues,
            warnings,
        }
    }

    /// Health of a registered template.
    pub fn template_health(&self, template_id: &str) -> Result<HealthReport, WorkflowError> {
        let record = self
            .templates
            .get(template_id)
            .ok_or_else(|| LifecycleError::TemplateNotFound(template_id.to_string()))?;
        Ok(self.check_health(record))
    }

    /// Brings a payload written at `from_version` up to the template's
    /// current version.
    pub async fn migrate_template_data(
        &self,
        template_id: &str,
        data: Value,
        from_version: &str,
    ) -> Result<MigrationOutcome, WorkflowError> {
        let target = self.current_version(template_id)?;
        let outcome = self
            .migrations
            .migrate(template_id, data, from_version, target.as_str())
            .await?;
        Ok(outcome)
    }

    /// Deprecations in effect for `data` at the template's current version.
    pub fn check_deprecations(
        &self,
        template_id: &str,
        data: &Value,
    ) -> Result<Vec<&DeprecationRecord>, WorkflowError> {
        let current = self.current_version(template_id)?;
        Ok(self
            .deprecations
            .check(template_id, current.as_str(), data)?)
    }

    fn current_version(&self, template_id: &str) -> Result<String, WorkflowError> {
        let record = self
            .templates
            .get(template_id)
            .ok_or_else(|| LifecycleError::TemplateNotFound(template_id.to_string()))?;
        Ok(record.version.parsed()?.without_build().to_string())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{PublishRequest, WorkflowError};
    use crate::lifecycle::{LifecycleError, TemplateStatus};
    use crate::service::GovernanceContext;

    #[test]
    fn create_rejects_duplicate_ids() {
        let mut context = GovernanceContext::new();
        context
            .create_template("hero", "Hero", "1.0.0")
            .expect("first create");
        let err = context
            .create_template("hero", "Hero", "1.0.0")
            .expect_err("duplicate create must fail");
        assert!(matches!(
            err,
            WorkflowError::Lifecycle(LifecycleError::DuplicateTemplate(_))
        ));
    }

    #[test]
    fn publish_from_draft_fails_without_locking() {
        let mut context = GovernanceContext::new();
        context
            .create_template("hero", "Hero", "1.0.0")
            .expect("create");
        let err = context
            .publish_template("hero")
            .expect_err("draft cannot publish directly");
        assert!(matches!(
            err,
            WorkflowError::Lifecycle(LifecycleError::IllegalTransition { .. })
        ));
        assert!(!context.templates().is_locked("hero"));
        assert_eq!(context.templates().status("hero"), TemplateStatus::Draft);
    }

    #[test]
    fn prepare_for_publish_requires_author() {
        let mut context = GovernanceContext::new();
        context
            .create_template("hero", "Hero", "1.0.0")
            .expect("create");
        let err = context
            .prepare_for_publish("hero", PublishRequest::new("  "))
            .expect_err("blank author must fail");
        assert_eq!(err, WorkflowError::MissingAuthor);
    }

    #[test]
    fn prepare_for_publish_rejects_invalid_record_unchanged() {
        let mut context = GovernanceContext::new();
        context
            .create_template("hero", "Hero", "latest")
            .expect("create");
        let err = context
            .prepare_for_publish("hero", PublishRequest::new("ana"))
            .expect_err("invalid version must block publishing");
        match err {
            WorkflowError::Validation(report) => assert!(report.has_rule("valid-version")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(context.templates().status("hero"), TemplateStatus::Draft);
        assert_eq!(
            context.templates().get("hero").and_then(|r| r.author.clone()),
            None
        );
    }

    #[test]
    fn prepare_for_publish_rejects_already_published() {
        let mut context = GovernanceContext::new();
        context
            .create_template("hero", "Hero", "1.0.0")
            .expect("create");
        context
            .prepare_for_publish("hero", PublishRequest::new("ana"))
            .expect("first publish");
        let err = context
            .prepare_for_publish("hero", PublishRequest::new("ana"))
            .expect_err("second publish must fail");
        assert!(matches!(
            err,
            WorkflowError::Lifecycle(LifecycleError::IllegalTransition { .. })
        ));
    }
}
