use crate::config::LifecycleConfig;
use crate::lifecycle::{LifecycleError, TemplateStatus};
use crate::model::template::{TemplateRecord, TemplateVersion};
use crate::version::{bump_version, SemanticVersion, VersionBump};
use log::{info, warn};
use std::collections::BTreeMap;

/// Owner of template records and their lifecycle state.
///
/// Read helpers (`status`, `is_locked`, `can_modify`) answer for unknown ids
/// with the defaults of a fresh record. Mutating calls need a registered
/// record: `lock`, `unlock` and `transition` on an unknown id return
/// `TemplateNotFound` instead of creating an implicit draft.
#[derive(Debug)]
pub struct TemplateGovernance {
    templates: BTreeMap<String, TemplateRecord>,
    lifecycle: LifecycleConfig,
}

impl Default for TemplateGovernance {
    fn default() -> Self {
        Self::with_config(&LifecycleConfig::default())
    }
}

impl TemplateGovernance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &LifecycleConfig) -> Self {
        Self {
            templates: BTreeMap::new(),
            lifecycle: config.clone(),
        }
    }

    /// Takes ownership of a new record.
    pub fn register(&mut self, record: TemplateRecord) -> Result<(), LifecycleError> {
        if record.id.trim().is_empty() || record.id.trim() != record.id {
            return Err(LifecycleError::InvalidTemplateId(record.id));
        }
        if self.templates.contains_key(record.id.as_str()) {
            return Err(LifecycleError::DuplicateTemplate(record.id));
        }

        info!(
            "event=template_register module=lifecycle status=ok template_id={} version={}",
            record.id, record.version.version_string
        );
        self.templates.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn get(&self, template_id: &str) -> Option<&TemplateRecord> {
        self.templates.get(template_id)
    }

    /// Returns all records sorted by id.
    pub fn records(&self) -> Vec<&TemplateRecord> {
        self.templates.values().collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn clear(&mut self) {
        self.templates.clear();
    }

    pub fn status(&self, template_id: &str) -> TemplateStatus {
        self.get(template_id)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    pub fn is_locked(&self, template_id: &str) -> bool {
        self.get(template_id).is_some_and(|record| record.locked)
    }

    pub fn can_modify(&self, template_id: &str) -> bool {
        !self.is_locked(template_id)
    }

    /// Moves the template to `target` along a legal edge.
    ///
    /// Returns the previous status. The lock does not gate transitions, so a
    /// locked published template can still be deprecated.
    pub fn transition(
        &mut self,
        template_id: &str,
        target: TemplateStatus,
    ) -> Result<TemplateStatus, LifecycleError> {
        let record = self.record_mut(template_id)?;
        let current = record.status;
        if !current.can_transition_to(target) {
            warn!(
                "event=status_transition module=lifecycle status=rejected template_id={} from={} to={}",
                template_id, current, target
            );
            return Err(LifecycleError::IllegalTransition {
                template_id: template_id.to_string(),
                from: current,
                to: target,
            });
        }

        record.status = target;
        info!(
            "event=status_transition module=lifecycle status=ok template_id={} from={} to={}",
            template_id, current, target
        );
        Ok(current)
    }

    /// Locks the template. Locking an already locked template is a no-op.
    pub fn lock(&mut self, template_id: &str) -> Result<(), LifecycleError> {
        let record = self.record_mut(template_id)?;
        if !record.locked {
            record.locked = true;
            info!(
                "event=template_lock module=lifecycle status=ok template_id={}",
                template_id
            );
        }
        Ok(())
    }

    /// Lifts the lock.
    ///
    /// Statuses configured as force-only (published and deprecated by
    /// default) need `force = true`; others unlock unconditionally.
    pub fn unlock(&mut self, template_id: &str, force: bool) -> Result<(), LifecycleError> {
        let needs_force = self
            .lifecycle
            .unlock_requires_force(self.status(template_id));
        let record = self.record_mut(template_id)?;
        if needs_force && !force {
            warn!(
                "event=template_unlock module=lifecycle status=rejected template_id={} template_status={}",
                template_id, record.status
            );
            return Err(LifecycleError::ForceRequired {
                template_id: template_id.to_string(),
                status: record.status,
            });
        }

        record.locked = false;
        info!(
            "event=template_unlock module=lifecycle status=ok template_id={} forced={}",
            template_id, force
        );
        Ok(())
    }

    pub fn rename(
        &mut self,
        template_id: &str,
        name: impl Into<String>,
    ) -> Result<(), LifecycleError> {
        self.editable(template_id)?.name = name.into();
        Ok(())
    }

    /// Replaces the version text. The new text must parse.
    pub fn set_version(
        &mut self,
        template_id: &str,
        version_string: &str,
    ) -> Result<(), LifecycleError> {
        let parsed: SemanticVersion = version_string.parse()?;
        self.editable(template_id)?.version = TemplateVersion::from(&parsed);
        Ok(())
    }

    /// Bumps the stored version and returns the new one.
    pub fn bump_version(
        &mut self,
        template_id: &str,
        kind: VersionBump,
    ) -> Result<SemanticVersion, LifecycleError> {
        let record = self.editable(template_id)?;
        let current = record.version.parsed()?;
        let next = bump_version(&current, kind);
        record.version = TemplateVersion::from(&next);
        info!(
            "event=version_bump module=lifecycle status=ok template_id={} from={} to={}",
            template_id, current, next
        );
        Ok(next)
    }

    /// Attaches publication metadata; used by the publish workflow only.
    pub(crate) fn attach_publication(
        &mut self,
        template_id: &str,
        author: String,
        changelog: Option<String>,
    ) -> Result<(), LifecycleError> {
        let record = self.record_mut(template_id)?;
        record.author = Some(author);
        record.changelog = changelog;
        Ok(())
    }

    fn record_mut(&mut self, template_id: &str) -> Result<&mut TemplateRecord, LifecycleError> {
        self.templates
            .get_mut(template_id)
            .ok_or_else(|| LifecycleError::TemplateNotFound(template_id.to_string()))
    }

    fn editable(&mut self, template_id: &str) -> Result<&mut TemplateRecord, LifecycleError> {
        let record = self.record_mut(template_id)?;
        if record.locked {
            return Err(LifecycleError::Locked(template_id.to_string()));
        }
        Ok(record)
    }
}
