use crate::config::{ConfigError, GovernanceConfig};
use crate::deprecation::DeprecationRegistry;
use crate::lifecycle::TemplateGovernance;
use crate::migration::MigrationRegistry;
use crate::validation::TemplateValidator;

/// Caller-owned governance state.
///
/// Each context is fully isolated; there is no process-wide registry.
#[derive(Debug)]
pub struct GovernanceContext {
    pub(crate) config: GovernanceConfig,
    pub(crate) migrations: MigrationRegistry,
    pub(crate) deprecations: DeprecationRegistry,
    pub(crate) templates: TemplateGovernance,
    pub(crate) validator: TemplateValidator,
}

impl Default for GovernanceContext {
    fn default() -> Self {
        Self::build(GovernanceConfig::default())
    }
}

impl GovernanceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context after validating `config`.
    pub fn with_config(config: GovernanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GovernanceConfig) -> Self {
        Self {
            migrations: MigrationRegistry::with_config(&config.migration),
            deprecations: DeprecationRegistry::new(),
            templates: TemplateGovernance::with_config(&config.lifecycle),
            validator: TemplateValidator::with_default_rules(),
            config,
        }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn migrations(&self) -> &MigrationRegistry {
        &self.migrations
    }

    pub fn migrations_mut(&mut self) -> &mut MigrationRegistry {
        &mut self.migrations
    }

    pub fn deprecations(&self) -> &DeprecationRegistry {
        &self.deprecations
    }

    pub fn deprecations_mut(&mut self) -> &mut DeprecationRegistry {
        &mut self.deprecations
    }

    pub fn templates(&self) -> &TemplateGovernance {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateGovernance {
        &mut self.templates
    }

    pub fn validator(&self) -> &TemplateValidator {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut TemplateValidator {
        &mut self.validator
    }

    /// Drops every template, migration and deprecation.
    pub fn reset(&mut self) {
        self.migrations.clear();
        self.deprecations.clear();
        self.templates.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::GovernanceContext;
    use crate::config::{ConfigError, GovernanceConfig, MigrationConfig};
    use crate::model::template::TemplateRecord;

    #[test]
    fn contexts_are_isolated() {
        let mut first = GovernanceContext::new();
        let second = GovernanceContext::new();
        first
            .templates_mut()
            .register(TemplateRecord::new("hero", "Hero", "1.0.0"))
            .expect("registration");
        assert_eq!(first.templates().len(), 1);
        assert!(second.templates().is_empty());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GovernanceConfig {
            migration: MigrationConfig {
                max_chain_length: 0,
            },
            ..GovernanceConfig::default()
        };
        let err = GovernanceContext::with_config(config).expect_err("invalid config must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn reset_clears_all_registries() {
        let mut context = GovernanceContext::new();
        context
            .templates_mut()
            .register(TemplateRecord::new("hero", "Hero", "1.0.0"))
            .expect("registration");
        context.reset();
        assert!(context.templates().is_empty());
        assert!(context.migrations().template_ids().is_empty());
    }
}
