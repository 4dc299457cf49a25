//! Template governance core.
//! Versioning, data migrations, deprecations and lifecycle control for
//! template records, all owned by an explicit `GovernanceContext`.

pub mod config;
pub mod deprecation;
pub mod lifecycle;
pub mod logging;
pub mod migration;
pub mod model;
pub mod service;
pub mod validation;
pub mod version;

pub use config::{
    ConfigError, GovernanceConfig, HealthConfig, LifecycleConfig, LoggingConfig, MigrationConfig,
};
pub use deprecation::{create_deprecation, DeprecationError, DeprecationRecord, DeprecationRegistry};
pub use lifecycle::{LifecycleError, TemplateGovernance, TemplateStatus};
pub use logging::{default_log_level, init_logging, logging_status};
pub use migration::{MigrationError, MigrationOutcome, MigrationRegistry, MigrationStep};
pub use model::template::{TemplateId, TemplateRecord, TemplateVersion};
pub use service::{GovernanceContext, HealthReport, PublishRequest, WorkflowError};
pub use validation::{
    TemplateValidator, ValidationContext, ValidationError, ValidationReport, ValidationRule,
};
pub use version::{
    bump_version, compare_versions, parse_version, satisfies_version, SemanticVersion,
    VersionBump, VersionError, VersionRange,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, parse_version};

    #[test]
    fn core_version_is_itself_a_valid_semver() {
        assert!(parse_version(core_version()).is_ok());
    }
}
