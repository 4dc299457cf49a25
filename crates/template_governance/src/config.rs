//! Governance configuration.
//!
//! # Responsibility
//! - Describe tunable policy for lifecycle, migration, health and logging.
//! - Load policy from a JSON document with per-section defaults.
//!
//! # Invariants
//! - Every section is optional in the source document.
//! - `validate()` must pass before a config is used by a context.

use crate::lifecycle::TemplateStatus;
use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_MAX_CHAIN_LENGTH: usize = 64;

/// Config loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "failed to parse governance config: {message}"),
            Self::Invalid(message) => write!(f, "invalid governance config: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files. `None` leaves logging off.
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Statuses whose lock can only be lifted with `force = true`.
    pub force_unlock_statuses: Vec<TemplateStatus>,
}

impl LifecycleConfig {
    /// Returns whether unlocking a template in `status` needs `force`.
    pub fn unlock_requires_force(&self, status: TemplateStatus) -> bool {
        self.force_unlock_statuses.contains(&status)
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            force_unlock_statuses: vec![TemplateStatus::Published, TemplateStatus::Deprecated],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Upper bound on the number of steps in one resolved chain.
    pub max_chain_length: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub warn_missing_changelog: bool,
    pub warn_missing_author: bool,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            warn_missing_changelog: true,
            warn_missing_author: true,
        }
    }
}

/// Top-level governance policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    pub logging: LoggingConfig,
    pub lifecycle: LifecycleConfig,
    pub migration: MigrationConfig,
    pub health: HealthConfig,
}

impl GovernanceConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.migration.max_chain_length == 0 {
            return Err(ConfigError::Invalid(
                "migration.max_chain_length must be greater than zero".to_string(),
            ));
        }
        normalize_level(self.logging.level.as_str())
            .map_err(|err| ConfigError::Invalid(format!("logging.level: {err}")))?;
        if let Some(dir) = self.logging.log_dir.as_deref() {
            normalize_log_dir(dir)
                .map_err(|err| ConfigError::Invalid(format!("logging.log_dir: {err}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GovernanceConfig};
    use crate::lifecycle::TemplateStatus;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GovernanceConfig::from_json_str("{}").expect("empty config parse");
        assert_eq!(config, GovernanceConfig::default());
        assert!(config.lifecycle.unlock_requires_force(TemplateStatus::Published));
        assert!(config.lifecycle.unlock_requires_force(TemplateStatus::Deprecated));
        assert!(!config.lifecycle.unlock_requires_force(TemplateStatus::Draft));
        assert_eq!(config.migration.max_chain_length, 64);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GovernanceConfig::from_json_str(
            r#"{ "lifecycle": { "force_unlock_statuses": ["preview"] }, "health": { "warn_missing_author": false } }"#,
        )
        .expect("partial config parse");
        assert!(config.lifecycle.unlock_requires_force(TemplateStatus::Preview));
        assert!(!config.lifecycle.unlock_requires_force(TemplateStatus::Published));
        assert!(config.health.warn_missing_changelog);
        assert!(!config.health.warn_missing_author);
    }

    #[test]
    fn rejects_unknown_status_names() {
        let err = GovernanceConfig::from_json_str(
            r#"{ "lifecycle": { "force_unlock_statuses": ["archived"] } }"#,
        )
        .expect_err("unknown status must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_chain_length() {
        let err = GovernanceConfig::from_json_str(r#"{ "migration": { "max_chain_length": 0 } }"#)
            .expect_err("zero chain length must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unsupported_log_level() {
        let err = GovernanceConfig::from_json_str(r#"{ "logging": { "level": "verbose" } }"#)
            .expect_err("unknown level must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("verbose"));

        let config = GovernanceConfig::from_json_str(r#"{ "logging": { "level": "WARNING" } }"#)
            .expect("level aliases are accepted");
        assert_eq!(config.logging.level, "WARNING");
    }

    #[test]
    fn rejects_relative_log_dir() {
        let err = GovernanceConfig::from_json_str(r#"{ "logging": { "log_dir": "logs" } }"#)
            .expect_err("relative log dir must fail");
        assert!(err.to_string().contains("absolute"));
    }
}
