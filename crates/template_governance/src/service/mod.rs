//! Governance workflows.
//!
//! # Responsibility
//! - Own one instance of every registry behind an explicit context.
//! - Compose registries into create, publish, deprecate and health-check
//!   workflows.
//!
//! # Invariants
//! - Workflows only change template state through `TemplateGovernance`.
//! - A failed workflow leaves the record as it was.

mod context;
mod workflow;

pub use context::GovernanceContext;
pub use workflow::{HealthReport, PublishRequest, WorkflowError};
