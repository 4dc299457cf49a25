use crate::config::MigrationConfig;
use crate::migration::MigrationError;
use crate::version::parse_version;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Payload transformation for one step.
///
/// Receives the accumulated payload by value and returns the transformed
/// payload, or a message describing why the payload cannot be migrated.
pub type MigrationFn = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

/// One registered `from -> to` transformation.
#[derive(Clone)]
pub struct MigrationStep {
    pub id: String,
    pub from: String,
    pub to: String,
    migrate: MigrationFn,
}

impl MigrationStep {
    pub fn new<F>(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        migrate: F,
    ) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            migrate: Arc::new(migrate),
        }
    }

    /// Runs this step's transformation.
    pub fn apply(&self, data: Value) -> Result<Value, String> {
        (self.migrate)(data)
    }
}

impl Debug for MigrationStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStep")
            .field("id", &self.id)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Result of a successful chain execution.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub data: Value,
    /// Steps in the order they were applied. Empty for `from == to`.
    pub applied: Vec<MigrationStep>,
}

/// Per-template migration step registry.
#[derive(Debug)]
pub struct MigrationRegistry {
    steps: BTreeMap<String, Vec<MigrationStep>>,
    max_chain_length: usize,
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::with_config(&MigrationConfig::default())
    }
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &MigrationConfig) -> Self {
        Self {
            steps: BTreeMap::new(),
            max_chain_length: config.max_chain_length,
        }
    }

    /// Appends one step to the template's step list.
    ///
    /// `from`/`to` are stored in canonical form. Duplicate `(from, to)` pairs
    /// are kept; resolution prefers the earlier registration.
    ///
    /// # Errors
    /// - `InvalidVersion` when either endpoint does not parse.
    /// - `SelfLoop` when both endpoints are the same version.
    pub fn register(
        &mut self,
        template_id: &str,
        mut step: MigrationStep,
    ) -> Result<(), MigrationError> {
        step.from = canonical(step.from.as_str())?;
        step.to = canonical(step.to.as_str())?;
        if step.from == step.to {
            return Err(MigrationError::SelfLoop {
                step_id: step.id,
                version: step.from,
            });
        }

        debug!(
            "event=migration_register module=migration status=ok template_id={} step_id={} from={} to={}",
            template_id, step.id, step.from, step.to
        );
        self.steps
            .entry(template_id.to_string())
            .or_default()
            .push(step);
        Ok(())
    }

    /// Returns registered steps in registration order.
    pub fn steps(&self, template_id: &str) -> &[MigrationStep] {
        self.steps
            .get(template_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns template ids with at least one step, sorted.
    pub fn template_ids(&self) -> Vec<String> {
        self.steps.keys().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Resolves the chain bridging `from` and `to` without running it.
    pub fn plan(
        &self,
        template_id: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<&MigrationStep>, MigrationError> {
        let source = canonical(from)?;
        let target = canonical(to)?;
        if source == target {
            return Ok(vec![]);
        }

        let steps = self.steps(template_id);
        let chain = shortest_chain(steps, source.as_str(), target.as_str()).ok_or_else(|| {
            MigrationError::NoMigrationPath {
                template_id: template_id.to_string(),
                from: source.clone(),
                to: target.clone(),
            }
        })?;

        if chain.len() > self.max_chain_length {
            return Err(MigrationError::ChainTooLong {
                length: chain.len(),
                max: self.max_chain_length,
            });
        }
        Ok(chain.into_iter().map(|index| &steps[index]).collect())
    }

    pub fn has_path(&self, template_id: &str, from: &str, to: &str) -> bool {
        self.plan(template_id, from, to).is_ok()
    }

    /// Migrates `data` from `from` to `to` through the resolved chain.
    ///
    /// Steps run synchronously in chain order. A failing step aborts the
    /// chain and the partially migrated payload is dropped.
    pub async fn migrate(
        &self,
        template_id: &str,
        data: Value,
        from: &str,
        to: &str,
    ) -> Result<MigrationOutcome, MigrationError> {
        let chain = self.plan(template_id, from, to).inspect_err(|err| {
            warn!(
                "event=migration_apply module=migration status=rejected template_id={} reason={}",
                template_id, err
            );
        })?;

        let mut data = data;
        for step in &chain {
            data = step.apply(data).map_err(|message| {
                warn!(
                    "event=migration_apply module=migration status=error template_id={} step_id={}",
                    template_id, step.id
                );
                MigrationError::StepFailed {
                    step_id: step.id.clone(),
                    message,
                }
            })?;
        }

        info!(
            "event=migration_apply module=migration status=ok template_id={} from={} to={} steps={}",
            template_id,
            from.trim(),
            to.trim(),
            chain.len()
        );
        Ok(MigrationOutcome {
            data,
            applied: chain.into_iter().cloned().collect(),
        })
    }
}

/// Graph node for a version: canonical text without build metadata.
fn canonical(version: &str) -> Result<String, MigrationError> {
    parse_version(version)
        .map(|parsed| parsed.without_build().to_string())
        .map_err(|_| MigrationError::InvalidVersion(version.to_string()))
}

/// Breadth-first search over steps as edges; returns step indices.
fn shortest_chain(steps: &[MigrationStep], source: &str, target: &str) -> Option<Vec<usize>> {
    // node -> (previous node, step index) that first reached it
    let mut reached: HashMap<&str, Option<(&str, usize)>> = HashMap::new();
    let mut queue = VecDeque::new();
    reached.insert(source, None);
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        for (index, step) in steps.iter().enumerate() {
            if step.from != node || reached.contains_key(step.to.as_str()) {
                continue;
            }
            reached.insert(step.to.as_str(), Some((node, index)));
            if step.to == target {
                return Some(unwind(&reached, target));
            }
            queue.push_back(step.to.as_str());
        }
    }
    None
}

fn unwind(reached: &HashMap<&str, Option<(&str, usize)>>, target: &str) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut node = target;
    while let Some(Some((previous, index))) = reached.get(node) {
        chain.push(*index);
        node = *previous;
    }
    chain.reverse();
    chain
}
