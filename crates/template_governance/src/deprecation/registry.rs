use crate::deprecation::path::lookup_path;
use crate::deprecation::record::DeprecationRecord;
use crate::version::{parse_version, SemanticVersion, VersionError};
use log::{debug, info};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Per-template set of deprecation records.
#[derive(Debug, Default)]
pub struct DeprecationRegistry {
    records: BTreeMap<String, BTreeSet<DeprecationRecord>>,
}

impl DeprecationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record. Returns `false` when an identical record already
    /// exists for the template.
    pub fn register(&mut self, template_id: &str, record: DeprecationRecord) -> bool {
        let path = record.path().to_string();
        let inserted = self
            .records
            .entry(template_id.to_string())
            .or_default()
            .insert(record);
        debug!(
            "event=deprecation_register module=deprecation status={} template_id={} path={}",
            if inserted { "ok" } else { "duplicate" },
            template_id,
            path
        );
        inserted
    }

    /// Returns every record for the template, ordered by path.
    pub fn records(&self, template_id: &str) -> Vec<&DeprecationRecord> {
        self.records
            .get(template_id)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns records in effect at `current_version` whose field is present
    /// in `data`.
    ///
    /// # Errors
    /// - `VersionError::Parse` when `current_version` does not parse.
    pub fn check(
        &self,
        template_id: &str,
        current_version: &str,
        data: &Value,
    ) -> Result<Vec<&DeprecationRecord>, VersionError> {
        let current = parse_version(current_version)?;
        let hits = self.matching(template_id, data, |record| record.is_active_at(&current));
        if !hits.is_empty() {
            info!(
                "event=deprecation_check module=deprecation status=ok template_id={} version={} hits={}",
                template_id,
                current,
                hits.len()
            );
        }
        Ok(hits)
    }

    /// Returns records already past `removed_in` at `current_version` whose
    /// field is still present in `data`.
    pub fn removed(
        &self,
        template_id: &str,
        current_version: &str,
        data: &Value,
    ) -> Result<Vec<&DeprecationRecord>, VersionError> {
        let current: SemanticVersion = parse_version(current_version)?;
        Ok(self.matching(template_id, data, |record| record.is_removed_at(&current)))
    }

    fn matching<F>(&self, template_id: &str, data: &Value, applies: F) -> Vec<&DeprecationRecord>
    where
        F: Fn(&DeprecationRecord) -> bool,
    {
        let Some(records) = self.records.get(template_id) else {
            return vec![];
        };
        records
            .iter()
            .filter(|record| applies(*record))
            .filter(|record| lookup_path(data, record.path()).is_some())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DeprecationRegistry;
    use crate::deprecation::create_deprecation;
    use serde_json::json;

    fn registry_with_color() -> DeprecationRegistry {
        let mut registry = DeprecationRegistry::new();
        let record = create_deprecation("props.color", "2.0.0", "3.0.0", "use tone", None)
            .expect("record creation");
        assert!(registry.register("button", record));
        registry
    }

    #[test]
    fn identical_records_are_stored_once() {
        let mut registry = registry_with_color();
        let duplicate = create_deprecation("props.color", "2.0.0", "3.0.0", "use tone", None)
            .expect("record creation");
        assert!(!registry.register("button", duplicate));
        assert_eq!(registry.records("button").len(), 1);
    }

    #[test]
    fn absent_field_does_not_fire() {
        let registry = registry_with_color();
        let hits = registry
            .check("button", "2.5.0", &json!({ "props": { "tone": "primary" } }))
            .expect("check");
        assert!(hits.is_empty());
    }

    #[test]
    fn removed_reports_fields_past_removal() {
        let registry = registry_with_color();
        let data = json!({ "props": { "color": "red" } });
        assert!(registry.removed("button", "2.9.0", &data).expect("check").is_empty());
        assert_eq!(registry.removed("button", "3.0.0", &data).expect("check").len(), 1);
    }

    #[test]
    fn unknown_template_has_no_records() {
        let registry = registry_with_color();
        assert!(registry.records("card").is_empty());
        assert!(registry
            .check("card", "9.0.0", &json!({ "props": { "color": "red" } }))
            .expect("check")
            .is_empty());
    }

    #[test]
    fn rejects_unparseable_current_version() {
        let registry = registry_with_color();
        assert!(registry.check("button", "latest", &json!({})).is_err());
    }
}
