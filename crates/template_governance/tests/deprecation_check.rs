use serde_json::json;
use template_governance::{create_deprecation, DeprecationRegistry};

fn registry() -> DeprecationRegistry {
    let mut registry = DeprecationRegistry::new();
    registry.register(
        "button",
        create_deprecation(
            "props.variant",
            "3.0.0",
            "4.0.0",
            "Variant is replaced by intent.",
            Some("props.intent".to_string()),
        )
        .expect("record creation"),
    );
    registry.register(
        "button",
        create_deprecation("legacy", "1.0.0", "2.0.0", "Legacy flag.", None)
            .expect("record creation"),
    );
    registry
}

#[test]
fn future_deprecation_does_not_fire_early() {
    let data = json!({ "props": { "variant": "solid" } });
    let registry = registry();
    let hits = registry.check("button", "2.0.0", &data).expect("check");
    assert!(hits.is_empty());
}

#[test]
fn deprecation_fires_at_boundary_and_after() {
    let data = json!({ "props": { "variant": "solid" } });
    let registry = registry();
    for version in ["3.0.0", "3.4.1", "5.0.0"] {
        let hits = registry.check("button", version, &data).expect("check");
        assert_eq!(hits.len(), 1, "{version}");
        assert_eq!(hits[0].path(), "props.variant");
        assert_eq!(hits[0].replacement(), Some("props.intent"));
    }
}

#[test]
fn reports_every_applicable_record() {
    let data = json!({ "legacy": null, "props": { "variant": "ghost" } });
    let registry = registry();
    let hits = registry.check("button", "3.0.0", &data).expect("check");
    let paths: Vec<&str> = hits.iter().map(|record| record.path()).collect();
    assert_eq!(paths, vec!["legacy", "props.variant"]);
}

#[test]
fn check_does_not_mutate_payload() {
    let data = json!({ "legacy": true });
    let before = data.clone();
    let registry = registry();
    registry.check("button", "9.9.9", &data).expect("check");
    assert_eq!(data, before);
}
