//! Test: Everything except the directive survives the rewrite

use crate::helpers::*;
use skip_unchanged::Pipeline;

const PIPELINE: &str = r#"
env:
  GO111MODULE: "on"
agents:
  queue: default
steps:
  - label: ":go: test"
    key: go-test
    skip_if_unchanged:
      - "**/*.go"
      - go.mod
    command:
      - go vet ./...
      - go test ./...
    env:
      CGO_ENABLED: "0"
    retry:
      automatic:
        limit: 2
  - block: ":rocket: Release?"
  - group: ":package: Packaging"
    steps:
      - label: docker
        depends_on: go-test
        skip_if_unchanged: [Dockerfile]
        plugins:
          - docker-compose#v4.16.0:
              build: app
        timeout_in_minutes: 15
"#;

/// Sibling fields keep their relative order; `skip` lands at the end
#[test]
fn test_field_order_preserved() {
    let (document, _) = rewrite(PIPELINE, &["README.md"]);

    assert_eq!(
        keys(step_at(&document, &[0])),
        vec!["label", "key", "command", "env", "retry", "skip"]
    );
    assert_eq!(
        keys(step_at(&document, &[2, 0])),
        vec!["label", "depends_on", "plugins", "timeout_in_minutes", "skip"]
    );
    assert_eq!(keys(&document), vec!["env", "agents", "steps"]);
}

/// Top-level keys and untouched values come through verbatim
#[test]
fn test_opaque_fields_verbatim() {
    let (document, _) = rewrite(PIPELINE, &["cmd/main.go"]);
    let original = parse(PIPELINE);

    assert_eq!(document["env"], original["env"]);
    assert_eq!(document["agents"], original["agents"]);
    assert_eq!(document["steps"][1], original["steps"][1]);
    assert_eq!(document["steps"][0]["retry"], original["steps"][0]["retry"]);
    assert_eq!(
        document["steps"][2]["steps"][0]["plugins"],
        original["steps"][2]["steps"][0]["plugins"]
    );
    assert_runs(step_at(&document, &[0]));
    assert_skipped(step_at(&document, &[2, 0]));
}

/// Same input, same bytes
#[test]
fn test_output_is_deterministic() {
    let first = rewrite_to_yaml(PIPELINE, &["Dockerfile", "main.go"]);
    for _ in 0..5 {
        assert_eq!(rewrite_to_yaml(PIPELINE, &["main.go", "Dockerfile"]), first);
    }
}

/// Feeding the output back in is a no-op
#[test]
fn test_rewrite_is_idempotent() {
    let once = rewrite_to_yaml(PIPELINE, &["README.md"]);

    let mut pipeline = Pipeline::from_yaml(&once).unwrap();
    let report = pipeline.process(&["README.md"]).unwrap();

    assert!(report.outcomes.is_empty());
    assert_eq!(pipeline.to_yaml().unwrap(), once);
}

/// The marker is emitted as a YAML boolean, not a string
#[test]
fn test_skip_marker_is_boolean() {
    let yaml = rewrite_to_yaml(PIPELINE, &[]);
    assert!(yaml.contains("skip: true"));
    assert!(!yaml.contains("skip: 'true'"));
    assert!(!yaml.contains("skip_if_unchanged"));
}

/// Pre-existing `skip` values are never duplicated
#[test]
fn test_existing_skip_not_duplicated() {
    let (document, _) = rewrite(
        r#"
steps:
  - label: disabled
    skip: false
    skip_if_unchanged: ["*.go"]
  - label: reason
    skip: "broken upstream"
    skip_if_unchanged: ["*.go"]
"#,
        &[],
    );

    assert_eq!(keys(step_at(&document, &[0])), vec!["label", "skip"]);
    assert_skipped(step_at(&document, &[0]));
    assert_eq!(
        step_at(&document, &[1])["skip"],
        serde_yaml::Value::String("broken upstream".to_string())
    );
    assert_eq!(keys(step_at(&document, &[1])), vec!["label", "skip"]);
}

/// Directives pulled in through `<<` merge keys are honored and stripped
#[test]
fn test_anchored_directive_via_merge_key() {
    let pipeline = r#"
x-go: &go
  skip_if_unchanged: ["*.go"]
steps:
  - <<: *go
    command: go test
  - <<: *go
    label: vet
"#;

    let (document, report) = rewrite(pipeline, &["README.md"]);
    assert_skipped(step_at(&document, &[0]));
    assert_eq!(keys(step_at(&document, &[0])), vec!["command", "skip"]);
    assert_skipped(step_at(&document, &[1]));
    assert_eq!(report.skipped(), 2);

    let (document, _) = rewrite(pipeline, &["main.go"]);
    assert_runs(step_at(&document, &[0]));
    assert_eq!(keys(step_at(&document, &[0])), vec!["command"]);
}
