//! Test: Groups are descended into but never annotated

use crate::helpers::*;

/// Only the step whose pattern misses is skipped; the group is left alone
#[test]
fn test_group_children_evaluated_individually() {
    let (document, report) = rewrite(
        r#"
steps:
  - group: "G"
    key: g
    steps:
      - label: go
        command: go test ./...
        skip_if_unchanged: ["*.go"]
      - label: js
        command: npm test
        skip_if_unchanged: ["*.js"]
"#,
        &["main.go"],
    );

    assert_yaml_eq(
        &document,
        r#"
steps:
  - group: "G"
    key: g
    steps:
      - label: go
        command: go test ./...
      - label: js
        command: npm test
        skip: true
"#,
    );

    let group = step_at(&document, &[0]);
    assert!(group.get("skip").is_none());
    assert_eq!(report.groups, 1);
    assert_eq!(report.outcome("js").unwrap().groups, vec!["G".to_string()]);
}

/// A group stays unmarked even when every child is skipped
#[test]
fn test_group_with_all_children_skipped() {
    let (document, report) = rewrite(
        r#"
steps:
  - group: docs
    steps:
      - label: lint docs
        skip_if_unchanged: ["docs/**"]
      - label: build site
        skip_if_unchanged: ["site/**"]
"#,
        &["src/lib.rs"],
    );

    assert_eq!(keys(step_at(&document, &[0])), vec!["group", "steps"]);
    assert_skipped(step_at(&document, &[0, 0]));
    assert_skipped(step_at(&document, &[0, 1]));
    assert_eq!(report.skipped(), 2);
}

/// Groups nest to any depth, mixed with top-level steps
#[test]
fn test_nested_groups_and_siblings() {
    let (document, report) = rewrite(
        r#"
steps:
  - label: top
    skip_if_unchanged: ["top/**"]
  - wait
  - group: outer
    steps:
      - label: middle
        skip_if_unchanged: ["middle/**"]
      - group: inner
        steps:
          - label: bottom
            skip_if_unchanged: ["bottom/**"]
"#,
        &["bottom/x.txt"],
    );

    assert_skipped(step_at(&document, &[0]));
    assert_eq!(step_at(&document, &[1]), &parse("wait"));
    assert_skipped(step_at(&document, &[2, 0]));
    assert_runs(step_at(&document, &[2, 1, 0]));
    assert!(step_at(&document, &[2, 1]).get("skip").is_none());

    let bottom = report.outcome("bottom").unwrap();
    assert_eq!(bottom.display_name(), "outer / inner / bottom");
    assert_eq!(report.groups, 2);
    assert_eq!(report.unrecognized, 1);
}

/// Numeric group names still make a group; numeric patterns match as text
#[test]
fn test_non_string_scalars() {
    let (document, report) = rewrite(
        r#"
steps:
  - group: 7
    steps:
      - label: archive
        skip_if_unchanged: [2024]
      - label: flags
        skip_if_unchanged: [true]
"#,
        &["2024"],
    );

    assert!(step_at(&document, &[0]).get("skip").is_none());
    assert_runs(step_at(&document, &[0, 0]));
    assert_skipped(step_at(&document, &[0, 1]));
    assert_eq!(report.groups, 1);
    assert_eq!(report.outcome("archive").unwrap().display_name(), "7 / archive");
}
