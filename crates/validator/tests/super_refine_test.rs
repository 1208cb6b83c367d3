//! Context-aware refinements reporting at arbitrary paths.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use serde_json::json;
use stencil_validator::prelude::*;

fn password_form() -> ObjectSchema {
    object()
        .field("password", string().min(8))
        .field("confirm", string().min(8))
        .super_refine(|map, sink| {
            if map.get("password") != map.get("confirm") {
                sink.add_issue(path!["confirm"], "password_mismatch", "Passwords do not match");
            }
        })
}

#[test]
fn mismatched_passwords() {
    let input = Value::from(json!({"password": "password123", "confirm": "different123"}));
    let errors = password_form().validate(&input, &Path::root()).unwrap();
    assert_eq!(errors.len(), 1);

    let error = &errors.errors()[0];
    assert_eq!(error.path, path!["confirm"]);
    assert_eq!(error.code, ErrorCode::Custom("password_mismatch".into()));
    assert_eq!(error.message, "Passwords do not match");
}

#[test]
fn matching_passwords() {
    let input = Value::from(json!({"password": "password123", "confirm": "password123"}));
    assert!(password_form().validate(&input, &Path::root()).is_none());
}

#[test]
fn runs_after_field_failures() {
    let input = Value::from(json!({"password": "short", "confirm": "other"}));
    let errors = password_form().validate(&input, &Path::root()).unwrap();
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "[password] too_small: String must be at least 8 character(s) long, got 5",
            "[confirm] too_small: String must be at least 8 character(s) long, got 5",
            "[confirm] password_mismatch: Passwords do not match",
        ]
    );
}

fn unique_ints() -> ArraySchema {
    array(int()).super_refine(|items, sink| {
        let mut seen = HashSet::new();
        for (index, item) in items.iter().enumerate() {
            if let Some(n) = item.as_i64()
                && !seen.insert(n)
            {
                sink.add_issue_with_meta(
                    PathSegment::from(index),
                    ErrorCode::CustomValidation,
                    format!("Duplicate value {n}"),
                    [("value", n)],
                );
            }
        }
    })
}

#[test]
fn duplicate_reported_at_second_occurrence() {
    let input = Value::from(json!([1, 2, 2]));
    let errors = unique_ints().validate(&input, &Path::root()).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].path, path![2usize]);
    assert_eq!(errors.errors()[0].meta("value"), Some(&json!(2)));
}

#[test]
fn issue_paths_are_relative_to_the_node() {
    let schema = object().field("ids", unique_ints());
    let input = Value::from(json!({"ids": [5, 5, 5]}));
    let errors = schema.validate(&input, &path!["batch"]).unwrap();
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["batch.ids[1]", "batch.ids[2]"]);
}

#[test]
fn sink_can_report_at_the_node_itself() {
    let schema = string().super_refine(|text, sink| {
        if text.trim() != text {
            let at = sink.path().clone();
            sink.add_issue(Path::root(), ErrorCode::InvalidString, format!("{at} has surrounding whitespace"));
        }
    });
    let errors = schema.validate(&Value::from(" x "), &path!["title"]).unwrap();
    assert_eq!(errors.errors()[0].path, path!["title"]);
    assert_eq!(errors.errors()[0].message, "title has surrounding whitespace");
}

#[test]
fn simple_refinements_run_before_super_refinements() {
    let schema = int()
        .super_refine(|_, sink| sink.add_issue(Path::root(), "second", "second"))
        .refine(|_| Err("first".into()));
    let errors = schema.validate(&Value::from(1), &Path::root()).unwrap();
    assert_eq!(errors.summary(), "first; second");
}
