//! Rendering, grouping and flattening of failure collections.

use pretty_assertions::assert_eq;
use serde_json::json;
use stencil_validator::prelude::*;

fn profile() -> ObjectSchema {
    object()
        .field("name", string().min(2))
        .field("tags", array(string().min(2)))
        .refine(|_| Err("Form is invalid".into()))
}

fn failures() -> ValidationErrors {
    let input = Value::from(json!({"name": "A", "tags": ["x", "y"]}));
    profile().validate(&input, &Path::root()).unwrap()
}

#[test]
fn paths_in_traversal_order() {
    let paths: Vec<Path> = failures().iter().map(|e| e.path.clone()).collect();
    assert_eq!(
        paths,
        vec![path!["name"], path!["tags", 0usize], path!["tags", 1usize], Path::root()]
    );
}

#[test]
fn report_lists_every_failure() {
    insta::assert_snapshot!(failures().report().trim_end(), @r"
Validation failed with 4 error(s):
  1. [name] String must be at least 2 character(s) long, got 1
  2. [tags[0]] String must be at least 2 character(s) long, got 1
  3. [tags[1]] String must be at least 2 character(s) long, got 1
  4. [] Form is invalid
");
}

#[test]
fn flatten_splits_form_and_field_errors() {
    let flattened = failures().flatten();
    assert_eq!(flattened.form_errors, vec!["Form is invalid"]);
    assert_eq!(flattened.field_errors.len(), 2);
    assert_eq!(flattened.field_errors["tags"].len(), 2);

    insta::assert_json_snapshot!(flattened, @r#"
{
  "formErrors": [
    "Form is invalid"
  ],
  "fieldErrors": {
    "name": [
      "String must be at least 2 character(s) long, got 1"
    ],
    "tags": [
      "String must be at least 2 character(s) long, got 1",
      "String must be at least 2 character(s) long, got 1"
    ]
  }
}
"#);
}

#[test]
fn grouping_keeps_first_seen_order() {
    let errors = failures();

    let by_path = errors.group_by_path();
    let keys: Vec<String> = by_path.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["name", "tags[0]", "tags[1]", ""]);

    let by_code = errors.group_by_code();
    let codes: Vec<(&str, usize)> = by_code.iter().map(|(code, group)| (code.as_str(), group.len())).collect();
    assert_eq!(codes, vec![("too_small", 3), ("custom_validation", 1)]);

    assert_eq!(errors.by_code(ErrorCode::TooSmall).len(), 3);
    assert_eq!(errors.by_path(&path!["tags", 1usize]).len(), 1);
}

#[test]
fn json_form_carries_meta_only_when_present() {
    let input = Value::from(json!([[[]]]));
    let options = ValidationOptions::default().with_max_depth(1);
    let errors = validate_with(&array(array(array(int()))), &input, Path::root(), &options).unwrap();
    assert_eq!(
        errors.to_json(),
        json!({
            "errors": [{
                "path": [0],
                "code": "too_big",
                "message": "Maximum nesting depth of 1 exceeded",
                "meta": {"max_depth": 1},
            }],
            "count": 1,
        })
    );

    let plain = failures().to_json();
    assert!(plain["errors"][0].get("meta").is_none());
    assert_eq!(plain["count"], json!(4));
}

#[test]
fn summary_and_display() {
    let errors = string().min(3).email().validate(&Value::from("a"), &path!["email"]).unwrap();
    assert_eq!(
        errors.summary(),
        "String must be at least 3 character(s) long, got 1; Invalid email format"
    );
    assert_eq!(errors.errors()[1].to_string(), "[email] invalid_string: Invalid email format");
    assert_eq!(errors.to_string(), errors.report());
}

#[test]
fn failures_are_std_errors() {
    fn as_error(error: &dyn std::error::Error) -> String {
        error.to_string()
    }
    let errors = failures();
    assert!(as_error(&errors).starts_with("Validation failed with 4 error(s):"));
    assert_eq!(as_error(&errors.errors()[3]), "[] custom_validation: Form is invalid");
}
