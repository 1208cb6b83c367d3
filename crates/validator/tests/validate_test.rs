//! End-to-end validation of decoded documents.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use stencil_validator::prelude::*;

fn input(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn paths(errors: &ValidationErrors) -> Vec<String> {
    errors.iter().map(|e| e.path.to_string()).collect()
}

fn user_schema() -> ObjectSchema {
    object()
        .field("name", string().min(2).max(50))
        .field("email", string().email())
        .field("age", int().min(0).max(150).nilable())
        .field("roles", array(string().one_of(["admin", "user"])).non_empty())
        .field(
            "address",
            object()
                .field("city", string().min(1))
                .field("zip", string().regex(r"^\d{5}$").unwrap())
                .nilable(),
        )
}

// ============================================================================
// BASIC OUTCOMES
// ============================================================================

#[test]
fn short_string_fails_at_root() {
    let errors = string().min(5).validate(&Value::from("hi"), &Path::root()).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].code, ErrorCode::TooSmall);
    assert!(errors.errors()[0].path.is_root());
}

#[test]
fn valid_document_has_no_errors() {
    let doc = input(json!({
        "name": "Ann",
        "email": "ann@example.com",
        "roles": ["admin"],
        "address": {"city": "Oslo", "zip": "01234"},
    }));
    assert!(user_schema().validate(&doc, &Path::root()).is_none());
}

#[test]
fn every_failure_is_collected_in_traversal_order() {
    let doc = input(json!({
        "name": "A",
        "email": "not-an-email",
        "age": 200,
        "roles": ["admin", "root", "guest"],
        "address": {"city": "", "zip": "12"},
    }));
    let errors = user_schema().validate(&doc, &Path::root()).unwrap();
    assert_eq!(
        paths(&errors),
        vec!["name", "email", "age", "roles[1]", "roles[2]", "address.city", "address.zip"]
    );
    assert!(errors.iter().all(|e| !e.message.is_empty()));
}

#[test]
fn pre_seeded_path_prefixes_every_failure() {
    let errors = user_schema()
        .validate(&input(json!({"name": "Ann"})), &path!["payload", 3usize])
        .unwrap();
    assert_eq!(paths(&errors), vec!["payload[3].email", "payload[3].roles"]);
}

// ============================================================================
// TYPES AND ABSENCE
// ============================================================================

#[rstest]
#[case::string(json!("5"), "Expected integer, got string")]
#[case::float(json!(5.5), "Expected integer, got float")]
#[case::bool(json!(true), "Expected integer, got boolean")]
#[case::array(json!([5]), "Expected integer, got array")]
#[case::map(json!({"n": 5}), "Expected integer, got map")]
fn no_coercion_between_types(#[case] value: serde_json::Value, #[case] message: &str) {
    let errors = int().validate(&input(value), &Path::root()).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].code, ErrorCode::InvalidType);
    assert_eq!(errors.errors()[0].message, message);
}

#[test]
fn whole_number_floats_stay_floats() {
    assert!(int().validate(&input(json!(5.0)), &Path::root()).is_some());
    assert!(float().validate(&input(json!(5)), &Path::root()).is_some());
}

#[test]
fn missing_required_field_and_null_agree() {
    let schema = object().field("email", string());
    let missing = schema.validate(&input(json!({})), &Path::root()).unwrap();
    let null = schema.validate(&input(json!({"email": null})), &Path::root()).unwrap();
    assert_eq!(missing, null);
    assert_eq!(missing.errors()[0].to_string(), "[email] required: Required");
}

#[test]
fn nilable_skips_constraints_on_absence() {
    let schema = string().min(100).email().nilable();
    assert!(schema.validate(&Value::Null, &Path::root()).is_none());
}

// ============================================================================
// STRICT MODE
// ============================================================================

#[test]
fn strict_object_rejects_extra_key() {
    let schema = object().field("name", string()).strict();
    let errors = schema
        .validate(&input(json!({"name": "John", "extra": "value"})), &Path::root())
        .unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].code, ErrorCode::UnrecognizedKeys);
    assert_eq!(errors.errors()[0].path, path!["extra"]);
}

#[test]
fn strict_applies_per_level() {
    let schema = object().field("inner", object().field("a", int()).strict());
    let errors = schema
        .validate(&input(json!({"inner": {"a": 1, "b": 2}, "outer_extra": 1})), &Path::root())
        .unwrap();
    assert_eq!(paths(&errors), vec!["inner.b"]);
}

// ============================================================================
// MESSAGES
// ============================================================================

#[test]
fn formatter_wins_over_override_table() {
    let schema = string()
        .min(3)
        .custom_error(ErrorCode::TooSmall, "table")
        .error_formatter(|_, code, _| format!("formatted {code}"));
    let errors = schema.validate(&Value::from("a"), &Path::root()).unwrap();
    assert_eq!(errors.summary(), "formatted too_small");
}

#[test]
fn override_table_replaces_default() {
    let schema = object().field("age", int().min(18).custom_error("too_small", "Must be an adult"));
    let errors = schema.validate(&input(json!({"age": 12})), &Path::root()).unwrap();
    assert_eq!(errors.errors()[0].message, "Must be an adult");
}

#[test]
fn refinement_message_is_kept() {
    let schema = int()
        .custom_error(ErrorCode::CustomValidation, "table")
        .refine(|n| if n % 2 == 0 { Ok(()) } else { Err("Must be even".into()) })
        .refine(|_| Err(String::new()));
    let errors = schema.validate(&Value::from(3), &Path::root()).unwrap();
    let messages: Vec<&str> = errors.iter().map(|e| e.message.as_ref()).collect();
    assert_eq!(messages, vec!["Must be even", "table"]);
}

// ============================================================================
// OPTIONS
// ============================================================================

#[test]
fn depth_limit_is_reported_once_per_branch() {
    let schema = array(array(int()));
    let doc = input(json!([[1], [2]]));
    let options = ValidationOptions::default().with_max_depth(1);
    let errors = validate_with(&schema, &doc, Path::root(), &options).unwrap();
    assert_eq!(paths(&errors), vec!["[0]", "[1]"]);
    assert!(errors.iter().all(|e| e.code == ErrorCode::TooBig));
    assert_eq!(errors.errors()[0].meta("max_depth"), Some(&json!(1)));
}

#[test]
fn schemas_are_shareable_across_threads() {
    let schema = std::sync::Arc::new(user_schema());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            std::thread::spawn(move || {
                let doc = input(json!({"name": "x".repeat(i + 1)}));
                schema.validate(&doc, &Path::root()).map_or(0, |e| e.len())
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![3, 2, 2, 2]);
}
