//! Validating JSON documents with stencil-validator.
//!
//! Run: `cargo run -p stencil-validator --example json_validation`

use serde_json::json;
use stencil_validator::json::{parse, validate_json};
use stencil_validator::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    direct_value_validation();
    config_validation();
    error_reporting();
}

fn status(errors: Option<&ValidationErrors>) -> String {
    match errors {
        None => "valid".to_owned(),
        Some(errors) => format!("invalid ({})", errors.summary()),
    }
}

/// Scalars straight from `json!`.
fn direct_value_validation() {
    println!("=== Direct Value Validation ===\n");

    let min3 = string().min(3);
    println!("string().min(3) on \"hello\": {}", status(validate_json(&min3, &json!("hello")).as_ref()));
    println!("string().min(3) on \"hi\":    {}", status(validate_json(&min3, &json!("hi")).as_ref()));

    let port = int().min(1).max(65535);
    println!("int port on 8080:  {}", status(validate_json(&port, &json!(8080)).as_ref()));
    println!("int port on 80.5:  {}", status(validate_json(&port, &json!(80.5)).as_ref()));

    // No coercion: a numeric string is still a string
    println!("int port on \"80\":  {}", status(validate_json(&port, &json!("80")).as_ref()));

    println!();
}

fn config_schema() -> ObjectSchema {
    let server = object()
        .field("host", string().min(1))
        .field("port", int().min(1).max(65535))
        .field("tls", boolean().nilable())
        .strict();

    let database = object()
        .field("url", string().starts_with("postgres://"))
        .field("pool_size", int().positive().max(64).nilable());

    object()
        .field("server", server)
        .field("database", database)
        .field("replicas", array(string().url()).max(5).nilable())
}

/// A nested configuration file.
fn config_validation() {
    println!("=== Config Validation ===\n");

    let config = json!({
        "server": {"host": "localhost", "port": 8080},
        "database": {"url": "postgres://localhost/db", "pool_size": 8},
        "replicas": ["https://replica-1.internal", "https://replica-2.internal"],
    });
    println!("good config: {}", status(validate_json(&config_schema(), &config).as_ref()));

    let text = r#"{
        "server": {"host": "", "port": 70000, "debug": true},
        "database": {"url": "mysql://localhost/db", "pool_size": 0},
        "replicas": ["not a url"]
    }"#;
    match parse(text) {
        Ok(value) => {
            if let Some(errors) = config_schema().validate(&value, &Path::root()) {
                println!("\n{errors}");
            }
        }
        Err(error) => println!("unparseable config: {error}"),
    }
}

/// Structured output for API responses and forms.
fn error_reporting() {
    println!("=== Error Reporting ===\n");

    let form = object()
        .field("email", string().email())
        .field("tags", array(string().min(2)))
        .refine(|map| if map.contains_key("email") { Ok(()) } else { Err("Email is required".into()) });

    let input = json!({"tags": ["ok", "x"]});
    let Some(errors) = validate_json(&form, &input) else {
        return;
    };

    match serde_json::to_string_pretty(&errors.flatten()) {
        Ok(flattened) => println!("flattened:\n{flattened}\n"),
        Err(error) => println!("failed to serialize: {error}"),
    }
    match serde_json::to_string_pretty(&errors.to_json()) {
        Ok(json) => println!("json:\n{json}"),
        Err(error) => println!("failed to serialize: {error}"),
    }
}
