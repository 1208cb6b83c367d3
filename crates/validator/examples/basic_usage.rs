//! Basic usage example for stencil-validator

use stencil_validator::prelude::*;

#[derive(Debug, Clone)]
struct Signup {
    user_name: String,
    password: String,
    confirm: String,
    accept_terms: bool,
}

record!(Signup {
    user_name => "username",
    password,
    confirm,
    accept_terms => "terms",
});

fn main() {
    // Create a simple string schema
    let schema = string().min(5);

    // Valid input
    match schema.validate(&Value::from("hello"), &Path::root()) {
        None => println!("✓ 'hello' is valid (length >= 5)"),
        Some(errors) => println!("✗ Error: {errors}"),
    }

    // Invalid input
    match schema.validate(&Value::from("hi"), &Path::root()) {
        None => println!("✓ 'hi' is valid"),
        Some(errors) => println!("✗ 'hi' is invalid: {}", errors.summary()),
    }

    // A native struct, checked across fields
    let signup = record()
        .field("username", string().min(3).max(20))
        .field("password", string().min(8))
        .field("confirm", string())
        .field("terms", boolean().refine(|accepted| {
            if *accepted { Ok(()) } else { Err("Terms must be accepted".into()) }
        }))
        .super_refine(|record, sink| {
            if let Some(signup) = record.downcast_ref::<Signup>()
                && signup.password != signup.confirm
            {
                sink.add_issue(path!["confirm"], "password_mismatch", "Passwords do not match");
            }
        });

    let input = Signup {
        user_name: "al".into(),
        password: "correct horse".into(),
        confirm: "correct h0rse".into(),
        accept_terms: false,
    };

    if let Some(errors) = signup.validate(&Value::from(input), &Path::root()) {
        println!("\n{errors}");
    }
}
