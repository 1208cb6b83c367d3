//! # stencil-validator
//!
//! A declarative schema validation engine. Describe the expected shape of
//! decoded data once, then validate any number of inputs against it and get
//! back every failure, each addressed by the path where it occurred.
//!
//! ## Quick Start
//!
//! ```
//! use stencil_validator::prelude::*;
//!
//! let user = object()
//!     .field("name", string().min(2))
//!     .field("email", string().email())
//!     .field("age", int().min(18).nilable());
//!
//! let input: Value = serde_json::json!({"name": "J", "email": "nope"}).into();
//! let errors = user.validate(&input, &Path::root()).unwrap();
//!
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors.errors()[0].path, path!["name"]);
//! assert_eq!(errors.errors()[1].code, ErrorCode::InvalidString);
//! ```
//!
//! ## Input
//!
//! Schemas read a [`Value`](foundation::Value) tree. Build it from
//! `serde_json::Value` (see [`json`]), from any serde format, by hand, or
//! from native structs through the [`record!`] macro.
//!
//! ## Built-in Schemas
//!
//! - **String**: [`string`](schemas::string), with length, format, pattern
//!   and membership checks
//! - **Numeric**: [`int`](schemas::int), [`float`](schemas::float), with
//!   bounds, sign and divisibility checks
//! - **Boolean**: [`boolean`](schemas::boolean)
//! - **Collections**: [`array`](schemas::array), [`object`](schemas::object),
//!   [`record`](schemas::record)
//! - **Recursion**: [`lazy`](schemas::lazy)
//!
//! ## Failures
//!
//! A call returns `None` when the input is valid. Otherwise
//! [`ValidationErrors`](foundation::ValidationErrors) holds every failure in
//! traversal order and can be grouped, flattened into form and field
//! errors, rendered as a report, or serialized to JSON.

#[macro_use]
mod macros;

pub mod foundation;
pub mod json;
pub mod prelude;
pub mod schemas;
