//! Core validation types and traits
//!
//! This module contains the building blocks every schema relies on:
//!
//! - **Paths**: [`Path`], [`PathSegment`]
//! - **Values**: [`Value`], [`ValueMap`], [`ToValue`], and record reflection
//!   through [`Reflect`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`ErrorCode`],
//!   [`SchemaError`]
//! - **Traits**: [`Schema`], with [`validate`] and [`validate_with`] as the
//!   entry points
//!
//! # Architecture
//!
//! ## 1. Decoded input only
//!
//! Schemas never parse bytes. Input arrives as a [`Value`] tree, built from
//! `serde_json::Value` or any serde format, or by hand. Native structs enter
//! as [`Value::Record`].
//!
//! ## 2. One collection per call
//!
//! A top-level call owns one [`ValidationErrors`]. Every node appends to it
//! through [`Schema::validate_in`], so a failure deep in the tree costs a
//! single push and no intermediate allocation.
//!
//! ## 3. Absence means valid
//!
//! ```
//! use stencil_validator::prelude::*;
//!
//! let schema = int().positive();
//! assert!(validate(&schema, &Value::from(3), Path::root()).is_none());
//! assert!(validate(&schema, &Value::from(-3), Path::root()).is_some());
//! ```

mod error;
mod options;
mod path;
mod record;
mod traits;
mod value;

pub use error::{ErrorCode, ErrorMeta, FlattenedErrors, SchemaError, ValidationError, ValidationErrors};
pub use options::{DEFAULT_MAX_DEPTH, ValidationOptions};
pub use path::{ParsePathError, Path, PathSegment};
pub use record::{FieldNaming, Member, MemberTag, Reflect, TagOrLowerFirst};
pub use traits::{Schema, Scope, validate, validate_with};
pub use value::{ToValue, Value, ValueMap};
