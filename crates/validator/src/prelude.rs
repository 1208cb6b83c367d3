//! Prelude module for convenient imports.
//!
//! Provides a single `use stencil_validator::prelude::*;` import that brings
//! in the schema factories, the input and error types, and the macros.
//!
//! # Examples
//!
//! ```
//! use stencil_validator::prelude::*;
//!
//! let username = string().min(3).max(20);
//! let age = int().min(18).max(100);
//! let tags = array(string()).min(1).max(10);
//!
//! assert!(username.validate(&Value::from("alice"), &Path::root()).is_none());
//! assert!(age.validate(&Value::from(17), &Path::root()).is_some());
//! assert!(tags.validate(&Value::Array(vec![]), &Path::root()).is_some());
//! ```

// ============================================================================
// FOUNDATION: Paths, values, errors and the schema trait
// ============================================================================

pub use crate::foundation::{
    ErrorCode, FieldNaming, FlattenedErrors, Member, MemberTag, Path, PathSegment, Reflect,
    Schema, SchemaError, TagOrLowerFirst, ToValue, ValidationError, ValidationErrors,
    ValidationOptions, Value, ValueMap, validate, validate_with,
};

// ============================================================================
// SCHEMAS: Factories and builder types
// ============================================================================

pub use crate::schemas::{
    ArraySchema, BoolSchema, FloatSchema, IntSchema, IssueSink, LazySchema, LengthMode,
    ObjectSchema, Shape, StringSchema, StructSchema, array, boolean, float, int, lazy, object,
    record, string,
};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{path, record, shape};
