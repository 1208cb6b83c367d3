//! The schema abstraction and its traversal entry points
//!
//! Every schema variant implements [`Schema`]. Composite schemas hold their
//! children as `Arc<dyn Schema>` and call [`Schema::validate_in`] on them with
//! a child [`Scope`], appending into the one [`ValidationErrors`] owned by the
//! top-level call.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::foundation::error::ValidationErrors;
use crate::foundation::options::ValidationOptions;
use crate::foundation::path::{Path, PathSegment};
use crate::foundation::value::Value;

// ============================================================================
// SCHEMA TRAIT
// ============================================================================

/// A node in a tree of validation rules.
///
/// Implementors only write [`validate_in`](Schema::validate_in). It appends
/// what it finds and never returns early on behalf of siblings.
/// [`validate`](Schema::validate) is the convenience entry point.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let schema = string().min(5);
///
/// assert!(schema.validate(&Value::from("hello"), &Path::root()).is_none());
///
/// let errors = schema.validate(&Value::from("hi"), &Path::root()).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.errors()[0].code, ErrorCode::TooSmall);
/// ```
pub trait Schema: fmt::Debug + Send + Sync {
    /// Stable short name of the schema kind (`"string"`, `"array"`, ...).
    fn type_name(&self) -> &'static str;

    /// Validates `value` at `scope`, appending every failure to `errors`.
    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors);

    /// Validates `value` with default options. `None` means valid.
    fn validate(&self, value: &Value, path: &Path) -> Option<ValidationErrors> {
        validate_with(self, value, path.clone(), &ValidationOptions::default())
    }
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        (**self).validate_in(value, scope, errors);
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        (**self).validate_in(value, scope, errors);
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// Where the traversal currently is: path, nesting depth and the options of
/// the enclosing call.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    path: Path,
    depth: usize,
    options: &'a ValidationOptions,
}

impl<'a> Scope<'a> {
    /// Top-level scope at `path`, depth 0.
    #[must_use]
    pub fn new(path: Path, options: &'a ValidationOptions) -> Self {
        Self {
            path,
            depth: 0,
            options,
        }
    }

    /// Scope of a child one segment below this one.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Scope<'a> {
        Scope {
            path: self.path.join(segment),
            depth: self.depth + 1,
            options: self.options,
        }
    }

    /// Current path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of composite levels above this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Options of the enclosing validation call.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        self.options
    }

    /// Whether a composite at this scope must stop descending.
    #[must_use]
    pub fn depth_exceeded(&self) -> bool {
        self.depth >= self.options.max_depth
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates `value` against `schema` with default options.
///
/// Returns `None` when the value is valid, else the failures found.
/// `path` is normally [`Path::root`], but can be pre-seeded when validating
/// a sub-document.
pub fn validate<S: Schema + ?Sized>(
    schema: &S,
    value: &Value,
    path: impl Into<Path>,
) -> Option<ValidationErrors> {
    validate_with(schema, value, path, &ValidationOptions::default())
}

/// Validates `value` against `schema` with explicit options.
pub fn validate_with<S: Schema + ?Sized>(
    schema: &S,
    value: &Value,
    path: impl Into<Path>,
    options: &ValidationOptions,
) -> Option<ValidationErrors> {
    let scope = Scope::new(path.into(), options);
    trace!(schema = schema.type_name(), path = %scope.path(), "validating value");

    let mut errors = ValidationErrors::new();
    schema.validate_in(value, &scope, &mut errors);

    if !errors.is_empty() {
        debug!(
            schema = schema.type_name(),
            path = %scope.path(),
            failures = errors.len(),
            "validation failed"
        );
    }
    errors.into_option()
}
