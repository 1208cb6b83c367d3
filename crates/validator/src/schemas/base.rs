//! Shared constraint state
//!
//! Every schema variant embeds a [`BaseSchema`] holding what all of them
//! have in common: the nilable flag, the per-code message overrides, the
//! optional message formatter, and the two ordered refinement lists.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::foundation::{ErrorCode, ErrorMeta, Path, Scope, ValidationError, ValidationErrors, Value};

/// Rewrites a message given the failure's path, code and default message.
pub type MessageFormatter = Arc<dyn Fn(&Path, &ErrorCode, &str) -> String + Send + Sync>;

/// Predicate-style refinement over the typed view of a value.
///
/// `Err` with an empty message falls back to the resolved
/// `custom_validation` message.
pub type Refinement<T> = Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Refinement with direct access to the failure collection.
pub type SuperRefinement<T> = Arc<dyn Fn(&T, &mut IssueSink<'_>) + Send + Sync>;

const CUSTOM_VALIDATION_FAILED: &str = "Custom validation failed";

// ============================================================================
// BASE SCHEMA
// ============================================================================

/// State common to every schema, parameterized by the typed view its
/// refinements receive (`str`, `i64`, `[Value]`, ...).
pub struct BaseSchema<T: ?Sized> {
    pub(crate) nilable: bool,
    pub(crate) custom_errors: HashMap<ErrorCode, String>,
    pub(crate) formatter: Option<MessageFormatter>,
    pub(crate) refinements: Vec<Refinement<T>>,
    pub(crate) super_refinements: Vec<SuperRefinement<T>>,
}

impl<T: ?Sized> Default for BaseSchema<T> {
    fn default() -> Self {
        Self {
            nilable: false,
            custom_errors: HashMap::new(),
            formatter: None,
            refinements: Vec::new(),
            super_refinements: Vec::new(),
        }
    }
}

impl<T: ?Sized> Clone for BaseSchema<T> {
    fn clone(&self) -> Self {
        Self {
            nilable: self.nilable,
            custom_errors: self.custom_errors.clone(),
            formatter: self.formatter.clone(),
            refinements: self.refinements.clone(),
            super_refinements: self.super_refinements.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for BaseSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseSchema")
            .field("nilable", &self.nilable)
            .field("custom_errors", &self.custom_errors)
            .field("formatter", &self.formatter.is_some())
            .field("refinements", &self.refinements.len())
            .field("super_refinements", &self.super_refinements.len())
            .finish()
    }
}

impl<T: ?Sized> BaseSchema<T> {
    /// Resolves the message for `code`: formatter first, then the override
    /// table, then `default`.
    pub(crate) fn message(&self, path: &Path, code: &ErrorCode, default: &str) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter(path, code, default);
        }
        match self.custom_errors.get(code) {
            Some(message) => message.clone(),
            None => default.to_owned(),
        }
    }

    /// Records a failure whose message goes through resolution.
    pub(crate) fn fail(
        &self,
        errors: &mut ValidationErrors,
        path: &Path,
        code: ErrorCode,
        default: impl AsRef<str>,
    ) {
        let message = self.message(path, &code, default.as_ref());
        errors.push(ValidationError::new(path, code, message));
    }

    /// Handles the absence sentinel. Returns `true` when the node is done:
    /// the value was `Null`, and `required` was recorded unless nilable.
    pub(crate) fn check_absent(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) -> bool {
        if !value.is_null() {
            return false;
        }
        if !self.nilable {
            self.fail(errors, scope.path(), ErrorCode::Required, "Required");
        }
        true
    }

    /// Records the single `invalid_type` failure for a kind mismatch.
    pub(crate) fn type_mismatch(
        &self,
        expected: &str,
        value: &Value,
        scope: &Scope<'_>,
        errors: &mut ValidationErrors,
    ) {
        self.fail(
            errors,
            scope.path(),
            ErrorCode::InvalidType,
            format!("Expected {expected}, got {}", value.kind()),
        );
    }

    /// Depth guard for composites. Returns `true` when the node must not
    /// descend; a `too_big` failure was recorded.
    pub(crate) fn check_depth(&self, scope: &Scope<'_>, errors: &mut ValidationErrors) -> bool {
        if !scope.depth_exceeded() {
            return false;
        }
        let max_depth = scope.options().max_depth;
        debug!(path = %scope.path(), max_depth, "maximum nesting depth reached");
        let code = ErrorCode::TooBig;
        let message = self.message(
            scope.path(),
            &code,
            &format!("Maximum nesting depth of {max_depth} exceeded"),
        );
        errors.push(ValidationError::new(scope.path(), code, message).with_meta("max_depth", max_depth));
        true
    }

    /// Runs simple refinements, then super-refinements, in declaration order.
    pub(crate) fn refine(&self, value: &T, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        for refinement in &self.refinements {
            if let Err(message) = refinement(value) {
                let message = if message.is_empty() {
                    self.message(scope.path(), &ErrorCode::CustomValidation, CUSTOM_VALIDATION_FAILED)
                } else {
                    message
                };
                errors.push(ValidationError::new(scope.path(), ErrorCode::CustomValidation, message));
            }
        }

        for super_refinement in &self.super_refinements {
            let mut sink = IssueSink {
                base: scope.path(),
                errors: &mut *errors,
            };
            super_refinement(value, &mut sink);
        }
    }
}

// ============================================================================
// ISSUE SINK
// ============================================================================

/// Handed to a super-refinement for the duration of one call.
///
/// Issues land at the bound base path joined with the relative path given
/// to [`add_issue`](Self::add_issue). Messages are used verbatim.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let schema = object()
///     .field("password", string())
///     .field("confirm", string())
///     .super_refine(|map, sink| {
///         if map.get("password") != map.get("confirm") {
///             sink.add_issue(path!["confirm"], "passwords_mismatch", "Passwords do not match");
///         }
///     });
///
/// let input: Value = [("password", "a"), ("confirm", "b")].into_iter().collect();
/// let errors = schema.validate(&input, &Path::root()).unwrap();
/// assert_eq!(errors.errors()[0].path, path!["confirm"]);
/// ```
pub struct IssueSink<'a> {
    base: &'a Path,
    errors: &'a mut ValidationErrors,
}

impl IssueSink<'_> {
    /// Base path of the schema node that owns the refinement.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.base
    }

    /// Records a failure at `base + relative`.
    pub fn add_issue(
        &mut self,
        relative: impl Into<Path>,
        code: impl Into<ErrorCode>,
        message: impl Into<Cow<'static, str>>,
    ) {
        let path = self.base.concat(&relative.into());
        self.errors.push(ValidationError::new(path, code, message));
    }

    /// Records a failure with metadata at `base + relative`.
    pub fn add_issue_with_meta<K, V>(
        &mut self,
        relative: impl Into<Path>,
        code: impl Into<ErrorCode>,
        message: impl Into<Cow<'static, str>>,
        meta: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        let path = self.base.concat(&relative.into());
        let meta: ErrorMeta = meta.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.errors
            .push(ValidationError::new(path, code, message).with_meta_map(meta));
    }
}

impl fmt::Debug for IssueSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssueSink")
            .field("base", self.base)
            .field("errors", &self.errors.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
