//! Array schema

use std::sync::Arc;

use crate::foundation::{ErrorCode, Schema, Scope, ValidationErrors, Value};
use crate::schemas::base::BaseSchema;

/// Validates ordered sequences against one element schema.
///
/// Every element is visited, even after earlier ones fail, and each
/// element's failures land at `path[i]` in index order. Refinements see the
/// whole slice.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let tags = array(string().min(2)).min(1).max(5);
///
/// let input = Value::from(vec![Value::from("ok"), Value::from("x"), Value::from("y")]);
/// let errors = tags.validate(&input, &Path::root()).unwrap();
///
/// let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
/// assert_eq!(paths, ["[1]", "[2]"]);
/// ```
#[derive(Debug, Clone)]
pub struct ArraySchema {
    base: BaseSchema<[Value]>,
    element: Arc<dyn Schema>,
    non_empty: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

/// Creates a required array schema whose elements must match `element`.
#[must_use]
pub fn array(element: impl Schema + 'static) -> ArraySchema {
    ArraySchema {
        base: BaseSchema::default(),
        element: Arc::new(element),
        non_empty: false,
        min_length: None,
        max_length: None,
    }
}

impl ArraySchema {
    base_builders!([Value]);

    /// Requires at least one element.
    #[must_use = "builder methods must be chained or built"]
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Minimum number of elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Maximum number of elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// The element schema.
    #[must_use]
    pub fn element(&self) -> &dyn Schema {
        self.element.as_ref()
    }
}

impl Schema for ArraySchema {
    fn type_name(&self) -> &'static str {
        "array"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let Value::Array(items) = value else {
            self.base.type_mismatch("array", value, scope, errors);
            return;
        };
        if self.base.check_depth(scope, errors) {
            return;
        }

        let path = scope.path();
        let len = items.len();
        if self.non_empty && items.is_empty() {
            self.base.fail(errors, path, ErrorCode::TooSmall, "Array must not be empty");
        }
        if let Some(min) = self.min_length
            && len < min
        {
            self.base.fail(
                errors,
                path,
                ErrorCode::TooSmall,
                format!("Array must have at least {min} element(s), got {len}"),
            );
        }
        if let Some(max) = self.max_length
            && len > max
        {
            self.base.fail(
                errors,
                path,
                ErrorCode::TooBig,
                format!("Array must have at most {max} element(s), got {len}"),
            );
        }

        for (index, item) in items.iter().enumerate() {
            self.element.validate_in(item, &scope.child(index), errors);
        }

        self.base.refine(items, scope, errors);
    }
}
