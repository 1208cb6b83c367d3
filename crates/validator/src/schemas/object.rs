//! Object schema (dynamic string-keyed maps)

use std::sync::Arc;

use indexmap::IndexMap;

use crate::foundation::{ErrorCode, Schema, Scope, ValidationErrors, Value, ValueMap};
use crate::schemas::base::BaseSchema;

/// Field name to schema, in declaration order.
pub type Shape = IndexMap<String, Arc<dyn Schema>>;

/// Validates [`Value::Map`] input field by field.
///
/// A declared key that is missing from the input is validated as
/// [`Value::Null`], so a missing key and an explicit null produce the same
/// failure. Extra keys are ignored unless [`strict`](Self::strict) is set.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let schema = object()
///     .field("name", string())
///     .strict();
///
/// let input: Value = [("name", "John"), ("extra", "value")].into_iter().collect();
/// let errors = schema.validate(&input, &Path::root()).unwrap();
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.errors()[0].code, ErrorCode::UnrecognizedKeys);
/// assert_eq!(errors.errors()[0].path, path!["extra"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    base: BaseSchema<ValueMap>,
    shape: Shape,
    strict: bool,
}

/// Creates a required object schema with an empty shape.
#[must_use]
pub fn object() -> ObjectSchema {
    ObjectSchema::default()
}

impl ObjectSchema {
    base_builders!(ValueMap);

    /// Declares `name`, replacing an earlier declaration of the same name.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        self.shape.insert(name.into(), Arc::new(schema));
        self
    }

    /// Declares every field of `shape`.
    #[must_use = "builder methods must be chained or built"]
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape.extend(shape);
        self
    }

    /// Rejects keys missing from the shape.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// The declared fields.
    #[must_use]
    pub fn fields(&self) -> &Shape {
        &self.shape
    }
}

impl Schema for ObjectSchema {
    fn type_name(&self) -> &'static str {
        "object"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let Value::Map(map) = value else {
            self.base.type_mismatch("map", value, scope, errors);
            return;
        };
        if self.base.check_depth(scope, errors) {
            return;
        }

        for (name, schema) in &self.shape {
            let field = map.get(name).unwrap_or(&Value::Null);
            schema.validate_in(field, &scope.child(name), errors);
        }

        if self.strict {
            for key in map.keys().filter(|key| !self.shape.contains_key(key.as_str())) {
                let path = scope.path().join(key);
                self.base.fail(
                    errors,
                    &path,
                    ErrorCode::UnrecognizedKeys,
                    format!("Unrecognized key '{key}'"),
                );
            }
        }

        self.base.refine(map, scope, errors);
    }
}
