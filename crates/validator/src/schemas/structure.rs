//! Struct schema (native records inspected through [`Reflect`])

use std::fmt;
use std::sync::Arc;

use crate::foundation::{ErrorCode, FieldNaming, Reflect, Schema, Scope, TagOrLowerFirst, ValidationErrors, Value, ValueMap};
use crate::schemas::base::BaseSchema;
use crate::schemas::object::Shape;

/// Validates [`Value::Record`] input member by member.
///
/// Member names are resolved through the schema's [`FieldNaming`] policy,
/// [`TagOrLowerFirst`] by default. Members tagged `"-"` are invisible, and a
/// member tagged `omitempty` whose value is zero or empty is validated as
/// [`Value::Null`]. Otherwise the rules match [`ObjectSchema`](crate::schemas::ObjectSchema):
/// an unknown shape key validates `Null`, and strict mode rejects members
/// missing from the shape.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// #[derive(Debug, Clone)]
/// struct Signup {
///     email: String,
///     referrer: String,
/// }
///
/// record!(Signup {
///     email,
///     referrer => "ref,omitempty",
/// });
///
/// let schema = record()
///     .field("email", string().email())
///     .field("ref", string().nilable().min(3));
///
/// let signup = Signup { email: "ann@example.com".into(), referrer: String::new() };
/// assert!(schema.validate(&Value::from(signup), &Path::root()).is_none());
/// ```
#[derive(Clone)]
pub struct StructSchema {
    base: BaseSchema<dyn Reflect>,
    shape: Shape,
    strict: bool,
    naming: Arc<dyn FieldNaming>,
}

/// Creates a required struct schema with an empty shape.
#[must_use]
pub fn record() -> StructSchema {
    StructSchema::default()
}

impl Default for StructSchema {
    fn default() -> Self {
        Self {
            base: BaseSchema::default(),
            shape: Shape::new(),
            strict: false,
            naming: Arc::new(TagOrLowerFirst),
        }
    }
}

impl fmt::Debug for StructSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructSchema")
            .field("base", &self.base)
            .field("shape", &self.shape)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

impl StructSchema {
    base_builders!(dyn Reflect + 'static);

    /// Declares the member whose external name is `name`.
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

    /// Rejects members missing from the shape.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Replaces the member naming policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn naming(mut self, naming: impl FieldNaming + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    /// The declared fields.
    #[must_use]
    pub fn fields(&self) -> &Shape {
        &self.shape
    }

    /// Visible members keyed by external name, with omit-empty applied.
    fn resolve(&self, record: &dyn Reflect) -> ValueMap {
        let mut resolved = ValueMap::new();
        for member in record.members() {
            let tag = member.parsed_tag();
            if tag.hidden {
                continue;
            }
            let name = self.naming.external_name(member.name, &tag);
            let value = if tag.omit_empty && member.value.is_empty_value() {
                Value::Null
            } else {
                member.value
            };
            resolved.insert(name, value);
        }
        resolved
    }
}

impl Schema for StructSchema {
    fn type_name(&self) -> &'static str {
        "struct"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let Value::Record(record) = value else {
            self.base.type_mismatch("struct", value, scope, errors);
            return;
        };
        if self.base.check_depth(scope, errors) {
            return;
        }

        let members = self.resolve(record.as_ref());
        for (name, schema) in &self.shape {
            let member = members.get(name).unwrap_or(&Value::Null);
            schema.validate_in(member, &scope.child(name), errors);
        }

        if self.strict {
            for name in members.keys().filter(|name| !self.shape.contains_key(name.as_str())) {
                let path = scope.path().join(name);
                self.base.fail(
                    errors,
                    &path,
                    ErrorCode::UnrecognizedKeys,
                    format!("Unrecognized field '{name}'"),
                );
            }
        }

        self.base.refine(record.as_ref(), scope, errors);
    }
}
