//! Integer schema

use crate::foundation::{ErrorCode, Schema, Scope, ValidationErrors, Value};
use crate::schemas::base::BaseSchema;
use crate::schemas::number::Bounds;

/// Validates integer values. Floats are rejected, even `5.0`.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let age = int().min(0).max(150);
/// assert!(age.validate(&Value::from(42), &Path::root()).is_none());
///
/// let errors = age.validate(&Value::from(42.0), &Path::root()).unwrap();
/// assert_eq!(errors.errors()[0].message, "Expected integer, got float");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntSchema {
    base: BaseSchema<i64>,
    bounds: Bounds<i64>,
    multiple_of: Option<i64>,
}

/// Creates a required integer schema.
#[must_use]
pub fn int() -> IntSchema {
    IntSchema::default()
}

impl IntSchema {
    base_builders!(i64);
    bound_builders!(i64);

    /// Requires an exact multiple of `divisor`. `multiple_of(0)` accepts
    /// only `0`.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(mut self, divisor: i64) -> Self {
        self.multiple_of = Some(divisor);
        self
    }
}

fn is_multiple(num: i64, divisor: i64) -> bool {
    match num.checked_rem(divisor) {
        Some(remainder) => remainder == 0,
        // divisor 0, or i64::MIN % -1
        None => divisor != 0 || num == 0,
    }
}

impl Schema for IntSchema {
    fn type_name(&self) -> &'static str {
        "int"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let num = match value {
            Value::Int(num) => *num,
            Value::UInt(big) => match i64::try_from(*big) {
                Ok(num) => num,
                Err(_) => {
                    self.base.fail(
                        errors,
                        scope.path(),
                        ErrorCode::TooBig,
                        format!("Number must be less than or equal to {}, got {big}", i64::MAX),
                    );
                    return;
                }
            },
            _ => {
                self.base.type_mismatch("integer", value, scope, errors);
                return;
            }
        };

        self.bounds.check(num, &self.base, scope.path(), errors);
        if let Some(divisor) = self.multiple_of
            && !is_multiple(num, divisor)
        {
            self.base.fail(
                errors,
                scope.path(),
                ErrorCode::InvalidType,
                format!("Number must be a multiple of {divisor}, got {num}"),
            );
        }
        self.base.refine(&num, scope, errors);
    }
}
