//! Float schema

use crate::foundation::{ErrorCode, Schema, Scope, ValidationErrors, Value};
use crate::schemas::base::BaseSchema;
use crate::schemas::number::Bounds;

/// Tolerance on the fractional part of `value / divisor` for
/// [`FloatSchema::multiple_of`].
pub const MULTIPLE_OF_EPSILON: f64 = 1e-4;

/// Validates float values. Integers are rejected, even `5`.
#[derive(Debug, Clone, Default)]
pub struct FloatSchema {
    base: BaseSchema<f64>,
    bounds: Bounds<f64>,
    multiple_of: Option<f64>,
}

/// Creates a required float schema.
#[must_use]
pub fn float() -> FloatSchema {
    FloatSchema::default()
}

impl FloatSchema {
    base_builders!(f64);
    bound_builders!(f64);

    /// Requires `value / divisor` to be within [`MULTIPLE_OF_EPSILON`] of a
    /// whole number. This is an approximation: binary floats cannot
    /// represent most decimal multiples exactly.
    #[must_use = "builder methods must be chained or built"]
    pub fn multiple_of(mut self, divisor: f64) -> Self {
        self.multiple_of = Some(divisor);
        self
    }
}

fn is_multiple(num: f64, divisor: f64) -> bool {
    if divisor == 0.0 {
        return num == 0.0;
    }
    let ratio = num / divisor;
    if !ratio.is_finite() {
        return false;
    }
    let fraction = (ratio - ratio.trunc()).abs();
    fraction <= MULTIPLE_OF_EPSILON || fraction >= 1.0 - MULTIPLE_OF_EPSILON
}

impl Schema for FloatSchema {
    fn type_name(&self) -> &'static str {
        "float"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let Value::Float(num) = value else {
            self.base.type_mismatch("float", value, scope, errors);
            return;
        };

        self.bounds.check(*num, &self.base, scope.path(), errors);
        if let Some(divisor) = self.multiple_of
            && !is_multiple(*num, divisor)
        {
            self.base.fail(
                errors,
                scope.path(),
                ErrorCode::InvalidType,
                format!("Number must be a multiple of {divisor}, got {num}"),
            );
        }
        self.base.refine(num, scope, errors);
    }
}
