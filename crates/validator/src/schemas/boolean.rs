//! Boolean schema

use crate::foundation::{Schema, Scope, ValidationErrors, Value};
use crate::schemas::base::BaseSchema;

/// Validates boolean values. There are no built-in constraints beyond the
/// type; use [`refine`](BoolSchema::refine) to require a particular value.
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let accepted = boolean().refine(|b| if *b { Ok(()) } else { Err("Terms must be accepted".into()) });
/// let errors = accepted.validate(&Value::from(false), &Path::root()).unwrap();
/// assert_eq!(errors.summary(), "Terms must be accepted");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoolSchema {
    base: BaseSchema<bool>,
}

/// Creates a required boolean schema.
#[must_use]
pub fn boolean() -> BoolSchema {
    BoolSchema::default()
}

impl BoolSchema {
    base_builders!(bool);
}

impl Schema for BoolSchema {
    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let Value::Bool(flag) = value else {
            self.base.type_mismatch("boolean", value, scope, errors);
            return;
        };
        self.base.refine(flag, scope, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorCode, Path};

    #[test]
    fn accepts_both_values() {
        assert!(boolean().validate(&Value::from(true), &Path::root()).is_none());
        assert!(boolean().validate(&Value::from(false), &Path::root()).is_none());
    }

    #[test]
    fn rejects_other_kinds() {
        for input in [Value::from(1), Value::from("true"), Value::from(0.0)] {
            let errors = boolean().validate(&input, &Path::root()).unwrap();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.errors()[0].code, ErrorCode::InvalidType);
            assert!(errors.errors()[0].message.starts_with("Expected boolean, got "));
        }
    }

    #[test]
    fn absent() {
        let errors = boolean().validate(&Value::Null, &Path::root()).unwrap();
        assert_eq!(errors.errors()[0].code, ErrorCode::Required);
        assert!(boolean().nilable().validate(&Value::Null, &Path::root()).is_none());
    }

    #[test]
    fn type_name() {
        assert_eq!(boolean().type_name(), "bool");
    }
}
