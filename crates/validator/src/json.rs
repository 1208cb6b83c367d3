//! Bridging between [`Value`] and `serde_json`.
//!
//! JSON input is the common case, so decoded `serde_json::Value` trees
//! convert straight into schema input, keeping document key order. Integers that fit `i64` become
//! [`Value::Int`], larger unsigned integers become [`Value::UInt`], and
//! every other number becomes [`Value::Float`].
//!
//! [`Value`] also implements `Serialize` and `Deserialize`, so any serde
//! format can feed a schema directly.
//!
//! # Examples
//!
//! ```
//! use stencil_validator::prelude::*;
//! use serde_json::json;
//!
//! let schema = object()
//!     .field("id", int().positive())
//!     .field("ratio", float().max(1.0));
//!
//! let input = Value::from(json!({"id": 7, "ratio": 1.5}));
//! let errors = schema.validate(&input, &Path::root()).unwrap();
//!
//! assert_eq!(errors.to_json()["count"], json!(1));
//! ```

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::{FieldNaming, Path, Reflect, Schema, TagOrLowerFirst, ValidationErrors, Value, validate};

// ============================================================================
// SERDE_JSON CONVERSIONS
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => from_number(&number),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Self::from(json.clone())
    }
}

fn from_number(number: &serde_json::Number) -> Value {
    if let Some(int) = number.as_i64() {
        Value::Int(int)
    } else if let Some(uint) = number.as_u64() {
        Value::UInt(uint)
    } else {
        Value::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Int(int) => Self::from(*int),
            Value::UInt(uint) => Self::from(*uint),
            Value::Float(float) => serde_json::Number::from_f64(*float).map_or(Self::Null, Self::Number),
            Value::String(text) => Self::String(text.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Map(map) => Self::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from(value)))
                    .collect(),
            ),
            Value::Record(record) => Self::Object(
                visible_members(record.as_ref())
                    .map(|(name, value)| (name, Self::from(&value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

/// Members as serialized output sees them: hidden members and
/// empty omit-empty members are dropped.
fn visible_members(record: &dyn Reflect) -> impl Iterator<Item = (String, Value)> {
    record.members().into_iter().filter_map(|member| {
        let tag = member.parsed_tag();
        if tag.hidden || (tag.omit_empty && member.value.is_empty_value()) {
            return None;
        }
        Some((TagOrLowerFirst.external_name(member.name, &tag), member.value))
    })
}

// ============================================================================
// SERDE
// ============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Int(int) => serializer.serialize_i64(*int),
            Self::UInt(uint) => serializer.serialize_u64(*uint),
            Self::Float(float) => serializer.serialize_f64(*float),
            Self::String(text) => serializer.serialize_str(text),
            Self::Array(items) => items.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
            Self::Record(record) => {
                let members: Vec<(String, Value)> = visible_members(record.as_ref()).collect();
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (name, value) in &members {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// CONVENIENCE
// ============================================================================

/// Parses `text` as JSON into schema input.
///
/// # Errors
///
/// Returns the parser error if `text` is not valid JSON.
pub fn parse(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Validates decoded JSON at the root path.
pub fn validate_json<S: Schema + ?Sized>(schema: &S, json: &serde_json::Value) -> Option<ValidationErrors> {
    validate(schema, &Value::from(json), Path::root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Member;
    use crate::foundation::ErrorCode;
    use crate::schemas::{array, float, int, object, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn numbers_split_by_representation() {
        assert_eq!(Value::from(json!(5)), Value::Int(5));
        assert_eq!(Value::from(json!(-5)), Value::Int(-5));
        assert_eq!(Value::from(json!(5.0)), Value::Float(5.0));
        assert_eq!(Value::from(json!(u64::MAX)), Value::UInt(u64::MAX));
    }

    #[test]
    fn integers_past_i64_stay_integers() {
        let big = Value::from(json!(18_446_744_073_709_551_615u64));
        assert_eq!(big.kind(), "integer");

        let errors = float().validate(&big, &Path::root()).unwrap();
        assert_eq!(errors.errors()[0].code, ErrorCode::InvalidType);
        assert_eq!(errors.errors()[0].message, "Expected float, got integer");

        let errors = int().validate(&big, &Path::root()).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].code, ErrorCode::TooBig);
        assert_eq!(
            errors.errors()[0].message,
            "Number must be less than or equal to 9223372036854775807, got 18446744073709551615"
        );

        assert_eq!(serde_json::Value::from(&big), json!(u64::MAX));
        assert_eq!(serde_json::to_string(&big).unwrap(), "18446744073709551615");
    }

    #[test]
    fn nested_documents_convert() {
        let value = Value::from(json!({"tags": ["a", null], "ok": true}));
        let map = value.as_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["tags", "ok"]);
        assert_eq!(
            map["tags"],
            Value::Array(vec![Value::from("a"), Value::Null])
        );
        assert_eq!(map["ok"], Value::Bool(true));
    }

    #[test]
    fn back_to_json() {
        let json = json!({"name": "x", "scores": [1, 2.5], "missing": null});
        assert_eq!(serde_json::Value::from(Value::from(json.clone())), json);
        assert_eq!(serde_json::Value::from(Value::Float(f64::NAN)), serde_json::Value::Null);
    }

    #[derive(Debug)]
    struct Login {
        user: String,
        token: String,
        note: String,
    }

    impl Reflect for Login {
        fn members(&self) -> Vec<Member> {
            vec![
                Member::new("User", self.user.as_str()),
                Member::new("Token", self.token.as_str()).with_tag("-"),
                Member::new("Note", self.note.as_str()).with_tag("note,omitempty"),
            ]
        }
    }

    #[test]
    fn records_serialize_visible_members() {
        let login = Value::record(Login {
            user: "ann".into(),
            token: "secret".into(),
            note: String::new(),
        });
        assert_eq!(serde_json::to_value(&login).unwrap(), json!({"user": "ann"}));
        assert_eq!(serde_json::Value::from(&login), json!({"user": "ann"}));
    }

    #[test]
    fn deserializes_from_text() {
        let value = parse(r#"{"items": [1, "two"]}"#).unwrap();
        let errors = object()
            .field("items", array(int()))
            .validate(&value, &Path::root())
            .unwrap();
        assert_eq!(errors.errors()[0].path.to_string(), "items[1]");

        assert!(parse("{").is_err());
    }

    #[test]
    fn validate_json_uses_root_path() {
        let errors = validate_json(&string(), &json!(3)).unwrap();
        assert!(errors.errors()[0].path.is_root());
        assert!(validate_json(&string(), &json!("ok")).is_none());
    }
}
