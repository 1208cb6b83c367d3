//! Error types for validation failures
//!
//! A failed validation yields one [`ValidationErrors`] collection holding
//! every [`ValidationError`] found during the traversal, in discovery order.
//! Each failure carries its [`Path`], a stable [`ErrorCode`], a message and
//! optional metadata. The collection offers the grouping, flattening and
//! rendering views API layers need.
//!
//! [`SchemaError`] is separate. It covers programmer errors found while a
//! schema is being *built* and never shows up during validation.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;

use crate::foundation::path::Path;

/// Open key/value bag attached to a failure.
pub type ErrorMeta = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// ERROR CODE
// ============================================================================

/// Stable, machine-readable identifier of a failure kind.
///
/// The built-in variants form a closed taxonomy. Super-refinements may
/// introduce their own codes through [`ErrorCode::Custom`]. Converting a
/// string that spells a built-in code (`"too_small"`) yields the built-in
/// variant, never `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A value is absent and the schema is not nilable.
    Required,
    /// The value has a different kind than the schema expects.
    InvalidType,
    /// Below a minimum (length, size or magnitude).
    TooSmall,
    /// Above a maximum (length, size, magnitude or nesting depth).
    TooBig,
    /// A string format or content check failed.
    InvalidString,
    /// A value is not in (or is in) a literal set.
    InvalidEnumValue,
    /// A strict mapping saw an undeclared key.
    UnrecognizedKeys,
    /// A simple refinement rejected the value.
    CustomValidation,
    /// Caller-defined code.
    Custom(String),
}

impl ErrorCode {
    /// The snake_case wire form of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::InvalidString => "invalid_string",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::CustomValidation => "custom_validation",
            Self::Custom(code) => code,
        }
    }

    /// Returns `true` for caller-defined codes.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    fn builtin(code: &str) -> Option<Self> {
        Some(match code {
            "required" => Self::Required,
            "invalid_type" => Self::InvalidType,
            "too_small" => Self::TooSmall,
            "too_big" => Self::TooBig,
            "invalid_string" => Self::InvalidString,
            "invalid_enum_value" => Self::InvalidEnumValue,
            "unrecognized_keys" => Self::UnrecognizedKeys,
            "custom_validation" => Self::CustomValidation,
            _ => return None,
        })
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        Self::builtin(code).unwrap_or_else(|| Self::Custom(code.to_owned()))
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        Self::builtin(&code).unwrap_or(Self::Custom(code))
    }
}

impl From<&ErrorCode> for ErrorCode {
    fn from(code: &ErrorCode) -> Self {
        code.clone()
    }
}

impl FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl PartialEq<str> for ErrorCode {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ErrorCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single validation failure.
///
/// # Examples
///
/// ```
/// use stencil_validator::foundation::{ErrorCode, ValidationError};
/// use stencil_validator::path;
///
/// let error = ValidationError::new(path!["age"], "too_small", "Too young")
///     .with_meta("min", 18);
///
/// assert_eq!(error.code, ErrorCode::TooSmall);
/// assert_eq!(error.to_string(), "[age] too_small: Too young");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Where the failure was found. The root path means form level.
    pub path: Path,

    /// Failure kind.
    pub code: ErrorCode,

    /// Human-readable message, already resolved through overrides.
    pub message: Cow<'static, str>,

    /// Optional metadata (limits, offending key, ...).
    #[serde(skip_serializing_if = "meta_is_empty")]
    pub meta: Option<ErrorMeta>,
}

fn meta_is_empty(meta: &Option<ErrorMeta>) -> bool {
    meta.as_ref().is_none_or(serde_json::Map::is_empty)
}

impl ValidationError {
    /// Creates a failure at `path`.
    pub fn new(
        path: impl Into<Path>,
        code: impl Into<ErrorCode>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            message: message.into(),
            meta: None,
        }
    }

    /// Adds one metadata entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta
            .get_or_insert_with(ErrorMeta::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replaces the metadata bag. An empty bag is stored as `None`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_meta_map(mut self, meta: ErrorMeta) -> Self {
        self.meta = (!meta.is_empty()).then_some(meta);
        self
    }

    /// Looks up a metadata value by key.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&serde_json::Value> {
        self.meta.as_ref()?.get(key)
    }

    /// Structured form: `{path, code, message, meta?}`. `meta` is present only
    /// when non-empty.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut value = json!({
            "path": self.path,
            "code": self.code,
            "message": self.message,
        });
        if let (Some(meta), Some(object)) = (&self.meta, value.as_object_mut())
            && !meta.is_empty()
        {
            object.insert("meta".to_owned(), serde_json::Value::Object(meta.clone()));
        }
        value
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.path, self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Every failure found by one top-level validation, in discovery order.
///
/// Validation entry points never hand out an empty collection: no failures
/// is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a failure without metadata.
    pub fn add(
        &mut self,
        path: impl Into<Path>,
        code: impl Into<ErrorCode>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.errors.push(ValidationError::new(path, code, message));
    }

    /// Appends an already-built failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over the errors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Consumes the collection, returning the underlying list.
    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// `Ok(ok_value)` when empty, else `Err(self)`.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }

    /// `None` when empty, else `Some(self)`.
    #[must_use]
    pub fn into_option(self) -> Option<ValidationErrors> {
        (!self.is_empty()).then_some(self)
    }

    /// Failures recorded at exactly `path`.
    #[must_use]
    pub fn by_path(&self, path: &Path) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| &e.path == path).collect()
    }

    /// Failures carrying `code`.
    #[must_use]
    pub fn by_code(&self, code: impl Into<ErrorCode>) -> Vec<&ValidationError> {
        let code = code.into();
        self.errors.iter().filter(|e| e.code == code).collect()
    }

    /// Partitions by exact path. Groups appear in order of first occurrence
    /// and keep discovery order inside.
    #[must_use]
    pub fn group_by_path(&self) -> IndexMap<Path, Vec<&ValidationError>> {
        let mut groups: IndexMap<Path, Vec<&ValidationError>> = IndexMap::new();
        for error in &self.errors {
            groups.entry(error.path.clone()).or_default().push(error);
        }
        groups
    }

    /// Partitions by code, same ordering rules as [`group_by_path`](Self::group_by_path).
    #[must_use]
    pub fn group_by_code(&self) -> IndexMap<ErrorCode, Vec<&ValidationError>> {
        let mut groups: IndexMap<ErrorCode, Vec<&ValidationError>> = IndexMap::new();
        for error in &self.errors {
            groups.entry(error.code.clone()).or_default().push(error);
        }
        groups
    }

    /// Splits into form-level and field-level messages.
    ///
    /// Field-level messages are keyed by the rendered path up to the first
    /// index segment, so `tags[0]` and `tags[1]` both land under `tags`.
    /// A path made only of indices lands under `""`.
    #[must_use]
    pub fn flatten(&self) -> FlattenedErrors {
        let mut flattened = FlattenedErrors::default();
        for error in &self.errors {
            let message = error.message.to_string();
            if error.path.is_root() {
                flattened.form_errors.push(message);
            } else {
                flattened
                    .field_errors
                    .entry(error.path.field_key())
                    .or_default()
                    .push(message);
            }
        }
        flattened
    }

    /// Multi-line human-readable report, identical to the `Display` form.
    #[must_use]
    pub fn report(&self) -> String {
        self.to_string()
    }

    /// The single message, or every message joined with `"; "`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_ref())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Structured form for API responses: `{errors: [...], count}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "errors": self.errors.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
            "count": self.errors.len(),
        })
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. [{}] {}", i + 1, error.path, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// FLATTENED VIEW
// ============================================================================

/// Form/field split of a failure collection, shaped for form UIs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedErrors {
    /// Messages of failures at the root path.
    #[serde(rename = "formErrors")]
    pub form_errors: Vec<String>,

    /// Messages of every other failure, keyed by field.
    #[serde(rename = "fieldErrors")]
    pub field_errors: IndexMap<String, Vec<String>>,
}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Programmer error detected while building a schema.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A custom regular expression did not compile.
    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// TESTS
// ============================================================================
