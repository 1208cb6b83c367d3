//! String schema
//!
//! Length is measured in Unicode scalar values (chars) by default.
//! Use [`StringSchema::length_mode`] with [`LengthMode::Bytes`] to count bytes
//! when the input is known to be ASCII.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::foundation::{ErrorCode, Path, Schema, SchemaError, Scope, ValidationError, ValidationErrors, Value};
use crate::schemas::base::BaseSchema;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").unwrap()
});

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

// ============================================================================
// LENGTH MODE
// ============================================================================

/// How to count string length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthMode {
    /// Count bytes (fastest, ASCII-only correct).
    Bytes,
    /// Count Unicode scalar values (correct for all text).
    #[default]
    Chars,
}

impl LengthMode {
    /// Measures the length of a string according to this mode.
    #[inline]
    fn measure(self, input: &str) -> usize {
        match self {
            LengthMode::Bytes => input.len(),
            LengthMode::Chars => input.chars().count(),
        }
    }
}

// ============================================================================
// STRING SCHEMA
// ============================================================================

#[derive(Debug, Clone)]
struct Pattern {
    regex: Regex,
    message: Option<String>,
}

/// Validates text values.
///
/// Built-in constraints run independently of each other, in this order:
/// length, email, URL, custom pattern, membership, prefix, suffix, substring.
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// let username = string().min(3).max(20).not_one_of(["admin", "root"]);
///
/// assert!(username.validate(&Value::from("alice"), &Path::root()).is_none());
/// let errors = username.validate(&Value::from("root"), &Path::root()).unwrap();
/// assert_eq!(errors.errors()[0].code, ErrorCode::InvalidEnumValue);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    base: BaseSchema<str>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    length_mode: LengthMode,
    email: bool,
    url: bool,
    pattern: Option<Pattern>,
    one_of: Vec<String>,
    not_one_of: Vec<String>,
    starts_with: Option<String>,
    ends_with: Option<String>,
    includes: Option<String>,
}

/// Creates a required string schema.
#[must_use]
pub fn string() -> StringSchema {
    StringSchema::default()
}

impl StringSchema {
    base_builders!(str);

    /// Minimum length.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Maximum length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// How `min` and `max` count length.
    #[must_use = "builder methods must be chained or built"]
    pub fn length_mode(mut self, mode: LengthMode) -> Self {
        self.length_mode = mode;
        self
    }

    /// Requires a plausible e-mail address.
    #[must_use = "builder methods must be chained or built"]
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Requires an `http` or `https` URL.
    #[must_use = "builder methods must be chained or built"]
    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    /// Requires a match of `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if `pattern` does not compile.
    pub fn regex(self, pattern: &str) -> Result<Self, SchemaError> {
        self.set_pattern(pattern, None)
    }

    /// Like [`regex`](Self::regex), reporting `message` verbatim on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if `pattern` does not compile.
    pub fn regex_with_message(self, pattern: &str, message: impl Into<String>) -> Result<Self, SchemaError> {
        self.set_pattern(pattern, Some(message.into()))
    }

    fn set_pattern(mut self, pattern: &str, message: Option<String>) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|source| {
            warn!(pattern, error = %source, "rejected string pattern");
            SchemaError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            }
        })?;
        self.pattern = Some(Pattern { regex, message });
        Ok(self)
    }

    /// Requires the value to equal one of `options`.
    #[must_use = "builder methods must be chained or built"]
    pub fn one_of<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = options.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects the value if it equals any of `options`.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_one_of<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.not_one_of = options.into_iter().map(Into::into).collect();
        self
    }

    /// Requires `prefix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.starts_with = Some(prefix.into());
        self
    }

    /// Requires `suffix`.
    #[must_use = "builder methods must be chained or built"]
    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.ends_with = Some(suffix.into());
        self
    }

    /// Requires `substring` somewhere in the value.
    #[must_use = "builder methods must be chained or built"]
    pub fn includes(mut self, substring: impl Into<String>) -> Self {
        self.includes = Some(substring.into());
        self
    }

    fn check_constraints(&self, text: &str, path: &Path, errors: &mut ValidationErrors) {
        let base = &self.base;

        if self.min_length.is_some() || self.max_length.is_some() {
            let length = self.length_mode.measure(text);
            if let Some(min) = self.min_length
                && length < min
            {
                base.fail(
                    errors,
                    path,
                    ErrorCode::TooSmall,
                    format!("String must be at least {min} character(s) long, got {length}"),
                );
            }
            if let Some(max) = self.max_length
                && length > max
            {
                base.fail(
                    errors,
                    path,
                    ErrorCode::TooBig,
                    format!("String must be at most {max} character(s) long, got {length}"),
                );
            }
        }

        if self.email && !EMAIL_REGEX.is_match(text) {
            base.fail(errors, path, ErrorCode::InvalidString, "Invalid email format");
        }

        if self.url && !URL_REGEX.is_match(text) {
            base.fail(errors, path, ErrorCode::InvalidString, "Invalid URL format");
        }

        if let Some(pattern) = &self.pattern
            && !pattern.regex.is_match(text)
        {
            match &pattern.message {
                Some(message) => errors.push(ValidationError::new(path, ErrorCode::InvalidString, message.clone())),
                None => base.fail(errors, path, ErrorCode::InvalidString, "String does not match required pattern"),
            }
        }

        if !self.one_of.is_empty() && !self.one_of.iter().any(|option| option == text) {
            base.fail(
                errors,
                path,
                ErrorCode::InvalidEnumValue,
                format!("String must be one of: {}", self.one_of.join(", ")),
            );
        }

        if self.not_one_of.iter().any(|option| option == text) {
            base.fail(
                errors,
                path,
                ErrorCode::InvalidEnumValue,
                format!("String must not be one of: {}", self.not_one_of.join(", ")),
            );
        }

        if let Some(prefix) = &self.starts_with
            && !text.starts_with(prefix.as_str())
        {
            base.fail(errors, path, ErrorCode::InvalidString, format!("String must start with '{prefix}'"));
        }

        if let Some(suffix) = &self.ends_with
            && !text.ends_with(suffix.as_str())
        {
            base.fail(errors, path, ErrorCode::InvalidString, format!("String must end with '{suffix}'"));
        }

        if let Some(substring) = &self.includes
            && !text.contains(substring.as_str())
        {
            base.fail(errors, path, ErrorCode::InvalidString, format!("String must include '{substring}'"));
        }
    }
}

impl Schema for StringSchema {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        if self.base.check_absent(value, scope, errors) {
            return;
        }
        let Value::String(text) = value else {
            self.base.type_mismatch("string", value, scope, errors);
            return;
        };

        self.check_constraints(text, scope.path(), errors);
        self.base.refine(text, scope, errors);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn codes(schema: &StringSchema, input: impl Into<Value>) -> Vec<ErrorCode> {
        schema
            .validate(&input.into(), &Path::root())
            .map(|errors| errors.into_iter().map(|e| e.code).collect())
            .unwrap_or_default()
    }

    fn messages(schema: &StringSchema, input: impl Into<Value>) -> Vec<String> {
        schema
            .validate(&input.into(), &Path::root())
            .map(|errors| errors.into_iter().map(|e| e.message.into_owned()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn required_and_nilable() {
        assert_eq!(messages(&string(), Value::Null), vec!["Required"]);
        assert!(codes(&string().nilable(), Value::Null).is_empty());
        assert!(codes(&string().nilable().min(10), Value::Null).is_empty());
    }

    #[test]
    fn type_mismatch_stops_everything() {
        let schema = string().min(100).refine(|_| Err("never".into()));
        assert_eq!(messages(&schema, 42), vec!["Expected string, got integer"]);
        assert_eq!(messages(&schema, true), vec!["Expected string, got boolean"]);
    }

    #[test]
    fn min_length_scenario() {
        let errors = string().min(5).validate(&Value::from("hi"), &Path::root()).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].code, ErrorCode::TooSmall);
        assert!(errors.errors()[0].path.is_root());
        assert_eq!(errors.errors()[0].message, "String must be at least 5 character(s) long, got 2");
    }

    #[test]
    fn length_modes() {
        assert!(codes(&string().max(4), "żółw").is_empty());
        assert_eq!(codes(&string().max(4).length_mode(LengthMode::Bytes), "żółw"), vec![ErrorCode::TooBig]);
    }

    #[test]
    fn constraints_are_independent() {
        let schema = string().min(10).email().starts_with("x");
        assert_eq!(
            codes(&schema, "abc"),
            vec![ErrorCode::TooSmall, ErrorCode::InvalidString, ErrorCode::InvalidString]
        );
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.domain.org", true)]
    #[case("user@localhost", false)]
    #[case("not-an-email", false)]
    #[case("a@b.c", false)]
    fn email_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(codes(&string().email(), input).is_empty(), valid);
    }

    #[rstest]
    #[case("https://example.com/path?q=1", true)]
    #[case("http://localhost:8080", true)]
    #[case("ftp://example.com", false)]
    #[case("https://", false)]
    #[case("example.com", false)]
    fn url_format(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(codes(&string().url(), input).is_empty(), valid);
    }

    #[test]
    fn regex_pattern() {
        let schema = string().regex(r"^\d{3}-\d{4}$").unwrap();
        assert!(codes(&schema, "555-1234").is_empty());
        assert_eq!(messages(&schema, "5551234"), vec!["String does not match required pattern"]);
    }

    #[test]
    fn regex_message_bypasses_overrides() {
        let schema = string()
            .regex_with_message(r"^[a-z]+$", "Lowercase only")
            .unwrap()
            .custom_error("invalid_string", "Overridden");
        assert_eq!(messages(&schema, "ABC"), vec!["Lowercase only"]);
    }

    #[test]
    fn invalid_regex_fails_at_build_time() {
        let error = string().regex("([a-z").unwrap_err();
        assert!(matches!(error, SchemaError::InvalidPattern { ref pattern, .. } if pattern == "([a-z"));
    }

    #[test]
    fn membership() {
        let schema = string().one_of(["red", "green"]);
        assert!(codes(&schema, "red").is_empty());
        assert_eq!(messages(&schema, "blue"), vec!["String must be one of: red, green"]);

        let schema = string().not_one_of(["admin"]);
        assert_eq!(messages(&schema, "admin"), vec!["String must not be one of: admin"]);
        assert!(codes(&schema, "alice").is_empty());
    }

    #[test]
    fn affixes() {
        let schema = string().starts_with("ab").ends_with("yz").includes("mm");
        assert!(codes(&schema, "abmmyz").is_empty());
        assert_eq!(
            messages(&schema, "hello"),
            vec![
                "String must start with 'ab'",
                "String must end with 'yz'",
                "String must include 'mm'",
            ]
        );
    }

    #[test]
    fn refinements_run_after_constraints() {
        let schema = string()
            .min(10)
            .refine(|s| if s.contains(' ') { Err(String::new()) } else { Ok(()) })
            .refine(|s| if s.starts_with('_') { Err("No leading underscore".into()) } else { Ok(()) });
        assert_eq!(
            messages(&schema, "_a b"),
            vec![
                "String must be at least 10 character(s) long, got 4",
                "Custom validation failed",
                "No leading underscore",
            ]
        );
    }

    #[test]
    fn custom_error_overrides_default() {
        let schema = string().min(3).custom_error(ErrorCode::TooSmall, "Too short!");
        assert_eq!(messages(&schema, "a"), vec!["Too short!"]);
        assert_eq!(messages(&schema, Value::Null), vec!["Required"]);
    }

    #[test]
    fn formatter_takes_precedence() {
        let schema = string()
            .min(3)
            .custom_error("too_small", "ignored")
            .error_formatter(|path, code, default| format!("{path}:{code}:{default}"));
        let errors = schema.validate(&Value::from("a"), &crate::path!["name"]).unwrap();
        assert_eq!(
            errors.errors()[0].message,
            "name:too_small:String must be at least 3 character(s) long, got 1"
        );
    }

    #[test]
    fn type_name() {
        assert_eq!(string().type_name(), "string");
    }
}
