//! Structurally-typed record reflection
//!
//! Native Rust structs enter validation as [`Value::Record`]. A record
//! exposes its members through [`Reflect`]. The struct schema resolves each
//! member's external name through a [`FieldNaming`] policy and then treats
//! the record like a map.
//!
//! Implementing [`Reflect`] by hand is short, and the
//! [`record!`](crate::record) macro writes it for plain structs:
//!
//! ```
//! use stencil_validator::foundation::{Reflect, Value};
//! use stencil_validator::record;
//!
//! #[derive(Debug, Clone)]
//! struct User {
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! record!(User {
//!     name,
//!     email => "email,omitempty",
//! });
//!
//! let user = User { name: "Ann".into(), email: None };
//! let members = user.members();
//! assert_eq!(members[0].name, "name");
//! assert_eq!(members[1].value, Value::Null);
//! ```

use std::any::Any;
use std::fmt;

use crate::foundation::value::Value;

// ============================================================================
// REFLECT
// ============================================================================

/// A native value whose members can be listed by name.
pub trait Reflect: Any + fmt::Debug + Send + Sync {
    /// Name reported in `invalid_type` messages. Defaults to the unqualified
    /// Rust type name.
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Members in declaration order.
    fn members(&self) -> Vec<Member>;
}

impl dyn Reflect {
    /// Returns `true` if the record is a `T`.
    #[must_use]
    pub fn is<T: Reflect>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Recovers the concrete record type, for refinements that need it.
    #[must_use]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// ============================================================================
// MEMBER
// ============================================================================

/// One member of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// The member's own name.
    pub name: &'static str,
    /// External-name tag, `"name,omitempty"` style.
    pub tag: Option<&'static str>,
    /// The member's current value.
    pub value: Value,
}

impl Member {
    /// Creates an untagged member.
    pub fn new(name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            tag: None,
            value: value.into(),
        }
    }

    /// Attaches an external-name tag.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Parsed form of [`tag`](Self::tag).
    #[must_use]
    pub fn parsed_tag(&self) -> MemberTag<'static> {
        self.tag.map(MemberTag::parse).unwrap_or_default()
    }
}

/// Parsed member tag.
///
/// `"email,omitempty"` renames the member to `email` and treats its zero
/// value as absent. `",omitempty"` keeps the default name. `"-"` hides the
/// member from validation entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberTag<'a> {
    /// Explicit external name, if the tag gives a non-empty one.
    pub name: Option<&'a str>,
    /// Zero/empty value is presented to the field schema as absent.
    pub omit_empty: bool,
    /// Member is invisible to validation.
    pub hidden: bool,
}

impl<'a> MemberTag<'a> {
    /// Parses the `name[,option]*` convention.
    #[must_use]
    pub fn parse(tag: &'a str) -> Self {
        if tag == "-" {
            return Self {
                hidden: true,
                ..Self::default()
            };
        }
        let mut parts = tag.split(',');
        let name = parts.next().filter(|name| !name.is_empty());
        let omit_empty = parts.any(|option| option.trim() == "omitempty");
        Self {
            name,
            omit_empty,
            hidden: false,
        }
    }
}

// ============================================================================
// NAMING POLICY
// ============================================================================

/// Resolves a member's external name from its own name and tag.
pub trait FieldNaming: Send + Sync {
    /// External name used for shape lookup, strict checks and paths.
    fn external_name(&self, member: &str, tag: &MemberTag<'_>) -> String;
}

impl<F> FieldNaming for F
where
    F: Fn(&str, &MemberTag<'_>) -> String + Send + Sync,
{
    fn external_name(&self, member: &str, tag: &MemberTag<'_>) -> String {
        self(member, tag)
    }
}

/// Default policy: the tag's name if present, else the member name with its
/// first character lower-cased (`Email` becomes `email`).
#[derive(Debug, Clone, Copy, Default)]
pub struct TagOrLowerFirst;

impl FieldNaming for TagOrLowerFirst {
    fn external_name(&self, member: &str, tag: &MemberTag<'_>) -> String {
        if let Some(name) = tag.name {
            return name.to_owned();
        }
        let mut chars = member.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
