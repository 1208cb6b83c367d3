//! Macros for building paths, shapes and records with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`path!`]: Build a [`Path`](crate::foundation::Path) from names and indices
//! - [`shape!`]: Build a [`Shape`](crate::schemas::Shape) from `key => schema` pairs
//! - [`record!`]: Implement [`Reflect`](crate::foundation::Reflect) for a plain struct
//!
//! # Examples
//!
//! ```
//! use stencil_validator::prelude::*;
//!
//! let schema = object().shape(shape! {
//!     "name" => string().min(2),
//!     "tags" => array(string()),
//! });
//!
//! let errors = schema.validate(&Value::Map(ValueMap::new()), &Path::root()).unwrap();
//! assert_eq!(errors.by_path(&path!["tags"]).len(), 1);
//! ```

// ============================================================================
// PATH MACRO
// ============================================================================

/// Builds a path from string and `usize` segments.
///
/// ```
/// use stencil_validator::path;
/// use stencil_validator::foundation::Path;
///
/// assert_eq!(path![], Path::root());
/// assert_eq!(path!["items", 2usize, "sku"].to_string(), "items[2].sku");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::foundation::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::foundation::Path::from_segments([
            $($crate::foundation::PathSegment::from($segment)),+
        ])
    };
}

// ============================================================================
// SHAPE MACRO
// ============================================================================

/// Builds a [`Shape`](crate::schemas::Shape), keeping declaration order.
#[macro_export]
macro_rules! shape {
    ($($key:expr => $schema:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut shape = $crate::schemas::Shape::new();
        $(
            shape.insert(
                ::std::string::String::from($key),
                ::std::sync::Arc::new($schema) as ::std::sync::Arc<dyn $crate::foundation::Schema>,
            );
        )*
        shape
    }};
}

// ============================================================================
// RECORD MACRO
// ============================================================================

/// Implements [`Reflect`](crate::foundation::Reflect),
/// [`ToValue`](crate::foundation::ToValue) and `From<T> for Value` for a
/// struct from a list of its members.
///
/// A member may carry a tag after `=>` (`"email,omitempty"`, `"-"`). The
/// struct must implement `Clone` and `Debug`, and every listed member must
/// implement `ToValue`.
///
/// ```
/// use stencil_validator::prelude::*;
///
/// #[derive(Debug, Clone)]
/// struct Address {
///     street: String,
///     city: String,
/// }
///
/// #[derive(Debug, Clone)]
/// struct User {
///     name: String,
///     address: Address,
///     internal_id: u64,
/// }
///
/// record!(Address { street, city });
/// record!(User {
///     name,
///     address,
///     internal_id => "-",
/// });
///
/// let schema = record()
///     .field("name", string())
///     .field("address", record().field("city", string().min(2)));
///
/// let user = User {
///     name: "Ann".into(),
///     address: Address { street: "Main".into(), city: "X".into() },
///     internal_id: 7,
/// };
/// let errors = schema.validate(&Value::from(user), &Path::root()).unwrap();
/// assert_eq!(errors.errors()[0].path, path!["address", "city"]);
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $($member:ident $(=> $tag:literal)?),* $(,)? }) => {
        impl $crate::foundation::Reflect for $ty {
            fn type_name(&self) -> &'static str {
                ::core::stringify!($ty)
            }

            fn members(&self) -> ::std::vec::Vec<$crate::foundation::Member> {
                ::std::vec![
                    $(
                        $crate::foundation::Member::new(
                            ::core::stringify!($member),
                            $crate::foundation::ToValue::to_value(&self.$member),
                        )
                        $(.with_tag($tag))?
                    ),*
                ]
            }
        }

        impl $crate::foundation::ToValue for $ty {
            fn to_value(&self) -> $crate::foundation::Value {
                $crate::foundation::Value::record(::core::clone::Clone::clone(self))
            }
        }

        impl ::core::convert::From<$ty> for $crate::foundation::Value {
            fn from(record: $ty) -> Self {
                $crate::foundation::Value::record(record)
            }
        }
    };
}

// ============================================================================
// SCHEMA BUILDERS
// ============================================================================

/// Builder methods shared by every schema holding a `base: BaseSchema<$input>`.
macro_rules! base_builders {
    ($input:ty) => {
        /// Lets the absence value pass. No other check runs on it.
        #[must_use = "builder methods must be chained or built"]
        pub fn nilable(mut self) -> Self {
            self.base.nilable = true;
            self
        }

        /// Returns `true` if the absence value passes.
        #[must_use]
        pub fn is_nilable(&self) -> bool {
            self.base.nilable
        }

        /// Overrides the message of every failure with `code` raised by this
        /// node. A formatter set with
        /// [`error_formatter`](Self::error_formatter) takes precedence.
        #[must_use = "builder methods must be chained or built"]
        pub fn custom_error(
            mut self,
            code: impl Into<$crate::foundation::ErrorCode>,
            message: impl Into<String>,
        ) -> Self {
            self.base.custom_errors.insert(code.into(), message.into());
            self
        }

        /// Computes every message raised by this node from its path, code
        /// and default message.
        #[must_use = "builder methods must be chained or built"]
        pub fn error_formatter<F>(mut self, formatter: F) -> Self
        where
            F: Fn(&$crate::foundation::Path, &$crate::foundation::ErrorCode, &str) -> String
                + Send
                + Sync
                + 'static,
        {
            self.base.formatter = Some(::std::sync::Arc::new(formatter));
            self
        }

        /// Adds a predicate over the typed value, run after the built-in
        /// constraints. `Err("")` reports the default message.
        #[must_use = "builder methods must be chained or built"]
        pub fn refine<F>(mut self, refinement: F) -> Self
        where
            F: Fn(&$input) -> Result<(), String> + Send + Sync + 'static,
        {
            self.base.refinements.push(::std::sync::Arc::new(refinement));
            self
        }

        /// Adds a refinement that reports through an
        /// [`IssueSink`](crate::schemas::IssueSink), at any path below this
        /// node and with any code.
        #[must_use = "builder methods must be chained or built"]
        pub fn super_refine<F>(mut self, refinement: F) -> Self
        where
            F: Fn(&$input, &mut $crate::schemas::IssueSink<'_>) + Send + Sync + 'static,
        {
            self.base
                .super_refinements
                .push(::std::sync::Arc::new(refinement));
            self
        }
    };
}
