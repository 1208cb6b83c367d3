//! Built-in schemas
//!
//! One schema type per kind of input, each created by a factory function
//! and configured through chained builder methods.
//!
//! # Kinds
//!
//! - **Scalars**: [`string`], [`int`], [`float`], [`boolean`]
//! - **Composites**: [`array`], [`object`], [`record`]
//! - **Deferred**: [`lazy`], for recursive shapes
//!
//! Every kind shares the modifiers in [`BaseSchema`]: `nilable`,
//! `custom_error`, `error_formatter`, `refine` and `super_refine`.
//!
//! # Examples
//!
//! ```
//! use stencil_validator::prelude::*;
//!
//! let user = object()
//!     .field("name", string().min(2).max(50))
//!     .field("age", int().min(0).max(150))
//!     .field("tags", array(string()).max(10).nilable());
//!
//! let input: Value = serde_json::json!({"name": "J", "age": 200}).into();
//! let errors = user.validate(&input, &Path::root()).unwrap();
//! assert_eq!(errors.len(), 2);
//! ```

mod base;
#[macro_use]
mod number;

// Scalars
mod boolean;
mod float;
mod int;
mod string;

// Composites
mod array;
mod lazy;
mod object;
mod structure;

pub use array::{ArraySchema, array};
pub use base::{BaseSchema, IssueSink, MessageFormatter, Refinement, SuperRefinement};
pub use boolean::{BoolSchema, boolean};
pub use float::{FloatSchema, MULTIPLE_OF_EPSILON, float};
pub use int::{IntSchema, int};
pub use lazy::{LazySchema, lazy};
pub use object::{ObjectSchema, Shape, object};
pub use string::{LengthMode, StringSchema, string};
pub use structure::{StructSchema, record};
