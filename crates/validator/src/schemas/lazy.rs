//! LAZY schema - deferred construction for recursive shapes

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::foundation::{Schema, Scope, ValidationErrors, Value};

type Init = Arc<dyn Fn() -> Arc<dyn Schema> + Send + Sync>;

/// Defers building the target schema until it is first used.
///
/// A schema cannot contain itself by value, so recursive shapes such as
/// trees refer back to their own constructor through `lazy`. Each level is
/// built only when the input actually reaches it, and the depth guard of
/// [`ValidationOptions`](crate::foundation::ValidationOptions) bounds how
/// far that goes.
///
/// A constructor that returns a fresh schema gives every level its own
/// target, and each target stays cached for the life of the root schema.
/// Retained schemas therefore grow with the deepest input seen. Under
/// [`ValidationOptions::unbounded`](crate::foundation::ValidationOptions::unbounded)
/// there is no limit, so long-lived recursive schemas should point `lazy`
/// at one shared instance instead (see the second example).
///
/// # Examples
///
/// ```
/// use stencil_validator::prelude::*;
///
/// fn category() -> ObjectSchema {
///     object()
///         .field("name", string().min(1))
///         .field("children", array(lazy(category)).nilable())
/// }
///
/// let input: Value = serde_json::json!({
///     "name": "root",
///     "children": [{"name": "leaf", "children": [{"name": ""}]}],
/// })
/// .into();
///
/// let errors = category().validate(&input, &Path::root()).unwrap();
/// assert_eq!(errors.errors()[0].path.to_string(), "children[0].children[0].name");
/// ```
///
/// One shared target for every level:
///
/// ```
/// use std::sync::{Arc, LazyLock};
/// use stencil_validator::prelude::*;
///
/// static CATEGORY: LazyLock<Arc<ObjectSchema>> = LazyLock::new(|| {
///     Arc::new(
///         object()
///             .field("name", string().min(1))
///             .field("children", array(lazy(|| CATEGORY.clone())).nilable()),
///     )
/// });
///
/// let input: Value = serde_json::json!({
///     "name": "root",
///     "children": [{"name": "leaf", "children": [{"name": ""}]}],
/// })
/// .into();
///
/// let errors = CATEGORY.validate(&input, &Path::root()).unwrap();
/// assert_eq!(errors.errors()[0].path.to_string(), "children[0].children[0].name");
/// ```
#[derive(Clone)]
pub struct LazySchema {
    init: Init,
    target: Arc<OnceLock<Arc<dyn Schema>>>,
}

/// Creates a LAZY schema from a constructor.
pub fn lazy<S, F>(init: F) -> LazySchema
where
    S: Schema + 'static,
    F: Fn() -> S + Send + Sync + 'static,
{
    LazySchema {
        init: Arc::new(move || Arc::new(init()) as Arc<dyn Schema>),
        target: Arc::new(OnceLock::new()),
    }
}

impl LazySchema {
    /// Returns true if the target has been built.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.target.get().is_some()
    }

    /// Builds the target if needed and returns it.
    pub fn force(&self) -> &dyn Schema {
        self.target.get_or_init(|| (self.init)()).as_ref()
    }
}

impl Schema for LazySchema {
    fn type_name(&self) -> &'static str {
        self.force().type_name()
    }

    fn validate_in(&self, value: &Value, scope: &Scope<'_>, errors: &mut ValidationErrors) {
        self.force().validate_in(value, scope, errors);
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("target", &self.target.get())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
