//! Traversal options

use serde::{Deserialize, Serialize};

/// Nesting depth allowed by [`ValidationOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings that apply to one whole validation call.
///
/// Deserializes from partial configuration. Missing keys take their
/// defaults:
///
/// ```
/// use stencil_validator::foundation::ValidationOptions;
///
/// let options: ValidationOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(options, ValidationOptions::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Composite nodes at this depth report `too_big` instead of descending.
    /// The top-level node sits at depth 0.
    pub max_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidationOptions {
    /// Options without a depth guard.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    /// Sets the maximum nesting depth.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
