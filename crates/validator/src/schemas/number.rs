//! Range and sign constraints shared by the integer and float schemas

use std::fmt;

use crate::foundation::{ErrorCode, Path, ValidationErrors};
use crate::schemas::base::BaseSchema;

pub(crate) trait Number: Copy + PartialOrd + fmt::Display + fmt::Debug {
    const ZERO: Self;
}

impl Number for i64 {
    const ZERO: Self = 0;
}

impl Number for f64 {
    const ZERO: Self = 0.0;
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Bounds<N> {
    pub(crate) min: Option<N>,
    pub(crate) max: Option<N>,
    pub(crate) positive: bool,
    pub(crate) negative: bool,
    pub(crate) non_negative: bool,
    pub(crate) non_positive: bool,
}

impl<N: Number> Bounds<N> {
    /// Checks min, max and the four sign constraints, each independently.
    pub(crate) fn check<T: ?Sized>(
        &self,
        num: N,
        base: &BaseSchema<T>,
        path: &Path,
        errors: &mut ValidationErrors,
    ) {
        if let Some(min) = self.min
            && num < min
        {
            base.fail(
                errors,
                path,
                ErrorCode::TooSmall,
                format!("Number must be greater than or equal to {min}, got {num}"),
            );
        }
        if let Some(max) = self.max
            && num > max
        {
            base.fail(
                errors,
                path,
                ErrorCode::TooBig,
                format!("Number must be less than or equal to {max}, got {num}"),
            );
        }
        if self.positive && num <= N::ZERO {
            base.fail(errors, path, ErrorCode::TooSmall, format!("Number must be positive (> 0), got {num}"));
        }
        if self.negative && num >= N::ZERO {
            base.fail(errors, path, ErrorCode::TooBig, format!("Number must be negative (< 0), got {num}"));
        }
        if self.non_negative && num < N::ZERO {
            base.fail(
                errors,
                path,
                ErrorCode::TooSmall,
                format!("Number must be non-negative (>= 0), got {num}"),
            );
        }
        if self.non_positive && num > N::ZERO {
            base.fail(
                errors,
                path,
                ErrorCode::TooBig,
                format!("Number must be non-positive (<= 0), got {num}"),
            );
        }
    }
}

/// Builder methods for a schema holding `bounds: Bounds<$num>`.
macro_rules! bound_builders {
    ($num:ty) => {
        /// Inclusive lower bound.
        #[must_use = "builder methods must be chained or built"]
        pub fn min(mut self, value: $num) -> Self {
            self.bounds.min = Some(value);
            self
        }

        /// Inclusive upper bound.
        #[must_use = "builder methods must be chained or built"]
        pub fn max(mut self, value: $num) -> Self {
            self.bounds.max = Some(value);
            self
        }

        /// Requires `> 0`.
        #[must_use = "builder methods must be chained or built"]
        pub fn positive(mut self) -> Self {
            self.bounds.positive = true;
            self
        }

        /// Requires `< 0`.
        #[must_use = "builder methods must be chained or built"]
        pub fn negative(mut self) -> Self {
            self.bounds.negative = true;
            self
        }

        /// Requires `>= 0`.
        #[must_use = "builder methods must be chained or built"]
        pub fn non_negative(mut self) -> Self {
            self.bounds.non_negative = true;
            self
        }

        /// Requires `<= 0`.
        #[must_use = "builder methods must be chained or built"]
        pub fn non_positive(mut self) -> Self {
            self.bounds.non_positive = true;
            self
        }
    };
}
