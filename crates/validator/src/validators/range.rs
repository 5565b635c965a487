//! Numeric range validators

use crate::foundation::{ConstraintError, Validate, ValidationError, ViolationKind};

/// Validates that a number lies within optional bounds.
///
/// Bounds are inclusive unless marked exclusive.
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::Validate;
/// use contour_validator::validators::NumberRange;
///
/// let age = NumberRange::between(0.0, 150.0).unwrap();
/// assert!(age.validate(&0.0).is_ok());
/// assert!(age.validate(&150.0).is_ok());
/// assert!(age.validate(&151.0).is_err());
///
/// let positive = NumberRange::at_least(0.0).exclusive_min();
/// assert!(positive.validate(&0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberRange {
    min: Option<f64>,
    max: Option<f64>,
    exclusive_min: bool,
    exclusive_max: bool,
}

impl NumberRange {
    /// A range with no bounds. Accepts every number.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
            exclusive_min: false,
            exclusive_max: false,
        }
    }

    /// Lower bound only.
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::unbounded()
        }
    }

    /// Upper bound only.
    #[must_use]
    pub const fn at_most(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::unbounded()
        }
    }

    /// Both bounds. Fails when `min > max` or either bound is NaN.
    pub fn between(min: f64, max: f64) -> Result<Self, ConstraintError> {
        Self::from_bounds(Some(min), Some(max))
    }

    /// Builds a range from optional bounds, checking their order.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Result<Self, ConstraintError> {
        if let (Some(lo), Some(hi)) = (min, max)
            && !(lo <= hi)
        {
            return Err(ConstraintError::InvalidBounds {
                min: lo.to_string(),
                max: hi.to_string(),
            });
        }
        if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
            return Err(ConstraintError::InvalidBounds {
                min: format!("{min:?}"),
                max: format!("{max:?}"),
            });
        }

        Ok(Self {
            min,
            max,
            ..Self::unbounded()
        })
    }

    /// Makes the lower bound exclusive.
    #[must_use = "builder methods must be chained or built"]
    pub const fn exclusive_min(mut self) -> Self {
        self.exclusive_min = true;
        self
    }

    /// Makes the upper bound exclusive.
    #[must_use = "builder methods must be chained or built"]
    pub const fn exclusive_max(mut self) -> Self {
        self.exclusive_max = true;
        self
    }

    /// Lower bound, if any.
    #[must_use]
    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    /// Upper bound, if any.
    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }
}

impl Validate for NumberRange {
    type Input = f64;

    fn validate(&self, input: &f64) -> Result<(), ValidationError> {
        let value = *input;

        if let Some(min) = self.min {
            let below = if self.exclusive_min {
                value <= min
            } else {
                value < min
            };
            if below {
                let (code, relation) = if self.exclusive_min {
                    ("exclusive_min", "greater than")
                } else {
                    ("min", "at least")
                };
                return Err(ValidationError::new(
                    ViolationKind::OutOfRange,
                    format!("Value must be {relation} {min}"),
                )
                .with_code(code)
                .with_param("min", min.to_string())
                .with_param("actual", value.to_string()));
            }
        }

        if let Some(max) = self.max {
            let above = if self.exclusive_max {
                value >= max
            } else {
                value > max
            };
            if above {
                let (code, relation) = if self.exclusive_max {
                    ("exclusive_max", "less than")
                } else {
                    ("max", "at most")
                };
                return Err(ValidationError::new(
                    ViolationKind::OutOfRange,
                    format!("Value must be {relation} {max}"),
                )
                .with_code(code)
                .with_param("max", max.to_string())
                .with_param("actual", value.to_string()));
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
