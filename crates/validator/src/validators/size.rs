//! Sequence size validators

use serde_json::Value;

use crate::foundation::{ConstraintError, Validate, ValidationError, ViolationKind};

/// Validates the number of items in a sequence (inclusive bounds).
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::Validate;
/// use contour_validator::validators::SizeRange;
/// use serde_json::json;
///
/// let v = SizeRange::new(Some(1), Some(3)).unwrap();
/// assert!(v.validate_any(&json!([1, 2])).is_ok());
/// assert!(v.validate_any(&json!([])).is_err());
/// assert!(v.validate_any(&json!([1, 2, 3, 4])).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SizeRange {
    min: Option<usize>,
    max: Option<usize>,
}

impl SizeRange {
    /// Creates a size range. Fails when `min > max`.
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, ConstraintError> {
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(ConstraintError::InvalidBounds {
                min: lo.to_string(),
                max: hi.to_string(),
            });
        }
        Ok(Self { min, max })
    }

    /// Minimum item count, if any.
    #[must_use]
    pub const fn min(&self) -> Option<usize> {
        self.min
    }

    /// Maximum item count, if any.
    #[must_use]
    pub const fn max(&self) -> Option<usize> {
        self.max
    }
}

impl Validate for SizeRange {
    type Input = [Value];

    fn validate(&self, input: &[Value]) -> Result<(), ValidationError> {
        let len = input.len();

        if let Some(min) = self.min
            && len < min
        {
            return Err(ValidationError::new(
                ViolationKind::OutOfRange,
                format!("Sequence must have at least {min} items"),
            )
            .with_code("min_items")
            .with_param("min", min.to_string())
            .with_param("actual", len.to_string()));
        }

        if let Some(max) = self.max
            && len > max
        {
            return Err(ValidationError::new(
                ViolationKind::OutOfRange,
                format!("Sequence must have at most {max} items"),
            )
            .with_code("max_items")
            .with_param("max", max.to_string())
            .with_param("actual", len.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn min_items() {
        let v = SizeRange::new(Some(2), None).unwrap();
        let err = v.validate(&[json!(1)]).unwrap_err();
        assert_eq!(err.code, "min_items");
        assert_eq!(err.param("actual"), Some("1"));
    }

    #[test]
    fn max_items() {
        let v = SizeRange::new(None, Some(1)).unwrap();
        assert!(v.validate(&[json!(1)]).is_ok());
        assert_eq!(
            v.validate(&[json!(1), json!(2)]).unwrap_err().code,
            "max_items"
        );
    }

    #[test]
    fn inverted_bounds() {
        assert!(SizeRange::new(Some(3), Some(2)).is_err());
    }
}
