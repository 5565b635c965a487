//! Runtime category checks for JSON values

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::{Validate, ValidationError, json_type_name};

/// Expected runtime category of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Anything, including null.
    Any,
    /// JSON `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number without a fractional part that fits `i64` or `u64`.
    Integer,
    /// Any JSON number.
    Number,
    /// A string.
    String,
    /// An array.
    Sequence,
    /// An object.
    Record,
}

impl ValueKind {
    /// Returns true when `value` belongs to this category.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Null => value.is_null(),
            Self::Boolean => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Sequence => value.is_array(),
            Self::Record => value.is_object(),
        }
    }

    /// Category name as it appears in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates the runtime category of a JSON value.
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::Validate;
/// use contour_validator::validators::{ValueKind, kind};
/// use serde_json::json;
///
/// let v = kind(ValueKind::Integer);
/// assert!(v.validate(&json!(42)).is_ok());
/// assert!(v.validate(&json!(4.2)).is_err());
/// assert!(v.validate(&json!("42")).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindCheck {
    expected: ValueKind,
}

impl KindCheck {
    /// Creates a check for `expected`.
    #[must_use]
    pub const fn new(expected: ValueKind) -> Self {
        Self { expected }
    }

    /// The expected category.
    #[must_use]
    pub const fn expected(&self) -> ValueKind {
        self.expected
    }
}

impl Validate for KindCheck {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        if self.expected.matches(input) {
            return Ok(());
        }

        // "number" is too vague when an integer was asked for and 1.5 came in.
        let actual = match input {
            Value::Number(_) if self.expected == ValueKind::Integer => "non-integer number",
            other => json_type_name(other),
        };
        Err(ValidationError::type_mismatch(self.expected.as_str(), actual))
    }
}

/// Creates a category check.
#[must_use]
pub const fn kind(expected: ValueKind) -> KindCheck {
    KindCheck::new(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ViolationKind;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ValueKind::Any, json!(null), true)]
    #[case(ValueKind::Null, json!(null), true)]
    #[case(ValueKind::Null, json!(0), false)]
    #[case(ValueKind::Boolean, json!(false), true)]
    #[case(ValueKind::Boolean, json!("false"), false)]
    #[case(ValueKind::Integer, json!(-7), true)]
    #[case(ValueKind::Integer, json!(u64::MAX), true)]
    #[case(ValueKind::Integer, json!(7.5), false)]
    #[case(ValueKind::Number, json!(7.5), true)]
    #[case(ValueKind::Number, json!(7), true)]
    #[case(ValueKind::String, json!(""), true)]
    #[case(ValueKind::Sequence, json!([]), true)]
    #[case(ValueKind::Sequence, json!({}), false)]
    #[case(ValueKind::Record, json!({}), true)]
    #[case(ValueKind::Record, json!([]), false)]
    fn kind_matrix(#[case] expected: ValueKind, #[case] value: Value, #[case] ok: bool) {
        assert_eq!(kind(expected).validate(&value).is_ok(), ok);
    }

    #[test]
    fn mismatch_reports_both_categories() {
        let err = kind(ValueKind::Integer).validate(&json!("x")).unwrap_err();
        assert_eq!(err.kind, ViolationKind::TypeMismatch);
        assert_eq!(err.param("expected"), Some("integer"));
        assert_eq!(err.param("actual"), Some("string"));
    }

    #[test]
    fn fractional_number_for_integer() {
        let err = kind(ValueKind::Integer).validate(&json!(1.5)).unwrap_err();
        assert_eq!(err.param("actual"), Some("non-integer number"));
    }
}
