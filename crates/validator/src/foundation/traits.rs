//! Core traits for typed validators
//!
//! Typed validators check one Rust-level input (`str`, `f64`, a slice of
//! values). The value-level [`Constraint`](crate::foundation::Constraint)
//! trait sits on top of them and is what schemas consume.

use std::borrow::Borrow;

use crate::foundation::validatable::AsValidatable;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait every typed validator implements.
///
/// Generic over the input type so that string validators only ever see
/// strings and numeric validators only ever see numbers.
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::{Validate, ValidationError, ViolationKind};
///
/// struct NotBlank;
///
/// impl Validate for NotBlank {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.trim().is_empty() {
///             Err(ValidationError::new(ViolationKind::FormatMismatch, "must not be blank"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NotBlank.validate("x").is_ok());
/// assert!(NotBlank.validate("  ").is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` inputs such as `str` and `[T]` where possible.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), crate::foundation::ValidationError>;

    /// Validates any type that can be viewed as `Self::Input`.
    ///
    /// Conversions that cannot succeed (a JSON number handed to a string
    /// validator) fail with a `type_mismatch` error instead of panicking.
    ///
    /// ```
    /// use contour_validator::foundation::{Validate, ViolationKind};
    /// use contour_validator::validators::email;
    /// use serde_json::json;
    ///
    /// let validator = email();
    /// assert!(validator.validate_any(&json!("user@example.com")).is_ok());
    ///
    /// let err = validator.validate_any(&json!(42)).unwrap_err();
    /// assert_eq!(err.kind, ViolationKind::TypeMismatch);
    /// ```
    fn validate_any<S>(&self, value: &S) -> Result<(), crate::foundation::ValidationError>
    where
        Self: Sized,
        S: AsValidatable<Self::Input> + ?Sized,
        for<'a> <S as AsValidatable<Self::Input>>::Output<'a>: Borrow<Self::Input>,
    {
        let output = value.as_validatable()?;
        self.validate(output.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ValidationError, ViolationKind};

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    #[test]
    fn test_validator_trait() {
        assert!(AlwaysValid.validate("test").is_ok());
    }

    #[test]
    fn test_validate_any_with_owned_string() {
        assert!(AlwaysValid.validate_any(&String::from("test")).is_ok());
    }

    #[test]
    fn test_validate_any_type_mismatch() {
        let err = AlwaysValid
            .validate_any(&serde_json::Value::Bool(true))
            .unwrap_err();
        assert_eq!(err.kind, ViolationKind::TypeMismatch);
        assert_eq!(err.param("actual"), Some("boolean"));
    }
}
