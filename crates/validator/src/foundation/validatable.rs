//! AsValidatable trait with GAT for input conversion
//!
//! Lets one validator accept several input representations. The JSON
//! implementations are the bridge between dynamic record values and typed
//! validators: a mismatched category turns into a `type_mismatch` error.

use std::borrow::Borrow;

use serde_json::Value;

use crate::foundation::ValidationError;

// ============================================================================
// CORE TRAIT
// ============================================================================

/// Trait for types that can be converted for validation.
///
/// Uses a GAT so implementations can return either a borrow or an owned
/// copy, unified through `Borrow`.
pub trait AsValidatable<T: ?Sized> {
    /// The output type, which must be borrowable as `&T`.
    type Output<'a>: Borrow<T>
    where
        Self: 'a;

    /// Converts self to a validatable form.
    fn as_validatable(&self) -> Result<Self::Output<'_>, ValidationError>;
}

// ============================================================================
// REFLEXIVE IMPLEMENTATIONS
// ============================================================================

impl AsValidatable<str> for str {
    type Output<'a>
        = &'a str
    where
        Self: 'a;

    #[inline]
    fn as_validatable(&self) -> Result<&str, ValidationError> {
        Ok(self)
    }
}

impl AsValidatable<str> for String {
    type Output<'a> = &'a str;

    #[inline]
    fn as_validatable(&self) -> Result<&str, ValidationError> {
        Ok(self.as_str())
    }
}

impl AsValidatable<f64> for f64 {
    type Output<'a> = f64;

    #[inline]
    fn as_validatable(&self) -> Result<f64, ValidationError> {
        Ok(*self)
    }
}

impl AsValidatable<f64> for i64 {
    type Output<'a> = f64;

    #[inline]
    fn as_validatable(&self) -> Result<f64, ValidationError> {
        Ok(*self as f64)
    }
}

impl<T> AsValidatable<[T]> for Vec<T> {
    type Output<'a>
        = &'a [T]
    where
        Self: 'a;

    #[inline]
    fn as_validatable(&self) -> Result<&[T], ValidationError> {
        Ok(self.as_slice())
    }
}

impl AsValidatable<Value> for Value {
    type Output<'a> = &'a Value;

    #[inline]
    fn as_validatable(&self) -> Result<&Value, ValidationError> {
        Ok(self)
    }
}

// ============================================================================
// JSON VALUE CONVERSIONS
// ============================================================================

/// Human-readable category name of a JSON value.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}

impl AsValidatable<str> for Value {
    type Output<'a>
        = &'a str
    where
        Self: 'a;

    #[inline]
    fn as_validatable(&self) -> Result<&str, ValidationError> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            other => Err(ValidationError::type_mismatch(
                "string",
                json_type_name(other),
            )),
        }
    }
}

impl AsValidatable<f64> for Value {
    type Output<'a> = f64;

    #[inline]
    fn as_validatable(&self) -> Result<f64, ValidationError> {
        match self {
            // Without arbitrary_precision every JSON number has an f64 view.
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ValidationError::type_mismatch("number", "number")),
            other => Err(ValidationError::type_mismatch(
                "number",
                json_type_name(other),
            )),
        }
    }
}

impl AsValidatable<[Value]> for Value {
    type Output<'a>
        = &'a [Value]
    where
        Self: 'a;

    #[inline]
    fn as_validatable(&self) -> Result<&[Value], ValidationError> {
        match self {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(ValidationError::type_mismatch(
                "sequence",
                json_type_name(other),
            )),
        }
    }
}
