//! Error types for constraint failures
//!
//! [`ValidationError`] is the value a primitive returns when an input does not
//! satisfy it. It is never raised as a fault: malformed input is just another
//! failed check. [`ConstraintError`] is the opposite case, a primitive that
//! could not be built from its configuration.
//!
//! All string fields use `Cow<'static, str>` so the common static codes and
//! messages do not allocate.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// VIOLATION KIND
// ============================================================================

/// Category of a validation failure.
///
/// Every failure produced by a primitive or by the schema walker belongs to
/// exactly one category. Callers switch on the kind; the accompanying
/// message is for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// A required field without a default is absent.
    MissingRequiredField,
    /// The value has the wrong runtime category.
    TypeMismatch,
    /// A schema level was applied to something that is not a record.
    NotARecord,
    /// A string does not match its pattern or named format.
    FormatMismatch,
    /// A number or a sequence length is outside its bounds.
    OutOfRange,
    /// A string is not a valid phone number for the expected region.
    InvalidPhoneNumber,
    /// A signed token failed verification or one of its time checks.
    InvalidToken,
    /// Summary of the failures of a nested record.
    NestedSchemaViolation,
    /// A key not declared by a closed schema.
    UnknownField,
}

impl ViolationKind {
    /// Stable snake_case identifier, also used as the default error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::TypeMismatch => "type_mismatch",
            Self::NotARecord => "not_a_record",
            Self::FormatMismatch => "format_mismatch",
            Self::OutOfRange => "out_of_range",
            Self::InvalidPhoneNumber => "invalid_phone_number",
            Self::InvalidToken => "invalid_token",
            Self::NestedSchemaViolation => "nested_schema_violation",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured constraint failure.
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::{ValidationError, ViolationKind};
///
/// let error = ValidationError::new(ViolationKind::OutOfRange, "Value must be at most 10")
///     .with_code("max")
///     .with_param("max", "10")
///     .with_param("actual", "12");
///
/// assert_eq!(error.kind, ViolationKind::OutOfRange);
/// assert_eq!(error.param("actual"), Some("12"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Failure category.
    pub kind: ViolationKind,

    /// Fine-grained code for programmatic handling.
    ///
    /// Defaults to the kind identifier. Examples: "phone_region",
    /// "token_expired", "exclusive_min".
    pub code: Cow<'static, str>,

    /// Human-readable message in English.
    pub message: Cow<'static, str>,

    /// Ordered key-value parameters (typically 0-3).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new error of the given kind.
    pub fn new(kind: ViolationKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            code: Cow::Borrowed(kind.as_str()),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Overrides the error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "type_mismatch" error.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self::new(
            ViolationKind::TypeMismatch,
            format!("Expected {expected}, got {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    /// Creates a "format_mismatch" error for a named format.
    pub fn invalid_format(expected: impl Into<Cow<'static, str>>) -> Self {
        let expected = expected.into();
        Self::new(
            ViolationKind::FormatMismatch,
            format!("Value is not a valid {expected}"),
        )
        .with_param("expected", expected)
    }

    /// Creates an "invalid_phone_number" error.
    pub fn invalid_phone(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ViolationKind::InvalidPhoneNumber, message)
    }

    /// Creates an "invalid_token" error carrying the underlying reason.
    pub fn invalid_token(reason: impl fmt::Display) -> Self {
        Self::new(ViolationKind::InvalidToken, format!("Invalid token: {reason}"))
    }
}

// ============================================================================
// CONSTRUCTION ERRORS
// ============================================================================

/// A primitive could not be built from its configuration.
///
/// Raised when the constraint is constructed, never during validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConstraintError {
    /// The regular expression does not compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The region code is not a known ISO 3166 country.
    #[error("unknown phone region `{region}`")]
    UnknownRegion { region: String },

    /// The token key material cannot be used for verification.
    #[error("invalid token key: {reason}")]
    InvalidTokenKey { reason: String },

    /// A token configuration must allow at least one algorithm.
    #[error("token configuration allows no algorithms")]
    NoAlgorithms,

    /// The token algorithms mix key families (e.g. HMAC and RSA).
    #[error("algorithm {algorithm} does not match the configured key")]
    AlgorithmKeyMismatch { algorithm: String },

    /// The lower bound exceeds the upper bound.
    #[error("invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: String, max: String },
}

// ============================================================================
// TESTS
// ============================================================================
