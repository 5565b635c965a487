//! String content validators
//!
//! Regular-expression and e-mail checks.

use std::sync::LazyLock;

use crate::foundation::{ConstraintError, ValidationError};

// Local part, one or more domain labels, and an alphabetic top-level label of
// at least two characters.
static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .unwrap()
});

// ============================================================================
// REGEX VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates that a string matches a regular expression.
    ///
    /// The match is unanchored; add `^` / `$` to the pattern for a full match.
    ///
    /// ```
    /// use contour_validator::foundation::Validate;
    /// use contour_validator::validators::matches_regex;
    ///
    /// let v = matches_regex(r"^\d{3}-\d{4}$").unwrap();
    /// assert!(v.validate("555-1234").is_ok());
    /// assert!(v.validate("5551234").is_err());
    /// ```
    pub MatchesRegex { pattern: regex::Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) {
        ValidationError::new(
            crate::foundation::ViolationKind::FormatMismatch,
            format!("Value does not match pattern {}", self.pattern.as_str()),
        )
        .with_code("pattern")
        .with_param("pattern", self.pattern.as_str().to_string())
    }
    new(pattern: &str) -> ConstraintError {
        let compiled = regex::Regex::new(pattern).map_err(|e| ConstraintError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern: compiled })
    }
    fn matches_regex(pattern: &str) -> ConstraintError;
}

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates e-mail address format.
    pub Email { pattern: regex::Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) { ValidationError::invalid_format("email") }
    new() {
        Self {
            pattern: EMAIL_REGEX.clone(),
        }
    }
    fn email();
}

// ============================================================================
// TESTS
// ============================================================================
