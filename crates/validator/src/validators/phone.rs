//! Phone number validator backed by `phonenumber`.
//!
//! Parsing, validity and region lookup are delegated to the library metadata;
//! this module only decides which region the number has to belong to.

use std::fmt;
use std::str::FromStr;

use phonenumber::country;

use crate::foundation::{ConstraintError, Validate, ValidationError};

// ============================================================================
// REGION
// ============================================================================

/// Region a phone number is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneRegion {
    /// Any region. The number must then carry its own international prefix.
    #[default]
    Any,
    /// A specific ISO 3166 region. Numbers without a prefix are read as
    /// national numbers of this region.
    Region(country::Id),
}

impl PhoneRegion {
    fn hint(self) -> Option<country::Id> {
        match self {
            Self::Any => None,
            Self::Region(id) => Some(id),
        }
    }
}

impl FromStr for PhoneRegion {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        code.parse::<country::Id>()
            .map(Self::Region)
            .map_err(|_| ConstraintError::UnknownRegion {
                region: s.to_string(),
            })
    }
}

impl fmt::Display for PhoneRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Region(id) => write!(f, "{id:?}"),
        }
    }
}

// ============================================================================
// PHONE VALIDATOR
// ============================================================================

/// Validates phone numbers against the `phonenumber` metadata.
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::Validate;
/// use contour_validator::validators::Phone;
///
/// let any = Phone::any();
/// assert!(any.validate("+1 650-253-0000").is_ok());
/// assert!(any.validate("650-253-0000").is_err()); // no prefix
///
/// let us = Phone::for_region("US").unwrap();
/// assert!(us.validate("(650) 253-0000").is_ok());
/// assert!(us.validate("+44 20 7031 3000").is_err()); // wrong region
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Phone {
    region: PhoneRegion,
}

impl Phone {
    /// Accepts numbers from any region.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            region: PhoneRegion::Any,
        }
    }

    /// Accepts only numbers of `region` (an ISO 3166 alpha-2 code).
    pub fn for_region(region: &str) -> Result<Self, ConstraintError> {
        Ok(Self {
            region: region.parse()?,
        })
    }

    /// Creates a validator for an already resolved region.
    #[must_use]
    pub const fn new(region: PhoneRegion) -> Self {
        Self { region }
    }

    /// The configured region.
    #[must_use]
    pub const fn region(&self) -> PhoneRegion {
        self.region
    }
}

impl Validate for Phone {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let number = phonenumber::parse(self.region.hint(), input).map_err(|e| {
            ValidationError::invalid_phone(format!("Value is not a phone number: {e}"))
                .with_code("phone_unparseable")
        })?;

        if !phonenumber::is_valid(&number) {
            return Err(
                ValidationError::invalid_phone("Phone number is not valid")
                    .with_code("phone_invalid"),
            );
        }

        if let PhoneRegion::Region(expected) = self.region {
            let actual = number.country().id();
            if actual != Some(expected) {
                let actual = actual.map_or_else(|| "unknown".to_string(), |id| format!("{id:?}"));
                return Err(ValidationError::invalid_phone(format!(
                    "Phone number belongs to region {actual}, expected {expected:?}"
                ))
                .with_code("phone_region")
                .with_param("expected", format!("{expected:?}"))
                .with_param("actual", actual));
            }
        }

        Ok(())
    }
}

/// Creates a phone validator for any region.
#[must_use]
pub const fn phone() -> Phone {
    Phone::any()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ViolationKind;
    use rstest::rstest;

    #[rstest]
    #[case("+16502530000")]
    #[case("+1 (650) 253-0000")]
    #[case("+44 20 7031 3000")]
    #[case("+1 (619) 867-5309")]
    // Formatting is not part of validity: all three spell one number.
    #[case("+526641231234")]
    #[case("+52 664 123 1234")]
    #[case("+52 (664) 123-1234")]
    fn any_region_accepts_international(#[case] input: &str) {
        assert!(phone().validate(input).is_ok());
    }

    #[rstest]
    #[case("not-a-number")]
    #[case("000000000000")]
    #[case("6502530000")]
    #[case("+526ZA99321234")]
    #[case("")]
    fn any_region_rejects(#[case] input: &str) {
        let err = phone().validate(input).unwrap_err();
        assert_eq!(err.kind, ViolationKind::InvalidPhoneNumber);
    }

    #[test]
    fn region_hint_reads_national_numbers() {
        let us = Phone::for_region("us").unwrap();
        assert!(us.validate("650-253-0000").is_ok());
        assert!(us.validate("+1 650 253 0000").is_ok());
    }

    #[test]
    fn region_mismatch() {
        let us = Phone::for_region("US").unwrap();
        let err = us.validate("+44 20 7031 3000").unwrap_err();
        assert_eq!(err.code, "phone_region");
        assert_eq!(err.param("expected"), Some("US"));
        assert_eq!(err.param("actual"), Some("GB"));
    }

    #[test]
    fn unknown_region_is_construction_error() {
        assert_eq!(
            Phone::for_region("XX"),
            Err(ConstraintError::UnknownRegion {
                region: "XX".into()
            })
        );
    }
}
