//! Built-in validators
//!
//! Ready-to-use primitives for the checks a record field usually needs.
//!
//! # Categories
//!
//! - **Category**: runtime value kind (string, integer, record, ...)
//! - **Numeric**: inclusive / exclusive ranges
//! - **Collection**: sequence size
//! - **String**: regular expressions, e-mail, UUID, dates, time zones
//! - **Semantic**: phone numbers, signed tokens
//!
//! # Examples
//!
//! ```
//! use contour_validator::foundation::Validate;
//! use contour_validator::validators::{NumberRange, email, iso_date};
//!
//! assert!(email().validate("example@example.com").is_ok());
//! assert!(iso_date().validate("1990-01-01").is_ok());
//! assert!(NumberRange::between(18.0, 100.0).unwrap().validate(&42.0).is_ok());
//! ```

// Category validators
pub mod kind;

// Numeric validators
pub mod range;

// Collection validators
pub mod size;

// String validators
pub mod content;
pub mod format;

// Semantic validators
pub mod phone;
pub mod token;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use kind::{KindCheck, ValueKind, kind};

pub use range::NumberRange;

pub use size::SizeRange;

pub use content::{Email, MatchesRegex, email, matches_regex};

pub use format::{
    DateTime, IsoDate, TimeZone, Uuid, date_time, iso_date, parse_date, time_zone, uuid,
};

pub use phone::{Phone, PhoneRegion, phone};

pub use token::{SignedToken, TokenConfig, TokenKey, signed_token};
