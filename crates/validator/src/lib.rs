//! # contour-validator
//!
//! Constraint primitives for validating dynamically-typed records.
//!
//! ## Quick Start
//!
//! ```
//! use contour_validator::prelude::*;
//! use serde_json::json;
//!
//! let age = NumberRange::between(0.0, 150.0).unwrap();
//! assert!(age.validate(&42.0).is_ok());
//!
//! // Typed validators accept JSON values through `validate_any`.
//! assert!(email().validate_any(&json!("user@example.com")).is_ok());
//! ```
//!
//! ## Two layers
//!
//! - [`Validate`](foundation::Validate) checks one typed input (`str`,
//!   `f64`, `[Value]`, `Value`). Use the [`validator!`] macro for
//!   zero-boilerplate validators.
//! - [`Constraint`](foundation::Constraint) checks a raw JSON value inside an
//!   [`EvaluationContext`](foundation::EvaluationContext). Schemas are built
//!   from constraints; the adapters in [`json`] lift typed validators.
//!
//! Malformed input never panics and never returns a fault: every problem is
//! a [`ValidationError`](foundation::ValidationError). Only building a
//! primitive from bad configuration fails, with a
//! [`ConstraintError`](foundation::ConstraintError).
//!
//! ## Built-in Validators
//!
//! - **Category**: [`KindCheck`](validators::KindCheck)
//! - **Numeric**: [`NumberRange`](validators::NumberRange)
//! - **Collection**: [`SizeRange`](validators::SizeRange)
//! - **String**: [`MatchesRegex`](validators::MatchesRegex), [`Email`](validators::Email),
//!   [`Uuid`](validators::Uuid), [`IsoDate`](validators::IsoDate),
//!   [`DateTime`](validators::DateTime), [`TimeZone`](validators::TimeZone)
//! - **Semantic**: [`Phone`](validators::Phone), [`SignedToken`](validators::SignedToken)

// ValidationError is the fundamental error type for all validators;
// boxing it would add indirection to every validation call.
#![allow(clippy::result_large_err)]

pub mod foundation;
pub mod json;
mod macros;
pub mod prelude;
pub mod validators;
