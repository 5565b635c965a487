//! Core validation types and traits
//!
//! - **Traits**: [`Validate`] for typed inputs, [`Constraint`] for JSON values
//! - **Errors**: [`ValidationError`], [`ViolationKind`], [`ConstraintError`]
//! - **Time**: [`Clock`], [`SystemClock`], [`FixedClock`]
//!
//! Typed validators are written once against `str` / `f64` / `[Value]` and
//! lifted to value-level constraints by the adapters in [`crate::json`].

pub mod clock;
pub mod constraint;
pub mod error;
pub mod traits;
pub mod validatable;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constraint::{Constraint, EvaluationContext, Outcome};
pub use error::{ConstraintError, ValidationError, ViolationKind};
pub use traits::Validate;
pub use validatable::{AsValidatable, json_type_name};
