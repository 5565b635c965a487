//! Prelude module for convenient imports.
//!
//! ```
//! use contour_validator::prelude::*;
//!
//! let zone = time_zone();
//! assert!(zone.validate("America/Tijuana").is_ok());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, time
// ============================================================================

pub use crate::foundation::{
    AsValidatable, Clock, Constraint, ConstraintError, EvaluationContext, FixedClock, Outcome,
    SystemClock, Validate, ValidationError, ViolationKind,
};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// ADAPTERS: Typed validators as JSON constraints
// ============================================================================

pub use crate::json::{
    OnNumber, OnSequence, OnStr, OnValue, on_number, on_sequence, on_str, on_value,
};
