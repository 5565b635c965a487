//! Value-level constraints
//!
//! A [`Constraint`] is the unit a schema field is built from. It receives the
//! raw JSON value (so it can report a type mismatch itself) and an
//! [`EvaluationContext`] carrying the clock for the current pass.

use std::fmt;

use serde_json::{Map, Value};

use crate::foundation::{Clock, SystemClock, ValidationError};

/// Result of evaluating one constraint against one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value satisfies the constraint.
    Valid,
    /// The value satisfies the constraint and decodes to a record that
    /// secondary field checks may inspect (e.g. token claims).
    Claims(Map<String, Value>),
    /// The value violates the constraint.
    Invalid(ValidationError),
}

impl Outcome {
    /// Returns true unless the outcome is [`Outcome::Invalid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

impl From<Result<(), ValidationError>> for Outcome {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(error) => Self::Invalid(error),
        }
    }
}

/// Per-pass state handed to every constraint.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    clock: &'a dyn Clock,
}

impl<'a> EvaluationContext<'a> {
    /// Creates a context reading time from `clock`.
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    /// The clock for this pass.
    pub fn clock(&self) -> &'a dyn Clock {
        self.clock
    }

    /// Current instant according to the pass clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

impl Default for EvaluationContext<'static> {
    fn default() -> Self {
        Self { clock: &SystemClock }
    }
}

/// A named, pure predicate over a single JSON value.
///
/// Implementations must not panic on malformed input; every problem with
/// the value is reported as [`Outcome::Invalid`]. Constraints are shared
/// between threads and must be immutable after construction.
///
/// # Examples
///
/// ```
/// use contour_validator::foundation::{
///     Constraint, EvaluationContext, Outcome, ValidationError, ViolationKind,
/// };
/// use serde_json::{Value, json};
///
/// #[derive(Debug)]
/// struct EvenNumber;
///
/// impl Constraint for EvenNumber {
///     fn name(&self) -> &str {
///         "even"
///     }
///
///     fn evaluate(&self, value: &Value, _ctx: &EvaluationContext<'_>) -> Outcome {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Outcome::Valid,
///             _ => Outcome::Invalid(ValidationError::new(
///                 ViolationKind::OutOfRange,
///                 "must be even",
///             )),
///         }
///     }
/// }
///
/// let ctx = EvaluationContext::default();
/// assert!(EvenNumber.evaluate(&json!(4), &ctx).is_valid());
/// assert!(!EvenNumber.evaluate(&json!(3), &ctx).is_valid());
/// ```
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Evaluates the constraint.
    fn evaluate(&self, value: &Value, ctx: &EvaluationContext<'_>) -> Outcome;
}
