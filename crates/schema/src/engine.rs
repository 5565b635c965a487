//! Validation engine.
//!
//! A single depth-first walk over schema and input. The walker keeps the
//! current path as a stack and appends violations as it meets them; nothing
//! stops the walk early except a type mismatch, which ends the checks of
//! the one field it belongs to.

use contour_validator::foundation::{
    Clock, EvaluationContext, Outcome, Validate, ValidationError, ViolationKind, json_type_name,
};
use serde_json::{Map, Value};

use crate::field::{FieldDescriptor, Shape};
use crate::path::{FieldPath, PathSegment};
use crate::result::{ValidationResult, Violation};
use crate::schema::{Schema, UnknownFields};

/// Validates `value` against `schema`, reading the system clock.
///
/// # Examples
///
/// ```
/// use contour_schema::{FieldDescriptor, Schema, validate};
/// use serde_json::json;
///
/// let schema = Schema::builder()
///     .field("name", FieldDescriptor::string())
///     .build()?;
///
/// let result = validate(&schema, &json!({ "name": 7 }));
/// assert!(!result.is_valid());
/// assert_eq!(result.violations()[0].path.to_string(), "name");
/// # Ok::<(), contour_schema::SchemaError>(())
/// ```
#[must_use]
pub fn validate(schema: &Schema, value: &Value) -> ValidationResult {
    validate_with(schema, value, &EvaluationContext::default())
}

/// Validates `value` with time-dependent checks reading `clock`.
#[must_use]
pub fn validate_at(schema: &Schema, value: &Value, clock: &dyn Clock) -> ValidationResult {
    validate_with(schema, value, &EvaluationContext::new(clock))
}

/// Validates `value` within an existing evaluation context.
#[must_use]
pub fn validate_with(
    schema: &Schema,
    value: &Value,
    ctx: &EvaluationContext<'_>,
) -> ValidationResult {
    let mut walker = Walker::new(ctx, FieldPath::root());
    walker.record(schema, value);
    let violations = walker.finish();

    tracing::debug!(
        fields = schema.len(),
        violations = violations.len(),
        "record validated"
    );
    ValidationResult::from_violations(violations)
}

/// Whether `value` satisfies `schema`.
#[must_use]
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_valid()
}

/// Depth-first walker accumulating violations.
pub(crate) struct Walker<'c, 'a> {
    ctx: &'c EvaluationContext<'a>,
    path: Vec<PathSegment>,
    violations: Vec<Violation>,
}

impl<'c, 'a> Walker<'c, 'a> {
    pub(crate) fn new(ctx: &'c EvaluationContext<'a>, base: FieldPath) -> Self {
        Self {
            ctx,
            path: base.segments().to_vec(),
            violations: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Vec<Violation> {
        self.violations
    }

    /// Checks one record level.
    pub(crate) fn record(&mut self, schema: &Schema, value: &Value) {
        let Value::Object(map) = value else {
            self.push(Violation::new(
                FieldPath::from(self.path.as_slice()),
                ViolationKind::NotARecord,
                format!("Expected a record, got {}", json_type_name(value)),
            ));
            return;
        };
        self.fields(schema, map);
    }

    fn fields(&mut self, schema: &Schema, map: &Map<String, Value>) {
        for (name, field) in schema.fields() {
            self.path.push(PathSegment::Key(name.to_owned()));
            self.field(field, map.get(name));
            self.path.pop();
        }

        if schema.unknown_fields() == UnknownFields::Deny {
            for key in map.keys().filter(|key| !schema.contains(key)) {
                self.path.push(PathSegment::Key(key.clone()));
                self.push(Violation::new(
                    FieldPath::from(self.path.as_slice()),
                    ViolationKind::UnknownField,
                    format!("Field `{key}` is not declared"),
                ));
                self.path.pop();
            }
        }
    }

    /// Checks one possibly absent field at the current path.
    pub(crate) fn field(&mut self, field: &FieldDescriptor, value: Option<&Value>) {
        match value {
            None => {
                if field.absence_is_violation() {
                    self.push(Violation::new(
                        FieldPath::from(self.path.as_slice()),
                        ViolationKind::MissingRequiredField,
                        "Field is required",
                    ));
                }
            }
            Some(Value::Null) if field.is_nullable() => {}
            Some(value) => self.shape(field.shape(), value),
        }
    }

    fn shape(&mut self, shape: &Shape, value: &Value) {
        match shape {
            Shape::Value {
                constraints,
                claims,
            } => {
                for constraint in constraints {
                    match constraint.evaluate(value, self.ctx) {
                        Outcome::Valid => {}
                        // Claims are checked in place: `auth.sub`, not `auth.claims.sub`.
                        Outcome::Claims(decoded) => {
                            if let Some(schema) = claims {
                                self.fields(schema, &decoded);
                            }
                        }
                        Outcome::Invalid(error) => {
                            let stop = error.kind == ViolationKind::TypeMismatch;
                            self.error(error);
                            if stop {
                                break;
                            }
                        }
                    }
                }
            }
            Shape::Record(schema) => self.record(schema, value),
            Shape::Sequence { items, size } => {
                let Value::Array(elements) = value else {
                    self.error(ValidationError::type_mismatch(
                        "sequence",
                        json_type_name(value),
                    ));
                    return;
                };
                if let Some(size) = size
                    && let Err(error) = size.validate(elements)
                {
                    self.error(error);
                }
                for (index, element) in elements.iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    self.shape(items, element);
                    self.path.pop();
                }
            }
        }
    }

    fn error(&mut self, error: ValidationError) {
        self.push(Violation::from_error(
            FieldPath::from(self.path.as_slice()),
            error,
        ));
    }

    fn push(&mut self, violation: Violation) {
        tracing::trace!(
            path = %violation.path,
            kind = %violation.kind,
            "violation"
        );
        self.violations.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_validator::foundation::FixedClock;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paths(result: &ValidationResult) -> Vec<String> {
        result
            .violations()
            .iter()
            .map(|v| v.path.to_string())
            .collect()
    }

    #[test]
    fn non_record_root() {
        let schema = Schema::builder()
            .field("a", FieldDescriptor::string())
            .build()
            .unwrap();
        for value in [json!(null), json!(1), json!("x"), json!([])] {
            let result = validate(&schema, &value);
            assert_eq!(result.len(), 1);
            assert_eq!(result.violations()[0].kind, ViolationKind::NotARecord);
            assert!(result.violations()[0].path.is_root());
        }
    }

    #[test]
    fn visits_in_declaration_order() {
        let schema = Schema::builder()
            .field("b", FieldDescriptor::string())
            .field("a", FieldDescriptor::integer())
            .field("c", FieldDescriptor::boolean())
            .build()
            .unwrap();
        let result = validate(&schema, &json!({ "a": "x", "c": 1 }));
        assert_eq!(paths(&result), vec!["b", "a", "c"]);
    }

    #[test]
    fn unknown_fields_after_declared() {
        let schema = Schema::builder()
            .field("id", FieldDescriptor::integer())
            .deny_unknown_fields()
            .build()
            .unwrap();
        let result = validate(&schema, &json!({ "zeta": 1, "id": "x", "alpha": 2 }));
        let kinds: Vec<_> = result.violations().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::TypeMismatch,
                ViolationKind::UnknownField,
                ViolationKind::UnknownField,
            ]
        );
        assert_eq!(paths(&result), vec!["id", "zeta", "alpha"]);
    }

    #[test]
    fn validate_at_uses_the_given_clock() {
        let schema = Schema::builder()
            .field("n", FieldDescriptor::number())
            .build()
            .unwrap();
        let clock = FixedClock::at_timestamp(0).unwrap();
        assert!(validate_at(&schema, &json!({ "n": 1.5 }), &clock).is_valid());
    }
}
