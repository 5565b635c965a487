//! Validation results.

use std::fmt;

use contour_validator::foundation::{ValidationError, ViolationKind};
use indexmap::IndexMap;
use serde::Serialize;

use crate::path::{FieldPath, PathSegment};

/// One located failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Where the failure is, from the validated root.
    pub path: FieldPath,

    /// Failure category.
    pub kind: ViolationKind,

    /// Fine-grained code, e.g. `"max"` or `"token_expired"`.
    pub code: String,

    /// Human-readable description.
    pub message: String,

    /// Structured details such as bounds and actual values.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, String>,

    /// Folded sub-violations. Only set on `nested_schema_violation`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Violation>,
}

impl Violation {
    /// Creates a violation without params.
    pub fn new(path: FieldPath, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            code: kind.as_str().to_owned(),
            message: message.into(),
            params: IndexMap::new(),
            nested: Vec::new(),
        }
    }

    /// Locates a primitive failure.
    #[must_use]
    pub fn from_error(path: FieldPath, error: ValidationError) -> Self {
        Self {
            path,
            kind: error.kind,
            code: error.code.into_owned(),
            message: error.message.into_owned(),
            params: error
                .params
                .into_iter()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            nested: Vec::new(),
        }
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}] {}", self.path, self.kind, self.message)
    }
}

/// Outcome of one validation pass.
///
/// `is_valid()` is true exactly when there are no violations. Violations
/// are in visit order: declared fields in declaration order, depth first,
/// then undeclared keys of closed schemas.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub(crate) fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// A result without violations.
    #[must_use]
    pub fn valid() -> Self {
        Self::from_violations(Vec::new())
    }

    /// Whether no violation was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// All violations, flat, with full paths.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the result, returning its violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations at or below `path`.
    pub fn at<'a>(&'a self, path: &'a FieldPath) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.path.starts_with(path))
    }

    /// Folds every violation below a nested record field into one
    /// `nested_schema_violation` at that field.
    ///
    /// Top-level violations stay as they are. Folded violations keep their
    /// full paths and are grouped again one level further down. Sequence
    /// items are not records of the field itself, so `tags[1]` and
    /// `items[0].qty` stay where they are.
    ///
    /// ```
    /// use contour_schema::{FieldDescriptor, Schema};
    /// use contour_schema::validator::foundation::ViolationKind;
    /// use serde_json::json;
    ///
    /// let address = Schema::builder()
    ///     .field("city", FieldDescriptor::string())
    ///     .field("zip", FieldDescriptor::string())
    ///     .build()?;
    /// let user = Schema::builder()
    ///     .field("address", FieldDescriptor::record(address))
    ///     .build()?;
    ///
    /// let grouped = user.validate(&json!({ "address": {} })).grouped();
    /// assert_eq!(grouped.len(), 1);
    /// assert_eq!(grouped[0].kind, ViolationKind::NestedSchemaViolation);
    /// assert_eq!(grouped[0].nested.len(), 2);
    /// # Ok::<(), contour_schema::SchemaError>(())
    /// ```
    #[must_use]
    pub fn grouped(&self) -> Vec<Violation> {
        group(&self.violations, 0)
    }

    /// `Ok(())` when valid, the violations otherwise.
    pub fn into_result(self) -> Result<(), ValidationFailed> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationFailed {
                violations: self.violations,
            })
        }
    }
}

fn group(violations: &[Violation], depth: usize) -> Vec<Violation> {
    let mut out: Vec<Violation> = Vec::new();
    let mut buckets: IndexMap<FieldPath, Vec<Violation>> = IndexMap::new();
    // Position in `out` where each bucket's wrapper goes.
    let mut slots: Vec<(usize, FieldPath)> = Vec::new();

    for violation in violations {
        let below_record = matches!(
            violation.path.segments().get(depth + 1),
            Some(PathSegment::Key(_))
        );
        if !below_record {
            out.push(violation.clone());
            continue;
        }
        let prefix = violation.path.truncated(depth + 1);
        if !buckets.contains_key(&prefix) {
            slots.push((out.len() + slots.len(), prefix.clone()));
        }
        buckets.entry(prefix).or_default().push(violation.clone());
    }

    for (slot, prefix) in slots {
        let Some(members) = buckets.shift_remove(&prefix) else {
            continue;
        };
        let mut wrapper = Violation::new(
            prefix,
            ViolationKind::NestedSchemaViolation,
            format!("{} nested violation(s)", members.len()),
        );
        wrapper.nested = group(&members, depth + 1);
        out.insert(slot, wrapper);
    }
    out
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        write!(f, "{} violation(s):", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            write!(f, "\n  {}. {violation}", i + 1)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// A failed validation, as an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationFailed {
    /// The violations that caused the failure.
    pub violations: Vec<Violation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(path: FieldPath, kind: ViolationKind) -> Violation {
        Violation::new(path, kind, "x")
    }

    #[test]
    fn valid_iff_empty() {
        assert!(ValidationResult::valid().is_valid());
        let result = ValidationResult::from_violations(vec![at(
            FieldPath::root().key("a"),
            ViolationKind::MissingRequiredField,
        )]);
        assert!(!result.is_valid());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn grouping_keeps_visit_order() {
        let result = ValidationResult::from_violations(vec![
            at(FieldPath::root().key("a"), ViolationKind::TypeMismatch),
            at(
                FieldPath::root().key("b").key("x"),
                ViolationKind::MissingRequiredField,
            ),
            at(FieldPath::root().key("c"), ViolationKind::OutOfRange),
            at(
                FieldPath::root().key("b").key("y").key("z"),
                ViolationKind::FormatMismatch,
            ),
        ]);

        let grouped = result.grouped();
        let kinds: Vec<_> = grouped.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::TypeMismatch,
                ViolationKind::NestedSchemaViolation,
                ViolationKind::OutOfRange,
            ]
        );

        let b = &grouped[1];
        assert_eq!(b.path, FieldPath::root().key("b"));
        assert_eq!(b.nested.len(), 2);
        assert_eq!(b.nested[0].kind, ViolationKind::MissingRequiredField);
        assert_eq!(b.nested[1].kind, ViolationKind::NestedSchemaViolation);
        assert_eq!(b.nested[1].nested[0].path.to_string(), "b.y.z");
    }

    #[test]
    fn sequence_items_are_not_folded() {
        let result = ValidationResult::from_violations(vec![
            at(FieldPath::root().key("tags").index(1), ViolationKind::TypeMismatch),
            at(
                FieldPath::root().key("items").index(0).key("qty"),
                ViolationKind::OutOfRange,
            ),
            at(
                FieldPath::root().key("home").key("rooms").index(2),
                ViolationKind::TypeMismatch,
            ),
        ]);

        let grouped = result.grouped();
        let paths: Vec<_> = grouped.iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, vec!["tags[1]", "items[0].qty", "home"]);
        assert_eq!(grouped[2].kind, ViolationKind::NestedSchemaViolation);
        assert_eq!(grouped[2].nested[0].path.to_string(), "home.rooms[2]");
        assert_eq!(grouped[2].nested[0].kind, ViolationKind::TypeMismatch);
    }

    #[test]
    fn display_lists_violations() {
        let result = ValidationResult::from_violations(vec![
            Violation::new(
                FieldPath::root().key("name"),
                ViolationKind::MissingRequiredField,
                "Field is required",
            ),
            Violation::new(FieldPath::root(), ViolationKind::NotARecord, "Expected a record"),
        ]);
        assert_eq!(
            result.to_string(),
            "2 violation(s):\n  \
             1. name: [missing_required_field] Field is required\n  \
             2. $: [not_a_record] Expected a record"
        );
        assert_eq!(ValidationResult::valid().to_string(), "valid");
    }

    #[test]
    fn into_result() {
        assert!(ValidationResult::valid().into_result().is_ok());
        let err = ValidationResult::from_violations(vec![at(
            FieldPath::root(),
            ViolationKind::NotARecord,
        )])
        .into_result()
        .unwrap_err();
        assert_eq!(err.to_string(), "validation failed with 1 violation(s)");
    }

    #[test]
    fn serializes_for_reports() {
        let mut violation = at(FieldPath::root().key("age"), ViolationKind::OutOfRange);
        violation.params.insert("max".into(), "150".into());
        let result = ValidationResult::from_violations(vec![violation]);

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "valid": false,
                "violations": [{
                    "path": ["age"],
                    "kind": "out_of_range",
                    "code": "out_of_range",
                    "message": "x",
                    "params": { "max": "150" },
                }],
            })
        );
    }
}
