//! The prelude exposes everything needed to build and run constraints.

use contour_validator::prelude::*;
use serde_json::json;

#[test]
fn prelude_covers_common_usage() {
    let constraints: Vec<Box<dyn Constraint>> = vec![
        Box::new(on_value("kind", kind(ValueKind::String))),
        Box::new(on_str("date", iso_date())),
    ];

    let ctx = EvaluationContext::default();
    for constraint in &constraints {
        assert!(constraint.evaluate(&json!("2024-02-29"), &ctx).is_valid());
    }
}

#[test]
fn prelude_errors_are_usable() {
    let err: ValidationError = uuid().validate("nope").unwrap_err();
    assert_eq!(err.kind, ViolationKind::FormatMismatch);

    let bad: ConstraintError = matches_regex("[").unwrap_err();
    assert!(bad.to_string().starts_with("invalid pattern"));
}
