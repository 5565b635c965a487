//! Declarative schema documents, end to end.

use contour_schema::validator::foundation::ViolationKind;
use contour_schema::{Schema, SchemaDocument, SchemaError};
use pretty_assertions::assert_eq;
use serde_json::json;

const PROFILE: &str = r#"{
    "unknown_fields": "ignore",
    "definitions": {
        "Address": {
            "unknown_fields": "deny",
            "fields": [
                { "name": "street", "type": "string" },
                { "name": "zip", "type": "string", "pattern": "^[0-9]{5}$" },
                { "name": "zone", "type": "time_zone", "required": false }
            ]
        }
    },
    "fields": [
        { "name": "id", "type": "uuid" },
        { "name": "email", "type": "email" },
        { "name": "born", "type": "date" },
        { "name": "updated", "type": "date_time", "required": false },
        { "name": "age", "type": "integer", "min": 0, "max": 150 },
        { "name": "verified", "type": "boolean", "default": false },
        { "name": "home", "type": "ref", "schema": "Address" },
        {
            "name": "previous",
            "type": "sequence",
            "items": { "type": "ref", "schema": "Address" },
            "required": false
        },
        {
            "name": "meta",
            "type": "record",
            "fields": [ { "name": "source", "type": "any" } ],
            "required": false
        }
    ]
}"#;

fn profile() -> Schema {
    SchemaDocument::from_json(PROFILE).unwrap().compile().unwrap()
}

#[test]
fn valid_profile() {
    let result = profile().validate(&json!({
        "id": "eb02a39e-4fa4-422c-954b-5446fd71a5e5",
        "email": "ada@example.com",
        "born": "18151210",
        "updated": "1990-01-01T00:00:00-02:00",
        "age": 36,
        "home": { "street": "St James's Square", "zip": "12345", "zone": "Europe/London" },
        "previous": [],
        "meta": { "source": null },
        "ignored": true
    }));
    assert!(result.is_valid(), "{result}");
}

#[test]
fn invalid_profile_lists_every_problem() {
    let result = profile().validate(&json!({
        "id": "nope",
        "email": "ada@",
        "born": "1815-13-10",
        "updated": "19900101",
        "age": 36.5,
        "home": { "street": "x", "zip": "1234", "floor": 2 },
        "previous": [{ "street": "y", "zip": "00000" }, { "zip": "1" }],
        "meta": { }
    }));

    let found: Vec<(String, ViolationKind)> = result
        .violations()
        .iter()
        .map(|v| (v.path.to_string(), v.kind))
        .collect();
    assert_eq!(
        found,
        vec![
            ("id".into(), ViolationKind::FormatMismatch),
            ("email".into(), ViolationKind::FormatMismatch),
            ("born".into(), ViolationKind::FormatMismatch),
            ("updated".into(), ViolationKind::FormatMismatch),
            ("age".into(), ViolationKind::TypeMismatch),
            ("home.zip".into(), ViolationKind::FormatMismatch),
            ("home.floor".into(), ViolationKind::UnknownField),
            ("previous[1].street".into(), ViolationKind::MissingRequiredField),
            ("previous[1].zip".into(), ViolationKind::FormatMismatch),
            ("meta.source".into(), ViolationKind::MissingRequiredField),
        ]
    );
}

#[test]
fn document_round_trips_through_json() {
    let document = SchemaDocument::from_json(PROFILE).unwrap();
    let text = serde_json::to_string(&document).unwrap();
    assert_eq!(SchemaDocument::from_json(&text).unwrap(), document);
}

#[test]
fn schema_from_document_reference() {
    let document = SchemaDocument::from_json(PROFILE).unwrap();
    let schema = Schema::try_from(&document).unwrap();
    assert_eq!(schema.len(), 9);
}

#[test]
fn malformed_documents() {
    assert!(matches!(
        SchemaDocument::from_json("{ not json"),
        Err(SchemaError::Document(_))
    ));
    assert!(matches!(
        SchemaDocument::from_json(r#"{ "fields": [ { "type": "string" } ] }"#),
        Err(SchemaError::Document(_))
    ));

    let empty_name =
        SchemaDocument::from_json(r#"{ "fields": [ { "name": "", "type": "any" } ] }"#)
            .unwrap()
            .compile();
    assert_eq!(empty_name.unwrap_err(), SchemaError::EmptyFieldName);
}
