//! Declarative schema documents.
//!
//! A [`SchemaDocument`] describes a schema as plain data so it can live in a
//! JSON file next to the records it checks. [`SchemaDocument::compile`]
//! turns it into a [`Schema`], building every primitive up front so
//! configuration mistakes surface before anything is validated.
//!
//! ```
//! use contour_schema::SchemaDocument;
//! use serde_json::json;
//!
//! let schema = SchemaDocument::from_json(r#"{
//!     "definitions": {
//!         "Address": { "fields": [ { "name": "city", "type": "string" } ] }
//!     },
//!     "fields": [
//!         { "name": "email", "type": "email" },
//!         { "name": "age", "type": "integer", "min": 0, "max": 150, "required": false },
//!         { "name": "home", "type": "ref", "schema": "Address" }
//!     ]
//! }"#)?
//! .compile()?;
//!
//! assert!(schema.is_valid(&json!({
//!     "email": "ada@example.com",
//!     "home": { "city": "London" }
//! })));
//! # Ok::<(), contour_schema::SchemaError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use contour_validator::json::{on_number, on_str};
use contour_validator::validators::{
    MatchesRegex, NumberRange, PhoneRegion, SignedToken, SizeRange, TokenConfig, ValueKind,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::field::{FieldDescriptor, Shape};
use crate::schema::{Schema, UnknownFields};

const fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Top-level schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Policy for undeclared keys of the root record.
    #[serde(default)]
    pub unknown_fields: UnknownFields,

    /// Named record schemas, referenced by `ref` fields.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, RecordSpec>,

    /// Fields of the root record.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// A record level: fields plus its unknown-key policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    /// Policy for undeclared keys.
    #[serde(default)]
    pub unknown_fields: UnknownFields,

    /// Declared fields, in validation order.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name. Must be non-empty and unique within its record.
    pub name: String,

    /// Type and type-specific options.
    #[serde(flatten)]
    pub value: ValueSpec,

    /// Whether absence is a violation.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub required: bool,

    /// Whether `null` is accepted.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,

    /// Value standing in for an absent field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Numeric bounds of `integer` and `number` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_min: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_max: bool,
}

/// Field type, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueSpec {
    /// Anything.
    Any,
    /// `true` or `false`.
    Boolean,
    /// A string, optionally matching `pattern`.
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    /// A whole number.
    Integer(NumberBounds),
    /// Any number.
    Number(NumberBounds),
    /// An e-mail address.
    Email,
    /// A UUID.
    Uuid,
    /// `YYYY-MM-DD` or `YYYYMMDD`.
    Date,
    /// An RFC 3339 timestamp.
    DateTime,
    /// An IANA time zone name.
    TimeZone,
    /// A phone number, of `region` when given.
    Phone {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<String>,
    },
    /// A signed token, with optional checks on its claims.
    Token {
        token: TokenConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        claims: Option<RecordSpec>,
    },
    /// An inline nested record.
    Record(RecordSpec),
    /// A nested record defined under `definitions`.
    Ref { schema: String },
    /// A sequence of items of one type.
    Sequence {
        items: Box<ValueSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_items: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_items: Option<usize>,
    },
}

impl SchemaDocument {
    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "schema document rejected");
            SchemaError::from(e)
        })
    }

    /// Parses a document from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(error = %e, "schema document rejected");
            SchemaError::from(e)
        })
    }

    /// Builds the schema.
    ///
    /// Every definition is compiled once, even when nothing refers to it,
    /// and shared between the fields that do.
    pub fn compile(&self) -> Result<Schema, SchemaError> {
        let mut compiler = Compiler {
            definitions: &self.definitions,
            compiled: HashMap::new(),
            resolving: Vec::new(),
        };

        match self.build(&mut compiler) {
            Ok(schema) => {
                tracing::debug!(
                    fields = schema.len(),
                    definitions = self.definitions.len(),
                    "schema compiled"
                );
                Ok(schema)
            }
            Err(error) => {
                tracing::warn!(%error, "schema document rejected");
                Err(error)
            }
        }
    }

    fn build(&self, compiler: &mut Compiler<'_>) -> Result<Schema, SchemaError> {
        for name in self.definitions.keys() {
            compiler.resolve(name)?;
        }
        compiler.record(&self.fields, self.unknown_fields)
    }
}

impl TryFrom<&SchemaDocument> for Schema {
    type Error = SchemaError;

    fn try_from(document: &SchemaDocument) -> Result<Self, Self::Error> {
        document.compile()
    }
}

struct Compiler<'d> {
    definitions: &'d IndexMap<String, RecordSpec>,
    compiled: HashMap<String, Arc<Schema>>,
    // Definitions currently being compiled, outermost first.
    resolving: Vec<String>,
}

impl Compiler<'_> {
    fn resolve(&mut self, name: &str) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.compiled.get(name) {
            return Ok(Arc::clone(schema));
        }
        if let Some(start) = self.resolving.iter().position(|n| n == name) {
            let mut chain = self.resolving[start..].to_vec();
            chain.push(name.to_owned());
            return Err(SchemaError::CyclicReference { chain });
        }
        let definitions = self.definitions;
        let spec = definitions
            .get(name)
            .ok_or_else(|| SchemaError::UnknownReference {
                name: name.to_owned(),
            })?;

        self.resolving.push(name.to_owned());
        let schema = self.record(&spec.fields, spec.unknown_fields);
        self.resolving.pop();

        let schema = Arc::new(schema?);
        self.compiled.insert(name.to_owned(), Arc::clone(&schema));
        Ok(schema)
    }

    fn record(
        &mut self,
        fields: &[FieldSpec],
        policy: UnknownFields,
    ) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder().unknown_fields(policy);
        for spec in fields {
            builder = builder.field(spec.name.clone(), self.field(spec)?);
        }
        builder.build()
    }

    fn field(&mut self, spec: &FieldSpec) -> Result<FieldDescriptor, SchemaError> {
        let mut field = FieldDescriptor::new(self.shape(&spec.value, &spec.name)?);
        if !spec.required {
            field = field.optional();
        }
        if spec.nullable {
            field = field.nullable();
        }
        if let Some(default) = &spec.default {
            field = field.with_default(default.clone());
        }
        Ok(field)
    }

    fn shape(&mut self, spec: &ValueSpec, field: &str) -> Result<Shape, SchemaError> {
        let shape = match spec {
            ValueSpec::Any => Shape::any(),
            ValueSpec::Boolean => Shape::of(ValueKind::Boolean),
            ValueSpec::String { pattern } => {
                let shape = Shape::string();
                match pattern {
                    Some(pattern) => shape.with(on_str("pattern", MatchesRegex::new(pattern)?)),
                    None => shape,
                }
            }
            ValueSpec::Integer(bounds) => number_shape(ValueKind::Integer, bounds, field)?,
            ValueSpec::Number(bounds) => number_shape(ValueKind::Number, bounds, field)?,
            ValueSpec::Email => FieldDescriptor::email().into_shape(),
            ValueSpec::Uuid => FieldDescriptor::uuid().into_shape(),
            ValueSpec::Date => FieldDescriptor::date().into_shape(),
            ValueSpec::DateTime => FieldDescriptor::date_time().into_shape(),
            ValueSpec::TimeZone => FieldDescriptor::time_zone().into_shape(),
            ValueSpec::Phone { region } => {
                let region = match region {
                    Some(code) => code.parse::<PhoneRegion>()?,
                    None => PhoneRegion::Any,
                };
                FieldDescriptor::phone(region).into_shape()
            }
            ValueSpec::Token { token, claims } => {
                let mut field = FieldDescriptor::token(SignedToken::new(token)?);
                if let Some(spec) = claims {
                    field = field.claims(self.record(&spec.fields, spec.unknown_fields)?);
                }
                field.into_shape()
            }
            ValueSpec::Record(spec) => {
                Shape::record(self.record(&spec.fields, spec.unknown_fields)?)
            }
            ValueSpec::Ref { schema } => Shape::Record(self.resolve(schema)?),
            ValueSpec::Sequence {
                items,
                min_items,
                max_items,
            } => {
                let size = if min_items.is_some() || max_items.is_some() {
                    Some(SizeRange::new(*min_items, *max_items)?)
                } else {
                    None
                };
                Shape::Sequence {
                    items: Box::new(self.shape(items, field)?),
                    size,
                }
            }
        };
        Ok(shape)
    }
}

fn number_shape(kind: ValueKind, bounds: &NumberBounds, field: &str) -> Result<Shape, SchemaError> {
    let shape = Shape::of(kind);
    if bounds.exclusive_min && bounds.min.is_none() {
        return Err(SchemaError::InvalidFieldOption {
            field: field.to_owned(),
            reason: "exclusive_min requires min".into(),
        });
    }
    if bounds.exclusive_max && bounds.max.is_none() {
        return Err(SchemaError::InvalidFieldOption {
            field: field.to_owned(),
            reason: "exclusive_max requires max".into(),
        });
    }
    if bounds.min.is_none() && bounds.max.is_none() {
        return Ok(shape);
    }

    let mut range = NumberRange::from_bounds(bounds.min, bounds.max)?;
    if bounds.exclusive_min {
        range = range.exclusive_min();
    }
    if bounds.exclusive_max {
        range = range.exclusive_max();
    }
    Ok(shape.with(on_number("range", range)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contour_validator::foundation::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn compile(document: Value) -> Result<Schema, SchemaError> {
        SchemaDocument::from_value(document)?.compile()
    }

    #[test]
    fn field_defaults() {
        let document = SchemaDocument::from_value(json!({
            "fields": [ { "name": "a", "type": "string" } ]
        }))
        .unwrap();
        let field = &document.fields[0];
        assert!(field.required);
        assert!(!field.nullable);
        assert_eq!(field.default, None);
        assert_eq!(field.value, ValueSpec::String { pattern: None });
        assert_eq!(document.unknown_fields, UnknownFields::Ignore);
    }

    #[test]
    fn serializes_compactly() {
        let document = SchemaDocument {
            fields: vec![FieldSpec {
                name: "age".into(),
                value: ValueSpec::Integer(NumberBounds {
                    min: Some(0.0),
                    ..NumberBounds::default()
                }),
                required: true,
                nullable: false,
                default: None,
            }],
            ..SchemaDocument::default()
        };
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            json!({
                "unknown_fields": "ignore",
                "fields": [ { "name": "age", "type": "integer", "min": 0.0 } ]
            })
        );
    }

    #[test]
    fn definitions_are_shared() {
        let schema = compile(json!({
            "definitions": { "Point": { "fields": [ { "name": "x", "type": "number" } ] } },
            "fields": [
                { "name": "from", "type": "ref", "schema": "Point" },
                { "name": "to", "type": "ref", "schema": "Point" }
            ]
        }))
        .unwrap();

        let (Shape::Record(from), Shape::Record(to)) = (
            schema.field("from").unwrap().shape(),
            schema.field("to").unwrap().shape(),
        ) else {
            panic!("expected record shapes");
        };
        assert!(Arc::ptr_eq(from, to));
    }

    #[test]
    fn cycles_are_rejected() {
        let err = compile(json!({
            "definitions": {
                "A": { "fields": [ { "name": "b", "type": "ref", "schema": "B" } ] },
                "B": { "fields": [
                    { "name": "a", "type": "ref", "schema": "A", "required": false }
                ] }
            },
            "fields": []
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::CyclicReference {
                chain: vec!["A".into(), "B".into(), "A".into()]
            }
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let err = compile(json!({
            "definitions": {
                "Node": { "fields": [ { "name": "next", "type": "ref", "schema": "Node" } ] }
            },
            "fields": [ { "name": "head", "type": "ref", "schema": "Node" } ]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::CyclicReference { .. }));
    }

    #[test]
    fn unknown_reference() {
        let err = compile(json!({
            "fields": [ { "name": "x", "type": "ref", "schema": "Missing" } ]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownReference {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn configuration_errors() {
        let bad_regex = compile(json!({
            "fields": [ { "name": "s", "type": "string", "pattern": "(" } ]
        }));
        assert!(matches!(bad_regex, Err(SchemaError::Constraint(_))));

        let bad_region = compile(json!({
            "fields": [ { "name": "p", "type": "phone", "region": "ZZ" } ]
        }));
        assert!(matches!(bad_region, Err(SchemaError::Constraint(_))));

        let bad_bounds = compile(json!({
            "fields": [ { "name": "n", "type": "number", "exclusive_min": true } ]
        }));
        assert_eq!(bad_bounds.unwrap_err().code(), "SCHEMA_FIELD_OPTION");

        let duplicate = compile(json!({
            "fields": [
                { "name": "n", "type": "number" },
                { "name": "n", "type": "string" }
            ]
        }));
        assert_eq!(
            duplicate.unwrap_err(),
            SchemaError::DuplicateField { name: "n".into() }
        );

        let unknown_type = SchemaDocument::from_value(json!({
            "fields": [ { "name": "x", "type": "colour" } ]
        }));
        assert!(matches!(unknown_type, Err(SchemaError::Document(_))));
    }

    #[test]
    fn compiled_schema_validates() {
        let schema = compile(json!({
            "unknown_fields": "deny",
            "fields": [
                { "name": "id", "type": "uuid" },
                { "name": "score", "type": "number", "min": 0, "max": 1, "exclusive_max": true },
                {
                    "name": "tags",
                    "type": "sequence",
                    "items": { "type": "string" },
                    "max_items": 2
                },
                { "name": "note", "type": "string", "nullable": true, "required": false }
            ]
        }))
        .unwrap();

        let result = schema.validate(&json!({
            "id": "not-a-uuid",
            "score": 1,
            "tags": ["a", 2, "c"],
            "note": null,
            "extra": true
        }));
        let summary: Vec<(String, ViolationKind)> = result
            .violations()
            .iter()
            .map(|v| (v.path.to_string(), v.kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("id".into(), ViolationKind::FormatMismatch),
                ("score".into(), ViolationKind::OutOfRange),
                ("tags".into(), ViolationKind::OutOfRange),
                ("tags[1]".into(), ViolationKind::TypeMismatch),
                ("extra".into(), ViolationKind::UnknownField),
            ]
        );
    }
}
