//! Record schemas and their builder.

use contour_validator::foundation::{Clock, EvaluationContext};
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::field::FieldDescriptor;
use crate::result::ValidationResult;

/// What happens to input keys a schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Extra keys are allowed and never inspected.
    #[default]
    Ignore,
    /// Every extra key is an `unknown_field` violation.
    Deny,
}

/// The expected fields of one record level.
///
/// Immutable once built. Share it behind an `Arc` to reuse it across
/// threads and as a nested schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldDescriptor>,
    unknown_fields: UnknownFields,
}

impl Schema {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// A schema without fields. Accepts any record.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Whether `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Policy for undeclared keys.
    #[must_use]
    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown_fields
    }

    /// Validates `value` against this schema using the system clock.
    #[must_use]
    pub fn validate(&self, value: &Value) -> ValidationResult {
        crate::engine::validate(self, value)
    }

    /// Validates `value` with time-dependent checks reading `clock`.
    #[must_use]
    pub fn validate_at(&self, value: &Value, clock: &dyn Clock) -> ValidationResult {
        crate::engine::validate_at(self, value, clock)
    }

    /// Validates `value` within an existing evaluation context.
    #[must_use]
    pub fn validate_with(&self, value: &Value, ctx: &EvaluationContext<'_>) -> ValidationResult {
        crate::engine::validate_with(self, value, ctx)
    }

    /// Whether `value` has no violations.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        crate::engine::is_valid(self, value)
    }
}

/// Builds a [`Schema`], checking field names.
///
/// ```
/// use contour_schema::{FieldDescriptor, Schema, SchemaError};
///
/// let err = Schema::builder()
///     .field("id", FieldDescriptor::uuid())
///     .field("id", FieldDescriptor::string())
///     .build()
///     .unwrap_err();
/// assert_eq!(err, SchemaError::DuplicateField { name: "id".into() });
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<(String, FieldDescriptor)>,
    unknown_fields: UnknownFields,
}

impl SchemaBuilder {
    /// Declares a field. Order of declaration is the order of validation.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, field: FieldDescriptor) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    /// Sets the policy for undeclared keys.
    #[must_use = "builder methods must be chained or built"]
    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Shorthand for [`UnknownFields::Deny`].
    #[must_use = "builder methods must be chained or built"]
    pub fn deny_unknown_fields(self) -> Self {
        self.unknown_fields(UnknownFields::Deny)
    }

    /// Finishes the schema.
    ///
    /// Fails on an empty or repeated field name.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for (name, field) in self.fields {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            match fields.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(SchemaError::DuplicateField {
                        name: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(field);
                }
            }
        }

        Ok(Schema {
            fields,
            unknown_fields: self.unknown_fields,
        })
    }
}
