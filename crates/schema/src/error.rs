use contour_validator::foundation::ConstraintError;

/// Error raised while building a schema.
///
/// Validation itself never fails with this type; every problem with an input
/// value is a [`Violation`](crate::Violation) in the result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// Two fields of one record share a name.
    #[error("field `{name}` is declared more than once")]
    DuplicateField { name: String },

    /// A named definition refers back to itself.
    #[error("cyclic schema reference: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// A reference names no definition.
    #[error("unknown schema reference `{name}`")]
    UnknownReference { name: String },

    /// A field option does not fit the field type.
    #[error("invalid option for field `{field}`: {reason}")]
    InvalidFieldOption { field: String, reason: String },

    /// A primitive could not be built from its configuration.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// The schema document is not valid JSON for this format.
    #[error("malformed schema document: {0}")]
    Document(String),
}

impl SchemaError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::EmptyFieldName => "SCHEMA_EMPTY_NAME",
            Self::DuplicateField { .. } => "SCHEMA_DUPLICATE_FIELD",
            Self::CyclicReference { .. } => "SCHEMA_CYCLE",
            Self::UnknownReference { .. } => "SCHEMA_UNKNOWN_REF",
            Self::InvalidFieldOption { .. } => "SCHEMA_FIELD_OPTION",
            Self::Constraint(_) => "SCHEMA_CONSTRAINT",
            Self::Document(_) => "SCHEMA_DOCUMENT",
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(error: serde_json::Error) -> Self {
        Self::Document(error.to_string())
    }
}
