//! Field descriptors: what one field of a record must look like.

use std::sync::Arc;

use contour_validator::foundation::{Constraint, EvaluationContext};
use contour_validator::json::{on_number, on_sequence, on_str, on_value};
use contour_validator::validators::{
    MatchesRegex, NumberRange, Phone, PhoneRegion, SignedToken, SizeRange, ValueKind, date_time,
    email, iso_date, kind, time_zone, uuid,
};
use serde_json::Value;

use crate::Schema;
use crate::engine::Walker;
use crate::path::FieldPath;
use crate::result::Violation;

/// How a present, non-null field value is checked.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Primitive constraints evaluated in order.
    ///
    /// When a constraint yields claims (a verified token), they are
    /// validated against `claims` like a nested record.
    Value {
        constraints: Vec<Arc<dyn Constraint>>,
        claims: Option<Arc<Schema>>,
    },
    /// A nested record.
    Record(Arc<Schema>),
    /// A sequence whose items all have the same shape.
    Sequence {
        items: Box<Shape>,
        size: Option<SizeRange>,
    },
}

impl Shape {
    /// A value shape accepting anything.
    #[must_use]
    pub fn any() -> Self {
        Self::Value {
            constraints: Vec::new(),
            claims: None,
        }
    }

    /// A value shape with a single category check.
    #[must_use]
    pub fn of(expected: ValueKind) -> Self {
        Self::any().with(on_value(expected.as_str(), kind(expected)))
    }

    /// A string shape.
    #[must_use]
    pub fn string() -> Self {
        Self::of(ValueKind::String)
    }

    /// A record shape.
    #[must_use]
    pub fn record(schema: impl Into<Arc<Schema>>) -> Self {
        Self::Record(schema.into())
    }

    /// Appends a constraint. Sequences pass it on to their items.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(self, constraint: impl Constraint + 'static) -> Self {
        self.with_arc(Arc::new(constraint))
    }

    fn with_arc(self, constraint: Arc<dyn Constraint>) -> Self {
        match self {
            Self::Value {
                mut constraints,
                claims,
            } => {
                constraints.push(constraint);
                Self::Value {
                    constraints,
                    claims,
                }
            }
            Self::Sequence { items, size } => Self::Sequence {
                items: Box::new(items.with_arc(constraint)),
                size,
            },
            Self::Record(schema) => {
                tracing::warn!(
                    constraint = constraint.name(),
                    "constraint attached to a record shape is ignored"
                );
                Self::Record(schema)
            }
        }
    }
}

/// Shape, optionality and default of one field.
///
/// # Examples
///
/// ```
/// use contour_schema::{FieldDescriptor, Schema};
/// use contour_schema::validator::validators::NumberRange;
/// use serde_json::json;
///
/// let schema = Schema::builder()
///     .field("name", FieldDescriptor::string())
///     .field(
///         "age",
///         FieldDescriptor::integer()
///             .range(NumberRange::between(0.0, 150.0)?)
///             .optional(),
///     )
///     .build()?;
///
/// assert!(schema.is_valid(&json!({ "name": "Ada" })));
/// assert!(!schema.is_valid(&json!({ "name": "Ada", "age": 200 })));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    shape: Shape,
    required: bool,
    nullable: bool,
    default: Option<Value>,
}

impl FieldDescriptor {
    /// A required, non-nullable field of the given shape.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            required: true,
            nullable: false,
            default: None,
        }
    }

    /// Any value, including null.
    #[must_use]
    pub fn any() -> Self {
        Self::new(Shape::any())
    }

    /// A value of the given category.
    #[must_use]
    pub fn of(expected: ValueKind) -> Self {
        Self::new(Shape::of(expected))
    }

    /// `true` or `false`.
    #[must_use]
    pub fn boolean() -> Self {
        Self::of(ValueKind::Boolean)
    }

    /// A string.
    #[must_use]
    pub fn string() -> Self {
        Self::of(ValueKind::String)
    }

    /// A whole number.
    #[must_use]
    pub fn integer() -> Self {
        Self::of(ValueKind::Integer)
    }

    /// Any number.
    #[must_use]
    pub fn number() -> Self {
        Self::of(ValueKind::Number)
    }

    /// An e-mail address.
    #[must_use]
    pub fn email() -> Self {
        Self::string().constraint(on_str("email", email()))
    }

    /// A UUID.
    #[must_use]
    pub fn uuid() -> Self {
        Self::string().constraint(on_str("uuid", uuid()))
    }

    /// A calendar date.
    #[must_use]
    pub fn date() -> Self {
        Self::string().constraint(on_str("date", iso_date()))
    }

    /// An RFC 3339 timestamp.
    #[must_use]
    pub fn date_time() -> Self {
        Self::string().constraint(on_str("date_time", date_time()))
    }

    /// An IANA time zone name.
    #[must_use]
    pub fn time_zone() -> Self {
        Self::string().constraint(on_str("time_zone", time_zone()))
    }

    /// A phone number of `region`.
    #[must_use]
    pub fn phone(region: PhoneRegion) -> Self {
        Self::string().constraint(on_str("phone", Phone::new(region)))
    }

    /// A signed token. Attach a claims schema with [`Self::claims`].
    #[must_use]
    pub fn token(verifier: SignedToken) -> Self {
        Self::new(Shape::any().with(verifier))
    }

    /// A nested record.
    #[must_use]
    pub fn record(schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(Shape::record(schema))
    }

    /// A sequence of items of `items` shape.
    #[must_use]
    pub fn sequence(items: Shape) -> Self {
        Self::new(Shape::Sequence {
            items: Box::new(items),
            size: None,
        })
    }

    // ── builders ─────────────────────────────────────────────────────────

    /// Absence is valid.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// An explicit `null` is valid and skips the shape.
    #[must_use = "builder methods must be chained or built"]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Absence is valid because `default` stands in for the value.
    ///
    /// The default is never checked against the shape nor written into the
    /// input.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Appends a primitive constraint. On sequences it applies to each item.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.shape = self.shape.with(constraint);
        self
    }

    /// Appends an already shared constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn shared_constraint(mut self, constraint: Arc<dyn Constraint>) -> Self {
        self.shape = self.shape.with_arc(constraint);
        self
    }

    /// Appends a numeric range check.
    #[must_use = "builder methods must be chained or built"]
    pub fn range(self, range: NumberRange) -> Self {
        self.constraint(on_number("range", range))
    }

    /// Appends a regular-expression check.
    #[must_use = "builder methods must be chained or built"]
    pub fn pattern(self, pattern: MatchesRegex) -> Self {
        self.constraint(on_str("pattern", pattern))
    }

    /// Bounds the item count of a sequence field. Other shapes get a
    /// whole-value size check.
    #[must_use = "builder methods must be chained or built"]
    pub fn size(mut self, bounds: SizeRange) -> Self {
        if let Shape::Sequence { size, .. } = &mut self.shape {
            *size = Some(bounds);
            return self;
        }
        self.constraint(on_sequence("size", bounds))
    }

    /// Validates decoded claims of a token field against `schema`.
    #[must_use = "builder methods must be chained or built"]
    pub fn claims(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        match &mut self.shape {
            Shape::Value { claims, .. } => *claims = Some(schema.into()),
            Shape::Sequence { items, .. } => {
                if let Shape::Value { claims, .. } = items.as_mut() {
                    *claims = Some(schema.into());
                }
            }
            Shape::Record(_) => {}
        }
        self
    }

    // ── accessors ────────────────────────────────────────────────────────

    /// How present values are checked.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Consumes the descriptor, keeping only its shape.
    #[must_use]
    pub fn into_shape(self) -> Shape {
        self.shape
    }

    /// Whether absence is a violation (unless a default exists).
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether `null` is accepted.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The declared default.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether an absent value is a violation.
    #[must_use]
    pub fn absence_is_violation(&self) -> bool {
        self.required && self.default.is_none()
    }

    /// Checks a possibly absent value on its own.
    ///
    /// Paths in the returned violations are relative to the field.
    pub fn check(&self, value: Option<&Value>, ctx: &EvaluationContext<'_>) -> Vec<Violation> {
        let mut walker = Walker::new(ctx, FieldPath::root());
        walker.field(self, value);
        walker.finish()
    }
}
