//! # contour-schema
//!
//! Declare the expected shape of a nested, dynamically-typed record and
//! check arbitrary JSON values against it. Every violation is reported,
//! each with the path of the offending field.
//!
//! ## Quick Start
//!
//! ```
//! use contour_schema::{FieldDescriptor, Schema};
//! use contour_schema::validator::foundation::ViolationKind;
//! use contour_schema::validator::validators::PhoneRegion;
//! use serde_json::json;
//!
//! let address = Schema::builder()
//!     .field("city", FieldDescriptor::string())
//!     .build()?;
//!
//! let user = Schema::builder()
//!     .field("email", FieldDescriptor::email())
//!     .field("phone", FieldDescriptor::phone(PhoneRegion::Any).optional().nullable())
//!     .field("address", FieldDescriptor::record(address))
//!     .build()?;
//!
//! let result = user.validate(&json!({
//!     "email": "not an email",
//!     "address": { "city": 42 },
//! }));
//!
//! assert!(!result.is_valid());
//! let found: Vec<_> = result
//!     .violations()
//!     .iter()
//!     .map(|v| (v.path.to_string(), v.kind))
//!     .collect();
//! assert_eq!(found, vec![
//!     ("email".to_string(), ViolationKind::FormatMismatch),
//!     ("address.city".to_string(), ViolationKind::TypeMismatch),
//! ]);
//! # Ok::<(), contour_schema::SchemaError>(())
//! ```
//!
//! ## Building schemas
//!
//! - In code: [`Schema::builder`] with [`FieldDescriptor`] constructors.
//! - As data: a JSON [`SchemaDocument`], compiled with
//!   [`SchemaDocument::compile`].
//!
//! Both check names, references and primitive configuration when the schema
//! is built, returning a [`SchemaError`]. Validation itself never fails; it
//! returns a [`ValidationResult`].
//!
//! ## Open records
//!
//! Keys an input carries but a schema does not declare are ignored. Build
//! with [`SchemaBuilder::deny_unknown_fields`] (or `"unknown_fields": "deny"`)
//! to report them instead.

// ValidationError is the fundamental error type of the primitives; boxing it
// would add indirection to every check.
#![allow(clippy::result_large_err)]

mod document;
mod engine;
mod error;
mod field;
mod path;
mod result;
mod schema;

pub use contour_validator as validator;

pub use document::{FieldSpec, NumberBounds, RecordSpec, SchemaDocument, ValueSpec};
pub use engine::{is_valid, validate, validate_at, validate_with};
pub use error::SchemaError;
pub use field::{FieldDescriptor, Shape};
pub use path::{FieldPath, PathSegment};
pub use result::{ValidationFailed, ValidationResult, Violation};
pub use schema::{Schema, SchemaBuilder, UnknownFields};
