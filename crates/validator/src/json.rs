//! Adapters from typed validators to JSON value constraints.
//!
//! A typed validator sees `&str`, `f64`, `&[Value]` or `&Value`. Wrapping it
//! in the matching adapter yields a [`Constraint`] that first views the JSON
//! value as that input (reporting `type_mismatch` when it cannot) and then
//! runs the validator.
//!
//! # Examples
//!
//! ```
//! use contour_validator::foundation::{Constraint, EvaluationContext, ViolationKind};
//! use contour_validator::json::on_str;
//! use contour_validator::validators::email;
//! use serde_json::json;
//!
//! let constraint = on_str("email", email());
//! let ctx = EvaluationContext::default();
//!
//! assert!(constraint.evaluate(&json!("user@example.com"), &ctx).is_valid());
//! assert!(!constraint.evaluate(&json!("nope"), &ctx).is_valid());
//! assert!(!constraint.evaluate(&json!(7), &ctx).is_valid());
//! ```

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::foundation::{Constraint, EvaluationContext, Outcome, Validate};

macro_rules! json_adapter {
    (
        $(#[$meta:meta])*
        $name:ident, $factory:ident, $input:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name<V> {
            name: Cow<'static, str>,
            inner: V,
        }

        impl<V> $name<V> {
            /// Wraps `inner` under the given constraint name.
            pub fn new(name: impl Into<Cow<'static, str>>, inner: V) -> Self {
                Self {
                    name: name.into(),
                    inner,
                }
            }

            /// The wrapped validator.
            pub fn inner(&self) -> &V {
                &self.inner
            }
        }

        impl<V: fmt::Debug> fmt::Debug for $name<V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.name)
                    .field("inner", &self.inner)
                    .finish()
            }
        }

        impl<V> Constraint for $name<V>
        where
            V: Validate<Input = $input> + fmt::Debug + Send + Sync,
        {
            fn name(&self) -> &str {
                &self.name
            }

            fn evaluate(&self, value: &Value, _ctx: &EvaluationContext<'_>) -> Outcome {
                self.inner.validate_any(value).into()
            }
        }

        #[doc = concat!("Wraps a validator in [`", stringify!($name), "`].")]
        pub fn $factory<V>(name: impl Into<Cow<'static, str>>, inner: V) -> $name<V> {
            $name::new(name, inner)
        }
    };
}

json_adapter! {
    /// Runs a string validator on JSON strings.
    OnStr, on_str, str
}

json_adapter! {
    /// Runs a numeric validator on JSON numbers.
    OnNumber, on_number, f64
}

json_adapter! {
    /// Runs a slice validator on JSON arrays.
    OnSequence, on_sequence, [Value]
}

json_adapter! {
    /// Runs a validator that inspects the raw JSON value.
    OnValue, on_value, Value
}
