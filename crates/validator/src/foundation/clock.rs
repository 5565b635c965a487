//! Evaluation-time clock
//!
//! Time-dependent checks (token `exp` / `nbf`) read the clock when they are
//! evaluated. Never cache a timestamp inside a constraint.

use std::fmt;

use chrono::{DateTime, Utc};

/// Source of the current time for a validation pass.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock. Reads [`Utc::now`] on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for reproducible runs.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use contour_validator::foundation::{Clock, FixedClock};
///
/// let instant = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(FixedClock::new(instant).now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Freezes the clock at `instant`.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Freezes the clock at a Unix timestamp in seconds.
    ///
    /// Returns `None` for timestamps outside chrono's range.
    #[must_use]
    pub fn at_timestamp(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
