//! Half-open time intervals at minute granularity.
//!
//! Every scheduled activity occupies `[start, start + minutes)`. Intervals
//! are derived from tasks on demand, never stored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, start + minutes)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    /// Minutes.
    pub minutes: i64,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, minutes: i64) -> Self {
        Self { start, minutes }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.minutes)
    }

    /// Zero-width intervals occupy no time at all.
    pub fn is_empty(&self) -> bool {
        self.minutes <= 0
    }

    /// True half-open overlap: `s1 < e2 && e1 > s2`.
    ///
    /// Back-to-back intervals (one ends exactly when the other starts) do not
    /// overlap, and an empty interval never overlaps anything.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.start < other.end() && self.end() > other.start
    }
}
