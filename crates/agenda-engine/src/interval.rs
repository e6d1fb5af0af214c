//! Time intervals used as openings and appointments.
//!
//! The same record plays both roles; the caller decides which collection an
//! interval belongs to. Containment (openings) is inclusive at both ends,
//! overlap (appointments) is half-open, so a slot that merely touches an
//! appointment edge is not in conflict with it.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A span of time, optionally repeating every week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Only meaningful for openings. When set, the calendar date is ignored
    /// and the interval applies on the weekday of `starts_at`, every week.
    #[serde(default)]
    pub weekly_recurring: bool,
}

impl TimeInterval {
    /// A one-off interval.
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            starts_at,
            ends_at,
            weekly_recurring: false,
        }
    }

    /// An interval repeating every week on the weekday and time-of-day of
    /// `starts_at`.
    pub fn weekly(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            starts_at,
            ends_at,
            weekly_recurring: true,
        }
    }

    /// `true` when `starts_at < ends_at`. Malformed intervals never match.
    pub fn is_well_formed(&self) -> bool {
        self.starts_at < self.ends_at
    }

    /// Weekday the interval recurs on (UTC).
    pub fn weekday(&self) -> Weekday {
        self.starts_at.weekday()
    }

    /// Time-of-day range `(start, end)` measured from UTC midnight.
    ///
    /// Returns `None` for malformed intervals and for ranges running past
    /// midnight, which weekly recurrence does not support. A range ending
    /// exactly at midnight is accepted.
    pub fn time_of_day_range(&self) -> Option<(Duration, Duration)> {
        if !self.is_well_formed() {
            return None;
        }
        let start = time_of_day(self.starts_at);
        let end = start + (self.ends_at - self.starts_at);
        (end <= Duration::days(1)).then_some((start, end))
    }

    /// Whether the slot `[slot_start, slot_start + extent)` lies entirely
    /// within this interval, both bounds inclusive.
    ///
    /// Weekly intervals compare weekday and time-of-day only.
    pub fn covers_slot(&self, slot_start: DateTime<Utc>, extent: Duration) -> bool {
        if !self.is_well_formed() {
            return false;
        }

        if self.weekly_recurring {
            if self.weekday() != slot_start.weekday() {
                return false;
            }
            let Some((open, close)) = self.time_of_day_range() else {
                return false;
            };
            let slot_open = time_of_day(slot_start);
            return match slot_open.checked_add(&extent) {
                Some(slot_close) => open <= slot_open && slot_close <= close,
                None => false,
            };
        }

        // A slot ending past the last representable instant fits in no interval.
        match slot_start.checked_add_signed(extent) {
            Some(slot_end) => self.starts_at <= slot_start && slot_end <= self.ends_at,
            None => false,
        }
    }

    /// Whether the slot `[slot_start, slot_start + extent)` overlaps this
    /// interval. Touching edges do not overlap.
    pub fn overlaps_slot(&self, slot_start: DateTime<Utc>, extent: Duration) -> bool {
        // Same test as pairwise conflict detection: a.start < b.end && b.start < a.end.
        // A slot end past the representable range saturates at the maximum instant.
        let slot_end = slot_start
            .checked_add_signed(extent)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.is_well_formed() && slot_start < self.ends_at && self.starts_at < slot_end
    }
}

/// Elapsed time since UTC midnight of the instant's own day.
fn time_of_day(instant: DateTime<Utc>) -> Duration {
    instant.time() - NaiveTime::MIN
}
