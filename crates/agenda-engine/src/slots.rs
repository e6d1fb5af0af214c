//! Candidate slot generation.
//!
//! Steps are taken on the UTC epoch-second scale, never on wall-clock fields,
//! so daylight-saving transitions in any local zone cannot skip or repeat a
//! slot.

use std::iter::FusedIterator;

use chrono::{DateTime, Duration, Utc};

/// Lazy sequence of slot start instants produced by [`slots_between`].
///
/// Cloning the iterator restarts the walk from wherever the clone was taken.
#[derive(Debug, Clone)]
pub struct Slots {
    cursor: i64,
    nanos: u32,
    end: DateTime<Utc>,
    step: i64,
}

/// Slot starts from `start`, every `extent`, while the instant is `<= end`.
///
/// `end` is included when it lands exactly on a step. An inverted range
/// yields nothing. Extents shorter than one second are clamped to one second;
/// [`crate::Agenda`] rejects them at construction.
pub fn slots_between(start: DateTime<Utc>, end: DateTime<Utc>, extent: Duration) -> Slots {
    Slots {
        cursor: start.timestamp(),
        nanos: start.timestamp_subsec_nanos(),
        end,
        step: extent.num_seconds().max(1),
    }
}

impl Slots {
    fn current(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.cursor, self.nanos).filter(|t| *t <= self.end)
    }
}

impl Iterator for Slots {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.current()?;
        match self.cursor.checked_add(self.step) {
            Some(next) => self.cursor = next,
            // Past the representable range: park after `end`.
            None => self.end = DateTime::<Utc>::MIN_UTC,
        }
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.current() {
            Some(slot) => {
                let span = (self.end - slot).num_seconds();
                let remaining = (span / self.step) as usize + 1;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Slots {}
