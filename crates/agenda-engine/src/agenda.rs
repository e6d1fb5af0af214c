//! The availability engine.
//!
//! An [`Agenda`] borrows already-partitioned openings and appointments and
//! answers which fixed-size slots are bookable. A slot starting at `t`
//! occupies `[t, t + slot_extent)`; it is available when some opening fully
//! covers it and no appointment overlaps it.
//!
//! ```rust
//! use agenda_engine::{Agenda, TimeInterval};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let openings = vec![TimeInterval::new(
//!     Utc.with_ymd_and_hms(2014, 8, 10, 8, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2014, 8, 10, 10, 0, 0).unwrap(),
//! )];
//! let appointments = vec![TimeInterval::new(
//!     Utc.with_ymd_and_hms(2014, 8, 10, 8, 30, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2014, 8, 10, 9, 0, 0).unwrap(),
//! )];
//!
//! let agenda = Agenda::new(&openings, &appointments);
//! let date = NaiveDate::from_ymd_opt(2014, 8, 10).unwrap();
//! assert_eq!(agenda.available_slots_for(date), ["8:00", "9:00", "9:30"]);
//! ```

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{AgendaError, Result};
use crate::interval::TimeInterval;
use crate::slots::{self, Slots};

/// Default slot width: 30 minutes.
pub const DEFAULT_SLOT_EXTENT_SECS: i64 = 30 * 60;

/// Number of days covered by the "from today" queries.
pub const DEFAULT_DAY_SPAN: i64 = 7;

/// Bookable slot starts for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// Slot start labels, `H:MM`, 24-hour UTC, ascending.
    pub slots: Vec<String>,
}

/// Availability engine over borrowed openings and appointments.
#[derive(Debug, Clone, Copy)]
pub struct Agenda<'a> {
    openings: &'a [TimeInterval],
    appointments: &'a [TimeInterval],
    slot_extent: Duration,
}

impl Default for Agenda<'_> {
    fn default() -> Self {
        Agenda::new(&[], &[])
    }
}

impl<'a> Agenda<'a> {
    /// Build an agenda with the default 30-minute slot extent.
    pub fn new(openings: &'a [TimeInterval], appointments: &'a [TimeInterval]) -> Self {
        Self {
            openings,
            appointments,
            slot_extent: Duration::seconds(DEFAULT_SLOT_EXTENT_SECS),
        }
    }

    /// Build an agenda with a custom slot extent.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidSlotExtent` when `slot_extent` is shorter
    /// than one second; a zero step would never advance the slot generator.
    pub fn with_slot_extent(
        openings: &'a [TimeInterval],
        appointments: &'a [TimeInterval],
        slot_extent: Duration,
    ) -> Result<Self> {
        let secs = slot_extent.num_seconds();
        if secs <= 0 {
            return Err(AgendaError::InvalidSlotExtent(secs));
        }
        Ok(Self {
            openings,
            appointments,
            slot_extent: Duration::seconds(secs),
        })
    }

    pub fn openings(&self) -> &'a [TimeInterval] {
        self.openings
    }

    pub fn appointments(&self) -> &'a [TimeInterval] {
        self.appointments
    }

    pub fn slot_extent(&self) -> Duration {
        self.slot_extent
    }

    /// Candidate slot starts from `start` to `end` inclusive, one slot extent
    /// apart.
    pub fn slots_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Slots {
        slots::slots_between(start, end, self.slot_extent)
    }

    /// First opening that fully covers the slot starting at `instant`.
    pub fn opening_at(&self, instant: DateTime<Utc>) -> Option<&'a TimeInterval> {
        self.openings
            .iter()
            .find(|opening| opening.covers_slot(instant, self.slot_extent))
    }

    /// First appointment overlapping the slot starting at `instant`.
    pub fn appointment_at(&self, instant: DateTime<Utc>) -> Option<&'a TimeInterval> {
        self.appointments
            .iter()
            .find(|appointment| appointment.overlaps_slot(instant, self.slot_extent))
    }

    pub fn opened(&self, instant: DateTime<Utc>) -> bool {
        self.opening_at(instant).is_some()
    }

    pub fn booked(&self, instant: DateTime<Utc>) -> bool {
        self.appointment_at(instant).is_some()
    }

    /// `opened(instant) && !booked(instant)`.
    pub fn available(&self, instant: DateTime<Utc>) -> bool {
        self.opened(instant) && !self.booked(instant)
    }

    /// Labels of every available slot starting on `date` (UTC).
    pub fn available_slots_for(&self, date: NaiveDate) -> Vec<String> {
        let (start_of_day, end_of_day) = day_bounds(date);
        self.slots_between(start_of_day, end_of_day)
            .filter(|slot| self.available(*slot))
            .map(|slot| slot.format("%-H:%M").to_string())
            .collect()
    }

    pub fn availability_for(&self, date: NaiveDate) -> DayAvailability {
        let slots = self.available_slots_for(date);
        trace!(%date, count = slots.len(), "day availability computed");
        DayAvailability { date, slots }
    }

    /// One [`DayAvailability`] per day in `[date, date + day_span)`.
    ///
    /// A missing, zero or negative `day_span` yields an empty list. Days past
    /// `NaiveDate::MAX` are not representable and are left out, so a range
    /// running off the end of the calendar is shorter than `day_span`.
    pub fn availabilities_from(
        &self,
        date: NaiveDate,
        day_span: Option<i64>,
    ) -> Vec<DayAvailability> {
        let days = match day_span {
            Some(n) if n > 0 => n.unsigned_abs(),
            _ => return Vec::new(),
        };

        debug!(
            %date,
            days,
            openings = self.openings.len(),
            appointments = self.appointments.len(),
            slot_extent_secs = self.slot_extent.num_seconds(),
            "computing availabilities"
        );

        (0..days)
            .map_while(|offset| date.checked_add_days(Days::new(offset)))
            .map(|day| self.availability_for(day))
            .collect()
    }

    /// The week starting on `today`.
    pub fn availabilities_from_today(&self, today: NaiveDate) -> Vec<DayAvailability> {
        self.availabilities_from(today, Some(DEFAULT_DAY_SPAN))
    }

    /// The week starting on the current UTC date.
    pub fn availabilities_from_now(&self) -> Vec<DayAvailability> {
        self.availabilities_from_today(Utc::now().date_naive())
    }
}

/// First and last second of `date` in UTC.
fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start
        .checked_add_signed(Duration::seconds(86_399))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    (start, end)
}
