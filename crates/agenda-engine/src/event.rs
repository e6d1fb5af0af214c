//! Caller-side event records and their partition into engine inputs.
//!
//! The [`Agenda`] never looks at an event's kind. [`Schedule`] does that
//! sorting once, up front, and owns the resulting interval lists so an
//! agenda can borrow them.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::agenda::{Agenda, DayAvailability, DEFAULT_DAY_SPAN};
use crate::error::Result;
use crate::interval::TimeInterval;

/// Role of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Booking is permitted during the event.
    Opening,
    /// The event is already booked.
    Appointment,
}

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub weekly_recurring: bool,
}

impl Event {
    pub fn opening(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Opening,
            starts_at,
            ends_at,
            weekly_recurring: false,
        }
    }

    pub fn weekly_opening(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            weekly_recurring: true,
            ..Self::opening(starts_at, ends_at)
        }
    }

    pub fn appointment(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            kind: EventKind::Appointment,
            starts_at,
            ends_at,
            weekly_recurring: false,
        }
    }
}

/// Events partitioned into openings and appointments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub openings: Vec<TimeInterval>,
    pub appointments: Vec<TimeInterval>,
}

impl Schedule {
    /// Partition `events` by kind, keeping their relative order.
    ///
    /// Appointments never recur: a `weekly_recurring` flag on one is dropped.
    pub fn from_events<'e, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'e Event>,
    {
        let mut schedule = Schedule::default();
        for event in events {
            match event.kind {
                EventKind::Opening => schedule.openings.push(TimeInterval {
                    starts_at: event.starts_at,
                    ends_at: event.ends_at,
                    weekly_recurring: event.weekly_recurring,
                }),
                EventKind::Appointment => {
                    if event.weekly_recurring {
                        warn!(
                            starts_at = %event.starts_at,
                            "ignoring weekly_recurring on appointment"
                        );
                    }
                    schedule
                        .appointments
                        .push(TimeInterval::new(event.starts_at, event.ends_at));
                }
            }
        }
        debug!(
            openings = schedule.openings.len(),
            appointments = schedule.appointments.len(),
            "schedule partitioned"
        );
        schedule
    }

    pub fn agenda(&self) -> Agenda<'_> {
        Agenda::new(&self.openings, &self.appointments)
    }

    /// # Errors
    /// Returns `AgendaError::InvalidSlotExtent` for extents under one second.
    pub fn agenda_with_slot_extent(&self, slot_extent: Duration) -> Result<Agenda<'_>> {
        Agenda::with_slot_extent(&self.openings, &self.appointments, slot_extent)
    }

    /// The week of availabilities starting on `date`, with 30-minute slots.
    pub fn availabilities(&self, date: NaiveDate) -> Vec<DayAvailability> {
        self.agenda().availabilities_from(date, Some(DEFAULT_DAY_SPAN))
    }
}

impl<'e> FromIterator<&'e Event> for Schedule {
    fn from_iter<I: IntoIterator<Item = &'e Event>>(iter: I) -> Self {
        Schedule::from_events(iter)
    }
}
