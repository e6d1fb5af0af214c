//! # agenda-engine
//!
//! Computes which fixed-size time slots are bookable over a range of days,
//! given the intervals when booking is allowed (openings, optionally weekly
//! recurring) and the intervals already booked (appointments).
//!
//! All computation is synchronous and side-effect free. An [`Agenda`] only
//! borrows its inputs, so it can be shared freely between threads.
//!
//! ## Modules
//!
//! - [`agenda`] — predicates (`opened`, `booked`, `available`) and day/range aggregation
//! - [`slots`] — candidate slot generation on the epoch-second scale
//! - [`interval`] — opening containment and appointment overlap per interval
//! - [`event`] — caller-side event records and their partition by kind
//! - [`error`] — Error types

pub mod agenda;
pub mod error;
pub mod event;
pub mod interval;
pub mod slots;

pub use agenda::{Agenda, DayAvailability, DEFAULT_DAY_SPAN, DEFAULT_SLOT_EXTENT_SECS};
pub use error::AgendaError;
pub use event::{Event, EventKind, Schedule};
pub use interval::TimeInterval;
pub use slots::{slots_between, Slots};
