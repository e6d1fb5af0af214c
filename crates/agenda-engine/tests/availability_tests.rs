//! Tests for per-day and multi-day availability aggregation.

use agenda_engine::{Agenda, AgendaError, DayAvailability, TimeInterval, DEFAULT_DAY_SPAN};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 8, 10).unwrap()
}

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2014, 8, 10, h, m, 0).unwrap()
}

fn interval(start: &str, end: &str) -> TimeInterval {
    TimeInterval::new(start.parse().unwrap(), end.parse().unwrap())
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn default_agenda_is_empty_with_half_hour_slots() {
    let agenda = Agenda::default();

    assert!(agenda.openings().is_empty());
    assert!(agenda.appointments().is_empty());
    assert_eq!(agenda.slot_extent(), Duration::minutes(30));
}

#[test]
fn agenda_exposes_its_inputs() {
    let openings = vec![interval("2014-08-10T08:00:00Z", "2014-08-10T09:00:00Z")];
    let appointments = vec![interval("2014-08-10T08:30:00Z", "2014-08-10T09:00:00Z")];
    let agenda =
        Agenda::with_slot_extent(&openings, &appointments, Duration::minutes(35)).unwrap();

    assert_eq!(agenda.openings(), openings.as_slice());
    assert_eq!(agenda.appointments(), appointments.as_slice());
    assert_eq!(agenda.slot_extent(), Duration::minutes(35));
}

#[test]
fn non_positive_slot_extent_is_rejected() {
    let zero = Agenda::with_slot_extent(&[], &[], Duration::zero());
    let negative = Agenda::with_slot_extent(&[], &[], Duration::seconds(-60));
    let sub_second = Agenda::with_slot_extent(&[], &[], Duration::milliseconds(500));

    assert_eq!(zero.unwrap_err(), AgendaError::InvalidSlotExtent(0));
    assert_eq!(negative.unwrap_err(), AgendaError::InvalidSlotExtent(-60));
    assert_eq!(sub_second.unwrap_err(), AgendaError::InvalidSlotExtent(0));
}

// ── available_slots_for ─────────────────────────────────────────────────────

#[test]
fn one_hour_opening_yields_two_slots() {
    let openings = [interval("2014-08-10T08:00:00Z", "2014-08-10T09:00:00Z")];
    let agenda = Agenda::new(&openings, &[]);

    let slots = agenda.available_slots_for(date());

    assert_eq!(slots, vec!["8:00", "8:30"]);
    assert!(!slots.contains(&"9:00".to_string()));
}

#[test]
fn booked_slot_is_removed() {
    let openings = [interval("2014-08-10T08:00:00Z", "2014-08-10T10:00:00Z")];
    let appointments = [interval("2014-08-10T08:30:00Z", "2014-08-10T09:00:00Z")];
    let agenda = Agenda::new(&openings, &appointments);

    assert_eq!(
        agenda.available_slots_for(date()),
        vec!["8:00", "9:00", "9:30"]
    );
}

#[test]
fn fully_booked_day_has_no_slots() {
    let openings = [interval("2014-08-10T08:00:00Z", "2014-08-10T12:00:00Z")];
    let appointments = [interval("2014-08-10T07:00:00Z", "2014-08-10T13:00:00Z")];
    let agenda = Agenda::new(&openings, &appointments);

    assert!(agenda.available_slots_for(date()).is_empty());
}

#[test]
fn labels_have_no_leading_zero_and_reach_the_end_of_day() {
    let openings = [
        interval("2014-08-10T00:00:00Z", "2014-08-10T01:00:00Z"),
        interval("2014-08-10T23:00:00Z", "2014-08-11T00:00:00Z"),
    ];
    let agenda = Agenda::new(&openings, &[]);

    assert_eq!(
        agenda.available_slots_for(date()),
        vec!["0:00", "0:30", "23:00", "23:30"]
    );
}

#[test]
fn custom_extent_walks_the_day_from_midnight() {
    let openings = [interval("2014-08-10T08:00:00Z", "2014-08-10T10:00:00Z")];
    let agenda = Agenda::with_slot_extent(&openings, &[], Duration::minutes(45)).unwrap();

    // Candidates are 0:00, 0:45, ... 7:30, 8:15, 9:00, 9:45, ...
    assert_eq!(agenda.available_slots_for(date()), vec!["8:15", "9:00"]);
}

#[test]
fn opening_on_another_day_does_not_leak() {
    let openings = [interval("2014-08-11T08:00:00Z", "2014-08-11T09:00:00Z")];
    let agenda = Agenda::new(&openings, &[]);

    assert!(agenda.available_slots_for(date()).is_empty());
}

#[test]
fn slots_between_uses_the_agenda_extent() {
    let agenda = Agenda::with_slot_extent(&[], &[], Duration::minutes(20)).unwrap();
    let slots: Vec<_> = agenda.slots_between(at(10, 0), at(11, 0)).collect();

    assert_eq!(slots, vec![at(10, 0), at(10, 20), at(10, 40), at(11, 0)]);
}

// ── availability_for ────────────────────────────────────────────────────────

#[test]
fn availability_for_wraps_date_and_slots() {
    let openings = [interval("2014-08-10T08:00:00Z", "2014-08-10T09:00:00Z")];
    let agenda = Agenda::new(&openings, &[]);

    assert_eq!(
        agenda.availability_for(date()),
        DayAvailability {
            date: date(),
            slots: vec!["8:00".to_string(), "8:30".to_string()],
        }
    );
}

#[test]
fn day_availability_serializes_date_without_time() {
    let day = DayAvailability {
        date: date(),
        slots: vec!["8:00".to_string()],
    };

    let json = serde_json::to_string(&day).unwrap();
    assert_eq!(json, r#"{"date":"2014-08-10","slots":["8:00"]}"#);
}

// ── availabilities_from ─────────────────────────────────────────────────────

#[test]
fn seven_day_span_returns_seven_consecutive_days() {
    let agenda = Agenda::default();
    let days = agenda.availabilities_from(date(), Some(7));

    assert_eq!(days.len(), 7);
    for (offset, day) in days.iter().enumerate() {
        assert_eq!(day.date, date() + Duration::days(offset as i64));
        assert!(day.slots.is_empty());
    }
}

#[test]
fn zero_absent_or_negative_span_is_empty() {
    let agenda = Agenda::default();

    assert!(agenda.availabilities_from(date(), Some(0)).is_empty());
    assert!(agenda.availabilities_from(date(), None).is_empty());
    assert!(agenda.availabilities_from(date(), Some(-3)).is_empty());
}

#[test]
fn span_end_is_excluded() {
    let openings = [interval("2014-08-12T08:00:00Z", "2014-08-12T09:00:00Z")];
    let agenda = Agenda::new(&openings, &[]);

    let days = agenda.availabilities_from(date(), Some(2));

    assert_eq!(days.len(), 2);
    assert!(days.iter().all(|d| d.slots.is_empty()));
}

#[test]
fn weekly_opening_appears_on_each_matching_weekday() {
    // 2014-08-11 is a Monday.
    let openings = [TimeInterval::weekly(
        "2014-08-11T09:00:00Z".parse().unwrap(),
        "2014-08-11T10:00:00Z".parse().unwrap(),
    )];
    let agenda = Agenda::new(&openings, &[]);

    let days = agenda.availabilities_from(date(), Some(14));
    let open_days: Vec<_> = days.iter().filter(|d| !d.slots.is_empty()).collect();

    assert_eq!(open_days.len(), 2);
    assert_eq!(open_days[0].date, NaiveDate::from_ymd_opt(2014, 8, 11).unwrap());
    assert_eq!(open_days[1].date, NaiveDate::from_ymd_opt(2014, 8, 18).unwrap());
    for day in open_days {
        assert_eq!(day.slots, vec!["9:00", "9:30"]);
    }
}

#[test]
fn mixed_week_of_openings_and_appointments() {
    let openings = [
        interval("2014-08-10T09:30:00Z", "2014-08-10T12:30:00Z"),
        TimeInterval::weekly(
            "2014-08-04T09:30:00Z".parse().unwrap(),
            "2014-08-04T12:30:00Z".parse().unwrap(),
        ),
    ];
    let appointments = [interval("2014-08-11T10:30:00Z", "2014-08-11T11:30:00Z")];
    let agenda = Agenda::new(&openings, &appointments);

    let days = agenda.availabilities_from(date(), Some(7));

    assert_eq!(
        days[0].slots,
        vec!["9:30", "10:00", "10:30", "11:00", "11:30", "12:00"]
    );
    assert_eq!(days[1].slots, vec!["9:30", "10:00", "11:30", "12:00"]);
    assert!(days[2..].iter().all(|d| d.slots.is_empty()));
}

#[test]
fn from_today_covers_the_default_week() {
    let agenda = Agenda::default();
    let days = agenda.availabilities_from_today(date());

    assert_eq!(days.len() as i64, DEFAULT_DAY_SPAN);
    assert_eq!(days[0].date, date());
    assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2014, 8, 16).unwrap());
}

#[test]
fn from_now_starts_on_the_current_utc_date() {
    let before = Utc::now().date_naive();
    let days = Agenda::default().availabilities_from_now();
    let after = Utc::now().date_naive();

    assert_eq!(days.len(), 7);
    assert!(days[0].date == before || days[0].date == after);
}

// ── Calendar limits ─────────────────────────────────────────────────────────

#[test]
fn last_representable_day_is_computed() {
    let last = NaiveDate::MAX;
    let openings = [TimeInterval::new(
        last.and_hms_opt(8, 0, 0).unwrap().and_utc(),
        last.and_hms_opt(9, 0, 0).unwrap().and_utc(),
    )];
    let agenda = Agenda::new(&openings, &[]);

    let day = agenda.availability_for(last);

    assert_eq!(day.date, last);
    assert_eq!(day.slots, vec!["8:00", "8:30"]);
}

#[test]
fn range_running_off_the_calendar_stops_at_the_last_day() {
    let second_to_last = NaiveDate::MAX.pred_opt().unwrap();

    let days = Agenda::default().availabilities_from(second_to_last, Some(3));

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, second_to_last);
    assert_eq!(days[1].date, NaiveDate::MAX);
}

#[test]
fn huge_extent_on_the_last_day_yields_nothing() {
    let agenda = Agenda::with_slot_extent(&[], &[], Duration::MAX).unwrap();

    let days = agenda.availabilities_from(NaiveDate::MAX, Some(1));

    assert_eq!(days.len(), 1);
    assert!(days[0].slots.is_empty());
}

#[test]
fn span_wider_than_32_bits_is_not_truncated() {
    let second_to_last = NaiveDate::MAX.pred_opt().unwrap();

    let span = i64::from(u32::MAX) + 1;

    let days = Agenda::default().availabilities_from(second_to_last, Some(span));

    assert_eq!(days.len(), 2);
    assert_eq!(days[1].date, NaiveDate::MAX);
}
