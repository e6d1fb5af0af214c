//! `agenda` CLI — compute bookable slots from opening and appointment events.
//!
//! ## Usage
//!
//! ```sh
//! # A week of availabilities starting today (events on stdin)
//! agenda availabilities < events.json
//!
//! # From a file, for a given date and number of days
//! agenda availabilities -i events.json --date 2014-08-10 --days 3
//!
//! # 45-minute slots, pretty-printed, written to a file
//! agenda availabilities -i events.json --slot-minutes 45 --pretty -o week.json
//!
//! # Check a single slot
//! agenda check -i events.json --at 2014-08-10T09:30:00Z
//!
//! # List candidate slot starts between two instants
//! agenda slots --from 2014-08-10T08:00:00Z --to 2014-08-10T10:00:00Z
//! ```
//!
//! Events are a JSON array of
//! `{"kind": "opening"|"appointment", "starts_at": RFC3339, "ends_at": RFC3339, "weekly_recurring": bool}`.
//! Logs go to stderr; set `RUST_LOG` or pass `-v` / `-vv`.

use agenda_engine::{Agenda, Event, Schedule};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Bookable slot calculator for openings and appointments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Available slots for each day of a date range
    Availabilities {
        /// Events file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// First day, YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of days to cover
        #[arg(
            long,
            env = "AGENDA_DAYS",
            default_value_t = agenda_engine::DEFAULT_DAY_SPAN,
            allow_negative_numbers = true
        )]
        days: i64,
        /// Slot length in minutes
        #[arg(long, env = "AGENDA_SLOT_MINUTES", default_value_t = 30)]
        slot_minutes: i64,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Whether the slot starting at an instant is opened, booked and available
    Check {
        /// Events file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Slot start, RFC 3339
        #[arg(long)]
        at: DateTime<Utc>,
        /// Slot length in minutes
        #[arg(long, env = "AGENDA_SLOT_MINUTES", default_value_t = 30)]
        slot_minutes: i64,
    },
    /// Candidate slot starts between two instants, inclusive
    Slots {
        /// First instant, RFC 3339
        #[arg(long)]
        from: DateTime<Utc>,
        /// Last instant, RFC 3339
        #[arg(long)]
        to: DateTime<Utc>,
        /// Slot length in minutes
        #[arg(long, env = "AGENDA_SLOT_MINUTES", default_value_t = 30)]
        slot_minutes: i64,
    },
}

#[derive(Serialize)]
struct SlotCheck {
    at: DateTime<Utc>,
    opened: bool,
    booked: bool,
    available: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Availabilities {
            input,
            output,
            date,
            days,
            slot_minutes,
            pretty,
        } => {
            let schedule = load_schedule(input.as_deref())?;
            let agenda = build_agenda(&schedule, slot_minutes)?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            info!(%date, days, slot_minutes, "computing availabilities");

            let availabilities = agenda.availabilities_from(date, Some(days));
            let json = if pretty {
                serde_json::to_string_pretty(&availabilities)?
            } else {
                serde_json::to_string(&availabilities)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check {
            input,
            at,
            slot_minutes,
        } => {
            let schedule = load_schedule(input.as_deref())?;
            let agenda = build_agenda(&schedule, slot_minutes)?;
            let check = SlotCheck {
                at,
                opened: agenda.opened(at),
                booked: agenda.booked(at),
                available: agenda.available(at),
            };
            println!("{}", serde_json::to_string(&check)?);
        }
        Commands::Slots {
            from,
            to,
            slot_minutes,
        } => {
            let schedule = Schedule::default();
            let agenda = build_agenda(&schedule, slot_minutes)?;
            let slots: Vec<String> = agenda
                .slots_between(from, to)
                .map(|slot| slot.to_rfc3339())
                .collect();
            println!("{}", serde_json::to_string(&slots)?);
        }
    }

    Ok(())
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins when set; otherwise
/// `-v` flags pick the level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .try_init();
}

fn build_agenda(schedule: &Schedule, slot_minutes: i64) -> Result<Agenda<'_>> {
    let extent = Duration::try_minutes(slot_minutes)
        .with_context(|| format!("--slot-minutes out of range: {}", slot_minutes))?;
    schedule
        .agenda_with_slot_extent(extent)
        .with_context(|| format!("Invalid --slot-minutes: {}", slot_minutes))
}

fn load_schedule(path: Option<&str>) -> Result<Schedule> {
    let raw = read_input(path)?;
    let events: Vec<Event> =
        serde_json::from_str(&raw).context("Failed to parse events JSON")?;
    debug!(count = events.len(), "events loaded");
    Ok(Schedule::from_events(&events))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
