//! Error types for agenda-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    /// The slot extent must be at least one whole second. Carries the
    /// rejected extent in seconds.
    #[error("Invalid slot extent: {0}s (must be a positive number of seconds)")]
    InvalidSlotExtent(i64),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
