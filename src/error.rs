//! Error type for itinerary operations.
//!
//! Scheduling itself degrades gracefully (empty schedules, advisory
//! warnings, hidden orphans) and never returns these. They are reserved
//! for genuine caller mistakes: malformed time text, edits addressing
//! entries that do not exist, and configuration that cannot be read.

use thiserror::Error;

/// Errors raised by the itinerary engine.
#[derive(Debug, Error)]
pub enum ItineraryError {
    /// A time-of-day string could not be parsed.
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),

    /// A calendar date string could not be parsed.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// Visit durations must be strictly positive.
    #[error("duration must be greater than zero minutes")]
    InvalidDuration,

    /// No day with the given 1-based index exists in the schedule.
    #[error("day {0} not found in schedule")]
    DayNotFound(u32),

    /// No entry at the given position within a day.
    #[error("entry {entry} not found on day {day}")]
    EntryNotFound { day: u32, entry: usize },

    /// No event with the given id exists in the store.
    #[error("event {0} not found")]
    EventNotFound(String),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a configuration or input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An asynchronous generation was cancelled before completing.
    #[error("generation cancelled")]
    Cancelled,
}

/// Result alias for itinerary operations.
pub type Result<T> = std::result::Result<T, ItineraryError>;
