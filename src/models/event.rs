//! Calendar event (booking) model.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::{TimeOfDay, TimeWindow};

/// A booked visit on the calendar.
///
/// `place_id` is a non-owning reference. An event whose place is no
/// longer known is orphaned: it stays in the store but is never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: String,
    pub place_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    /// Always greater than zero.
    #[serde(deserialize_with = "positive_minutes")]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduledEvent {
    /// End of the event.
    #[inline]
    pub fn end_time(&self) -> TimeOfDay {
        self.start_time.add_minutes(self.duration_minutes)
    }

    /// Occupied window on `date`.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time())
    }
}

fn positive_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    match u32::deserialize(deserializer)? {
        0 => Err(D::Error::custom("duration must be greater than zero minutes")),
        minutes => Ok(minutes),
    }
}

/// Input for creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub place_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub duration_minutes: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl EventDraft {
    /// Creates a draft.
    pub fn new(
        place_id: impl Into<String>,
        date: NaiveDate,
        start_time: TimeOfDay,
        duration_minutes: u32,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            date,
            start_time,
            duration_minutes,
            notes: None,
        }
    }

    /// Sets notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update of an existing event. `None` fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}
