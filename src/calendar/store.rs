//! Manually booked events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ItineraryError, Result};
use crate::models::{DaySchedule, EventDraft, EventUpdate, Place, ScheduledEvent};
use crate::opening_hours::{HoursCheck, OpeningHoursChecker};

/// In-memory store of calendar events.
///
/// Events may overlap freely. Opening hours are checked on creation and
/// reported back, but a closed result never blocks the booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStore {
    events: Vec<ScheduledEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books a new event and returns it with its opening-hours check.
    ///
    /// The place is looked up in `places` for the check only; an unknown
    /// place id is accepted and checks as open.
    pub fn create(
        &mut self,
        draft: EventDraft,
        places: &[Place],
        checker: &OpeningHoursChecker,
    ) -> Result<(ScheduledEvent, HoursCheck)> {
        if draft.duration_minutes == 0 {
            return Err(ItineraryError::InvalidDuration);
        }

        let check = places
            .iter()
            .find(|p| p.id == draft.place_id)
            .map_or_else(HoursCheck::open, |place| {
                checker.check(place, draft.date, draft.start_time, draft.duration_minutes)
            });
        if !check.is_open {
            debug!(
                place = %draft.place_id,
                date = %draft.date,
                warning = check.warning.as_deref().unwrap_or_default(),
                "booking outside opening hours"
            );
        }

        let event = ScheduledEvent {
            id: Uuid::new_v4().to_string(),
            place_id: draft.place_id,
            date: draft.date,
            start_time: draft.start_time,
            duration_minutes: draft.duration_minutes,
            notes: draft.notes,
        };
        self.events.push(event.clone());
        Ok((event, check))
    }

    /// Removes an event by id and returns it.
    pub fn remove(&mut self, id: &str) -> Result<ScheduledEvent> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ItineraryError::EventNotFound(id.to_string()))?;
        Ok(self.events.remove(index))
    }

    /// Applies a partial update. A zero duration is rejected and leaves
    /// the event unchanged.
    pub fn update(&mut self, id: &str, update: EventUpdate) -> Result<&ScheduledEvent> {
        if update.duration_minutes == Some(0) {
            return Err(ItineraryError::InvalidDuration);
        }
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ItineraryError::EventNotFound(id.to_string()))?;

        if let Some(date) = update.date {
            event.date = date;
        }
        if let Some(start) = update.start_time {
            event.start_time = start;
        }
        if let Some(duration) = update.duration_minutes {
            event.duration_minutes = duration;
        }
        if update.notes.is_some() {
            event.notes = update.notes;
        }
        Ok(event)
    }

    pub fn get(&self, id: &str) -> Option<&ScheduledEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on `date`, ordered by start time (booking order on ties).
    pub fn events_on(&self, date: NaiveDate) -> Vec<&ScheduledEvent> {
        let mut events: Vec<_> = self.events.iter().filter(|e| e.date == date).collect();
        events.sort_by_key(|e| e.start_time);
        events
    }

    /// Books one event per timed entry of a generated itinerary.
    ///
    /// Returns the ids of the new events. Entries without a start time or
    /// duration are skipped. No opening-hours check is run here; the
    /// week view re-checks every event it renders.
    pub fn apply_schedule(&mut self, days: &[DaySchedule]) -> Vec<String> {
        let mut ids = Vec::new();
        for day in days {
            for entry in &day.places {
                let (Some(start), Some(duration)) = (entry.start_time, entry.duration_minutes) else {
                    continue;
                };
                if duration == 0 {
                    continue;
                }
                let event = ScheduledEvent {
                    id: Uuid::new_v4().to_string(),
                    place_id: entry.place.id.clone(),
                    date: day.date,
                    start_time: start,
                    duration_minutes: duration,
                    notes: entry.notes.clone(),
                };
                ids.push(event.id.clone());
                self.events.push(event);
            }
        }
        debug!(events = ids.len(), "applied itinerary to calendar");
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
