//! Week grid rendering.
//!
//! # Geometry
//!
//! Each day column spans a 24-hour axis.
//!
//! - `top_px    = minutes_since_midnight(start) × pixels_per_minute`
//! - `height_px = max(duration × pixels_per_minute, min_event_height_px)`

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::store::EventStore;
use super::week::WeekView;
use crate::models::{Place, ScheduledEvent, TimeOfDay, MINUTES_PER_DAY};
use crate::opening_hours::OpeningHoursChecker;

/// Opening-hours notice attached to a rendered event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// Explanation shown with the event.
    pub message: String,
    /// The place's hours for that day, if known.
    pub hours: Option<String>,
}

/// One positioned event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLayout {
    pub event_id: String,
    pub place_id: String,
    pub place_name: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub top_px: f64,
    pub height_px: f64,
    /// Set when the visit falls outside opening hours; drives alternate
    /// styling and never hides the event.
    pub advisory: Option<Advisory>,
}

impl EventLayout {
    pub fn is_flagged(&self) -> bool {
        self.advisory.is_some()
    }
}

/// One displayed day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    /// Events ordered by start time. May overlap.
    pub events: Vec<EventLayout>,
}

/// A rendered week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekGrid {
    pub days: Vec<DayColumn>,
    /// Full column height in pixels.
    pub column_height_px: f64,
}

impl WeekGrid {
    /// Total number of displayed events.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}

impl WeekView {
    /// Lays out the displayed week's events.
    ///
    /// Every event is checked against its place's opening hours for its
    /// own date. Events whose place is not in `places` are left out.
    pub fn render(
        &self,
        store: &EventStore,
        places: &[Place],
        checker: &OpeningHoursChecker,
    ) -> WeekGrid {
        let by_id: HashMap<&str, &Place> = places.iter().map(|p| (p.id.as_str(), p)).collect();
        let ppm = self.config.pixels_per_minute;

        let days = self
            .days()
            .into_iter()
            .map(|date| {
                let events = store
                    .events_on(date)
                    .into_iter()
                    .filter_map(|event| match by_id.get(event.place_id.as_str()) {
                        Some(place) => Some(self.layout_event(event, place, checker)),
                        None => {
                            debug!(event = %event.id, place = %event.place_id, "skipping orphaned event");
                            None
                        }
                    })
                    .collect();
                DayColumn { date, events }
            })
            .collect();

        WeekGrid {
            days,
            column_height_px: f64::from(MINUTES_PER_DAY) * ppm,
        }
    }

    fn layout_event(
        &self,
        event: &ScheduledEvent,
        place: &Place,
        checker: &OpeningHoursChecker,
    ) -> EventLayout {
        let ppm = self.config.pixels_per_minute;
        let check = checker.check(place, event.date, event.start_time, event.duration_minutes);
        let advisory = (!check.is_open).then(|| Advisory {
            message: check.warning.unwrap_or_default(),
            hours: check.hours,
        });

        EventLayout {
            event_id: event.id.clone(),
            place_id: place.id.clone(),
            place_name: place.name.clone(),
            start_time: event.start_time,
            end_time: event.end_time(),
            top_px: f64::from(event.start_time.minutes()) * ppm,
            height_px: (f64::from(event.duration_minutes) * ppm).max(self.config.min_event_height_px),
            advisory,
        }
    }
}
