//! Itinerary (solution) model.
//!
//! A generated itinerary is an ordered list of [`DaySchedule`]s, each an
//! ordered list of timed visits. Within one generated day visits are
//! strictly time-ordered and do not overlap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Place, TimeOfDay, TimeWindow};

/// One visit inside a day.
///
/// `start_time` and `duration_minutes` are always set by the generator;
/// they are optional because schedules read back from trip storage may
/// lack them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPlace {
    /// The visited place.
    pub place: Place,
    /// Assigned start time.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// Assigned visit length (minutes).
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Travel time from the previous visit (minutes). 0 for the first.
    #[serde(default)]
    pub travel_minutes: u32,
    /// Free-text visit notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduledPlace {
    /// Creates a timed visit.
    pub fn new(place: Place, start_time: TimeOfDay, duration_minutes: u32) -> Self {
        Self {
            place,
            start_time: Some(start_time),
            duration_minutes: Some(duration_minutes),
            travel_minutes: 0,
            notes: None,
        }
    }

    /// Sets the travel time from the previous visit.
    pub fn with_travel(mut self, travel_minutes: u32) -> Self {
        self.travel_minutes = travel_minutes;
        self
    }

    /// Sets visit notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// End time, if both start and duration are known.
    pub fn end_time(&self) -> Option<TimeOfDay> {
        Some(self.start_time?.add_minutes(self.duration_minutes?))
    }

    /// Occupied window, if timed.
    pub fn window(&self) -> Option<TimeWindow> {
        Some(TimeWindow::new(self.start_time?, self.end_time()?))
    }

    /// Visit plus inbound travel (minutes).
    #[inline]
    pub fn total_minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(0).saturating_add(self.travel_minutes)
    }
}

/// One day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// 1-based day number within the trip.
    pub day_index: u32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Visits in time order.
    pub places: Vec<ScheduledPlace>,
    /// Σ(duration + travel) over all visits (minutes).
    pub total_duration_minutes: u32,
}

impl DaySchedule {
    /// Creates an empty day.
    pub fn new(day_index: u32, date: NaiveDate) -> Self {
        Self {
            day_index,
            date,
            places: Vec::new(),
            total_duration_minutes: 0,
        }
    }

    /// Appends a visit and updates the total.
    pub fn push(&mut self, entry: ScheduledPlace) {
        self.total_duration_minutes = self.total_duration_minutes.saturating_add(entry.total_minutes());
        self.places.push(entry);
    }

    /// Recomputes the total from the current entries.
    pub fn recompute_total(&mut self) {
        self.total_duration_minutes = self
            .places
            .iter()
            .map(ScheduledPlace::total_minutes)
            .fold(0, u32::saturating_add);
    }

    /// Whether the day has no visits.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Number of visits.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// End of the last timed visit.
    pub fn finish_time(&self) -> Option<TimeOfDay> {
        self.places.iter().filter_map(ScheduledPlace::end_time).max()
    }

    /// Total travel minutes within the day.
    pub fn travel_minutes(&self) -> u32 {
        self.places.iter().map(|p| p.travel_minutes).sum()
    }

    /// Ids of the visited places, in order.
    pub fn place_ids(&self) -> impl Iterator<Item = &str> {
        self.places.iter().map(|p| p.place.id.as_str())
    }

    /// Finds the visit for a place.
    pub fn entry_for_place(&self, place_id: &str) -> Option<&ScheduledPlace> {
        self.places.iter().find(|p| p.place.id == place_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hm: &str) -> TimeOfDay {
        hm.parse().unwrap()
    }

    fn sample_day() -> DaySchedule {
        let mut day = DaySchedule::new(1, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        day.push(ScheduledPlace::new(Place::new("A", "A"), t("09:00"), 120));
        day.push(ScheduledPlace::new(Place::new("B", "B"), t("11:15"), 90).with_travel(15));
        day
    }

    #[test]
    fn test_day_totals() {
        let day = sample_day();
        assert_eq!(day.len(), 2);
        assert_eq!(day.total_duration_minutes, 225);
        assert_eq!(day.travel_minutes(), 15);
        assert_eq!(day.finish_time(), Some(t("12:45")));
    }

    #[test]
    fn test_entry_window() {
        let day = sample_day();
        let b = day.entry_for_place("B").unwrap();
        assert_eq!(b.end_time(), Some(t("12:45")));
        let w = b.window().unwrap();
        assert_eq!(w.duration_minutes(), 90);
        assert!(day.entry_for_place("Z").is_none());
    }

    #[test]
    fn test_untimed_entry() {
        let mut entry = ScheduledPlace::new(Place::new("X", "X"), t("10:00"), 30);
        entry.duration_minutes = None;
        assert!(entry.end_time().is_none());
        assert!(entry.window().is_none());
        assert_eq!(entry.total_minutes(), 0);
    }

    #[test]
    fn test_recompute_total() {
        let mut day = sample_day();
        day.places[0].duration_minutes = Some(60);
        day.recompute_total();
        assert_eq!(day.total_duration_minutes, 165);
    }

    #[test]
    fn test_huge_durations_saturate() {
        let mut day = sample_day();
        day.push(ScheduledPlace::new(Place::new("C", "C"), t("13:00"), u32::MAX).with_travel(20));
        assert_eq!(day.total_duration_minutes, u32::MAX);
        assert_eq!(day.places[2].end_time().map(|e| e.minutes()), Some(u32::MAX));

        day.recompute_total();
        assert_eq!(day.total_duration_minutes, u32::MAX);
    }

    #[test]
    fn test_place_ids_order() {
        let day = sample_day();
        let ids: Vec<&str> = day.place_ids().collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
