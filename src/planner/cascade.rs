//! Edit cascade: re-times a day after one visit is edited.
//!
//! Overwrites the edited visit's start and/or duration, then pushes every
//! later visit of the same day so that
//! `start(i+1) = end(i) + travel(i+1)`. Travel times are the ones recorded
//! at generation; they are not re-estimated. Other days and the set of
//! visits are never touched.
//!
//! The new day is computed on a copy and swapped in only once complete,
//! so a caller never observes a half-cascaded day, and a rejected edit
//! leaves the schedule exactly as it was.

use serde::{Deserialize, Serialize};

use crate::error::{ItineraryError, Result};
use crate::models::{DaySchedule, TimeOfDay};

/// A manual change to one visit of a generated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEdit {
    /// 1-based day index.
    pub day_index: u32,
    /// 0-based position of the visit within the day.
    pub entry_index: usize,
    /// New start time, if changed.
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    /// New duration (minutes), if changed.
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl EntryEdit {
    /// Creates an edit that changes nothing yet.
    pub fn new(day_index: u32, entry_index: usize) -> Self {
        Self {
            day_index,
            entry_index,
            start_time: None,
            duration_minutes: None,
        }
    }

    /// Sets the new start time.
    pub fn with_start(mut self, start: TimeOfDay) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Sets the new duration.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}

/// Returns a copy of `day` with `edit` applied and later visits re-timed.
///
/// `edit.day_index` is not consulted; the caller has already chosen the day.
/// A later visit whose predecessor has no known end keeps its own start.
pub fn cascade_day(day: &DaySchedule, edit: &EntryEdit) -> Result<DaySchedule> {
    if edit.duration_minutes == Some(0) {
        return Err(ItineraryError::InvalidDuration);
    }
    if edit.entry_index >= day.places.len() {
        return Err(ItineraryError::EntryNotFound {
            day: day.day_index,
            entry: edit.entry_index,
        });
    }

    let mut next = day.clone();
    {
        let entry = &mut next.places[edit.entry_index];
        if let Some(start) = edit.start_time {
            entry.start_time = Some(start);
        }
        if let Some(duration) = edit.duration_minutes {
            entry.duration_minutes = Some(duration);
        }
    }

    for i in edit.entry_index + 1..next.places.len() {
        if let Some(prev_end) = next.places[i - 1].end_time() {
            let entry = &mut next.places[i];
            entry.start_time = Some(prev_end.add_minutes(entry.travel_minutes));
        }
    }

    next.recompute_total();
    Ok(next)
}

impl DaySchedule {
    /// Returns this day with `edit` applied. See [`cascade_day`].
    pub fn with_edit(&self, edit: &EntryEdit) -> Result<DaySchedule> {
        cascade_day(self, edit)
    }
}

/// Applies `edit` to the matching day of `days` in place.
///
/// On error nothing is modified.
pub fn apply_edit(days: &mut [DaySchedule], edit: &EntryEdit) -> Result<()> {
    let slot = days
        .iter_mut()
        .find(|d| d.day_index == edit.day_index)
        .ok_or(ItineraryError::DayNotFound(edit.day_index))?;
    *slot = cascade_day(slot, edit)?;
    Ok(())
}
