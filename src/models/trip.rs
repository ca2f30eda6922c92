//! Trip model, as delivered by the trip-storage collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Place;

/// A trip: a date range and the places the traveller wants to see.
///
/// Dates are inclusive and optional; a trip without both dates cannot
/// be scheduled and yields an empty itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub places: Vec<Place>,
}

/// Identifying metadata used in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripMeta {
    pub id: String,
    pub name: String,
}

impl TripMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Trip {
    /// Creates an undated trip with no places.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: None,
            end_date: None,
            places: Vec::new(),
        }
    }

    /// Sets the inclusive date range.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Adds a place.
    pub fn with_place(mut self, place: Place) -> Self {
        self.places.push(place);
        self
    }

    /// Number of days in the inclusive range.
    ///
    /// `None` when a date is missing or the range is inverted.
    pub fn total_days(&self) -> Option<u32> {
        inclusive_days(self.start_date?, self.end_date?)
    }

    /// Looks up a place by id.
    pub fn place(&self, place_id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == place_id)
    }

    /// Export metadata.
    pub fn meta(&self) -> TripMeta {
        TripMeta::new(&self.id, &self.name)
    }
}

/// Inclusive day count between two dates, `None` if `end < start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Option<u32> {
    let days = (end - start).num_days();
    if days < 0 {
        return None;
    }
    u32::try_from(days + 1).ok()
}
