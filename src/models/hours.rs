//! Opening-hours models.
//!
//! Mirrors the place-details source shape: a list of open/close periods
//! keyed by day-of-week (0 = Sunday) with compact `"HHMM"` times, plus
//! seven human-readable per-weekday lines.
//!
//! # Interval Model
//! A period resolves to a [`TimeWindow`] in minutes since midnight on its
//! opening day. Windows are closed intervals: a visit ending exactly at
//! closing time still fits.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;
use crate::error::ItineraryError;

/// A day-of-week and compact time pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTime {
    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub day: u8,
    /// Time as `"HHMM"`.
    pub time: String,
}

impl DayTime {
    /// Creates a day/time pair.
    pub fn new(day: u8, time: impl Into<String>) -> Self {
        Self {
            day,
            time: time.into(),
        }
    }

    /// Parses the compact time.
    pub fn time_of_day(&self) -> Result<TimeOfDay, ItineraryError> {
        TimeOfDay::parse_compact(&self.time)
    }
}

/// One opening interval.
///
/// A missing `close` means the place is open around the clock that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub open: DayTime,
    #[serde(default)]
    pub close: Option<DayTime>,
}

impl Period {
    /// Creates a period that opens and closes on the same day.
    pub fn same_day(day: u8, open: &str, close: &str) -> Self {
        Self {
            open: DayTime::new(day, open),
            close: Some(DayTime::new(day, close)),
        }
    }

    /// Creates a period open all day (no close time).
    pub fn all_day(day: u8) -> Self {
        Self {
            open: DayTime::new(day, "0000"),
            close: None,
        }
    }

    /// Whether the close time falls on a later day than the opening.
    pub fn crosses_midnight(&self) -> bool {
        self.close.as_ref().is_some_and(|c| c.day != self.open.day)
    }

    /// Resolves the period to a window on its opening day.
    ///
    /// The close time is taken as given even when it belongs to the next
    /// day, so an overnight period yields an empty window.
    pub fn window(&self) -> Result<TimeWindow, ItineraryError> {
        match &self.close {
            None => Ok(TimeWindow::new(TimeOfDay::MIDNIGHT, TimeOfDay::END_OF_DAY)),
            Some(close) => Ok(TimeWindow::new(
                self.open.time_of_day()?,
                close.time_of_day()?,
            )),
        }
    }
}

/// A closed interval `[start, end]` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    /// Creates a new window.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Length in minutes (zero for inverted windows).
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether `other` lies entirely inside this window.
    #[inline]
    pub fn contains_window(&self, other: &TimeWindow) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows share any time.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// How the seven weekday text lines are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayTextOrder {
    /// Index 0 = Monday (the place-details source convention).
    #[default]
    MondayFirst,
    /// Index 0 = Sunday, matching the period day numbering.
    SundayFirst,
}

impl WeekdayTextOrder {
    /// Index into `weekday_text` for the given weekday.
    pub fn index_of(&self, weekday: Weekday) -> usize {
        match self {
            Self::MondayFirst => weekday.num_days_from_monday() as usize,
            Self::SundayFirst => weekday.num_days_from_sunday() as usize,
        }
    }
}

/// Opening hours for a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default)]
    pub periods: Vec<Period>,
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

impl OpeningHours {
    /// Creates opening hours from periods.
    pub fn new(periods: Vec<Period>) -> Self {
        Self {
            periods,
            weekday_text: Vec::new(),
        }
    }

    /// Sets the per-weekday text lines.
    pub fn with_weekday_text<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.weekday_text = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Whether any structured period data is present.
    pub fn has_periods(&self) -> bool {
        !self.periods.is_empty()
    }

    /// Periods that open on `weekday`.
    pub fn periods_on(&self, weekday: Weekday) -> impl Iterator<Item = &Period> {
        let day = weekday.num_days_from_sunday() as u8;
        self.periods.iter().filter(move |p| p.open.day == day)
    }

    /// Human-readable line for `weekday`, if present and non-empty.
    pub fn text_for(&self, weekday: Weekday, order: WeekdayTextOrder) -> Option<&str> {
        self.weekday_text
            .get(order.index_of(weekday))
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}
