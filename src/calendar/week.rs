//! Week navigation.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::config::CalendarConfig;
use crate::models::{EventDraft, TimeOfDay};

/// Number of days shown by a [`WeekView`].
pub const DAYS_PER_WEEK: usize = 7;

/// A navigable seven-day window.
///
/// The window is the week containing the pivot date, starting on the
/// configured first weekday.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_itinerary::calendar::WeekView;
/// use u_itinerary::config::CalendarConfig;
///
/// // Wednesday 2025-06-04; weeks start on Sunday by default
/// let mut view = WeekView::new(NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(), CalendarConfig::default());
/// assert_eq!(view.first_day(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
///
/// view.next_week();
/// assert_eq!(view.first_day(), NaiveDate::from_ymd_opt(2025, 6, 8).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct WeekView {
    pivot: NaiveDate,
    pub(super) config: CalendarConfig,
}

impl WeekView {
    pub fn new(pivot: NaiveDate, config: CalendarConfig) -> Self {
        Self { pivot, config }
    }

    pub fn pivot(&self) -> NaiveDate {
        self.pivot
    }

    pub fn week_start(&self) -> Weekday {
        self.config.week_start
    }

    /// First displayed date.
    pub fn first_day(&self) -> NaiveDate {
        let back = days_since(self.pivot.weekday(), self.config.week_start);
        self.pivot
            .checked_sub_days(Days::new(u64::from(back)))
            .unwrap_or(self.pivot)
    }

    /// The seven displayed dates in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day().iter_days().take(DAYS_PER_WEEK).collect()
    }

    /// Whether `date` is displayed.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let first = self.first_day();
        date >= first && (date - first).num_days() < DAYS_PER_WEEK as i64
    }

    pub fn next_week(&mut self) {
        if let Some(next) = self.pivot.checked_add_days(Days::new(7)) {
            self.pivot = next;
        }
    }

    pub fn previous_week(&mut self) {
        if let Some(prev) = self.pivot.checked_sub_days(Days::new(7)) {
            self.pivot = prev;
        }
    }

    /// Moves the pivot to `date`.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.pivot = date;
    }

    /// Resets the pivot to the caller's current date.
    pub fn today(&mut self, today: NaiveDate) {
        self.go_to(today);
    }

    /// Creation request for an empty hour cell.
    ///
    /// Returns `None` for a day offset outside the week or an hour
    /// outside `0..24`.
    pub fn slot_request(
        &self,
        day_offset: usize,
        hour: u32,
        place_id: impl Into<String>,
    ) -> Option<EventDraft> {
        if day_offset >= DAYS_PER_WEEK {
            return None;
        }
        let date = self.days().get(day_offset).copied()?;
        let start = TimeOfDay::from_hm(hour, 0)?;
        Some(EventDraft::new(
            place_id,
            date,
            start,
            self.config.default_event_minutes,
        ))
    }
}

/// Days from `start` forward to `day` (0..7).
fn days_since(day: Weekday, start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - start.num_days_from_monday()) % 7
}
