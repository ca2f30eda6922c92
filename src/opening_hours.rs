//! Opening-hours checking.
//!
//! Decides whether a visit window `[start, start + duration]` on a given
//! date falls inside a place's opening hours. Results are advisory: the
//! calendar and planner surface them as warnings and never refuse a
//! booking because of them.
//!
//! # Rules
//!
//! 1. No period data → open (absence of data is not evidence of closure).
//! 2. No period opening on the date's weekday → closed on that day.
//! 3. Open iff the visit lies inside a single period's window. A period
//!    without a close time spans the whole day.
//!
//! Periods closing on the following day are not turned into wraparound
//! windows; see [`Period::window`](crate::models::Period::window).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::HoursConfig;
use crate::models::{Place, TimeOfDay, TimeWindow, WeekdayTextOrder};

/// Warning used when a place has no opening period on the requested day.
pub const CLOSED_ON_DAY: &str = "Closed on this day";

/// Warning used when the visit falls outside every opening period.
pub const OUTSIDE_HOURS: &str = "Outside opening hours";

/// Outcome of an opening-hours check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursCheck {
    /// Whether the visit fits inside the opening hours.
    pub is_open: bool,
    /// Explanation when `is_open` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// The place's human-readable hours for that day, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

impl HoursCheck {
    /// An open result with nothing to report.
    pub fn open() -> Self {
        Self {
            is_open: true,
            warning: None,
            hours: None,
        }
    }

    fn closed(warning: impl Into<String>, hours: Option<&str>) -> Self {
        Self {
            is_open: false,
            warning: Some(warning.into()),
            hours: hours.map(str::to_string),
        }
    }
}

/// Checks visits against place opening hours.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_itinerary::models::{OpeningHours, Period, Place};
/// use u_itinerary::opening_hours::OpeningHoursChecker;
///
/// let museum = Place::new("m1", "Museum")
///     .with_opening_hours(OpeningHours::new(vec![Period::same_day(1, "0900", "1700")]));
/// let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let checker = OpeningHoursChecker::default();
///
/// assert!(checker.check(&museum, monday, "10:00".parse().unwrap(), 60).is_open);
/// assert!(!checker.check(&museum, monday, "16:30".parse().unwrap(), 60).is_open);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OpeningHoursChecker {
    text_order: WeekdayTextOrder,
}

impl OpeningHoursChecker {
    /// Creates a checker reading weekday text in the given order.
    pub fn new(text_order: WeekdayTextOrder) -> Self {
        Self { text_order }
    }

    /// Creates a checker from configuration.
    pub fn from_config(config: &HoursConfig) -> Self {
        Self::new(config.weekday_text_order)
    }

    /// Checks a visit of `duration_minutes` starting at `start` on `date`.
    pub fn check(
        &self,
        place: &Place,
        date: NaiveDate,
        start: TimeOfDay,
        duration_minutes: u32,
    ) -> HoursCheck {
        let Some(hours) = place.opening_hours.as_ref().filter(|h| h.has_periods()) else {
            return HoursCheck::open();
        };

        let weekday = date.weekday();
        let day_text = hours.text_for(weekday, self.text_order);

        let mut periods = hours.periods_on(weekday).peekable();
        if periods.peek().is_none() {
            return HoursCheck::closed(day_text.unwrap_or(CLOSED_ON_DAY), day_text);
        }

        let visit = TimeWindow::new(start, start.add_minutes(duration_minutes));
        // Periods with unparseable times cannot admit a visit.
        let fits = periods
            .filter_map(|p| p.window().ok())
            .any(|w| w.contains_window(&visit));

        if fits {
            HoursCheck {
                is_open: true,
                warning: None,
                hours: day_text.map(str::to_string),
            }
        } else {
            HoursCheck::closed(OUTSIDE_HOURS, day_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayTime, OpeningHours, Period};

    fn t(hm: &str) -> TimeOfDay {
        hm.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-06-02 is a Monday, 2025-06-01 a Sunday.
    const MONDAY: (i32, u32, u32) = (2025, 6, 2);
    const SUNDAY: (i32, u32, u32) = (2025, 6, 1);

    fn weekday_text() -> Vec<&'static str> {
        vec![
            "Monday: 9:00 AM – 5:00 PM",
            "Tuesday: 9:00 AM – 5:00 PM",
            "Wednesday: 9:00 AM – 5:00 PM",
            "Thursday: 9:00 AM – 5:00 PM",
            "Friday: 9:00 AM – 5:00 PM",
            "Saturday: 9:00 AM – 5:00 PM",
            "Sunday: Closed",
        ]
    }

    fn office_hours_place() -> Place {
        let periods = (1..=6).map(|d| Period::same_day(d, "0900", "1700")).collect();
        Place::new("p1", "Gallery")
            .with_opening_hours(OpeningHours::new(periods).with_weekday_text(weekday_text()))
    }

    fn monday() -> NaiveDate {
        date(MONDAY.0, MONDAY.1, MONDAY.2)
    }

    fn sunday() -> NaiveDate {
        date(SUNDAY.0, SUNDAY.1, SUNDAY.2)
    }

    #[test]
    fn test_no_data_is_open() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "Unknown");
        assert_eq!(checker.check(&place, monday(), t("03:00"), 60), HoursCheck::open());

        // Empty periods list counts as no data
        let empty = Place::new("p", "Empty").with_opening_hours(OpeningHours::default());
        assert!(checker.check(&empty, monday(), t("03:00"), 60).is_open);
    }

    #[test]
    fn test_monday_inside_and_outside() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "Shop")
            .with_opening_hours(OpeningHours::new(vec![Period::same_day(1, "0900", "1700")]));

        let inside = checker.check(&place, monday(), t("10:00"), 60);
        assert!(inside.is_open);
        assert!(inside.warning.is_none());

        let overrun = checker.check(&place, monday(), t("16:30"), 60);
        assert!(!overrun.is_open);
        assert_eq!(overrun.warning.as_deref(), Some(OUTSIDE_HOURS));
        assert!(overrun.hours.is_none());
    }

    #[test]
    fn test_visit_ending_at_close_fits() {
        let checker = OpeningHoursChecker::default();
        let r = checker.check(&office_hours_place(), monday(), t("16:00"), 60);
        assert!(r.is_open);
        assert_eq!(r.hours.as_deref(), Some("Monday: 9:00 AM – 5:00 PM"));
    }

    #[test]
    fn test_closed_day_uses_weekday_text() {
        let checker = OpeningHoursChecker::default();
        let r = checker.check(&office_hours_place(), sunday(), t("10:00"), 60);
        assert!(!r.is_open);
        assert_eq!(r.warning.as_deref(), Some("Sunday: Closed"));
        assert_eq!(r.hours.as_deref(), Some("Sunday: Closed"));
    }

    #[test]
    fn test_closed_day_generic_message() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "Shop")
            .with_opening_hours(OpeningHours::new(vec![Period::same_day(1, "0900", "1700")]));
        let r = checker.check(&place, sunday(), t("10:00"), 60);
        assert!(!r.is_open);
        assert_eq!(r.warning.as_deref(), Some(CLOSED_ON_DAY));
        assert!(r.hours.is_none());
    }

    #[test]
    fn test_outside_hours_keeps_day_text() {
        let checker = OpeningHoursChecker::default();
        let r = checker.check(&office_hours_place(), monday(), t("07:00"), 30);
        assert!(!r.is_open);
        assert_eq!(r.warning.as_deref(), Some(OUTSIDE_HOURS));
        assert_eq!(r.hours.as_deref(), Some("Monday: 9:00 AM – 5:00 PM"));
    }

    #[test]
    fn test_split_periods_require_single_window() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "Bistro").with_opening_hours(OpeningHours::new(vec![
            Period::same_day(1, "1200", "1430"),
            Period::same_day(1, "1900", "2300"),
        ]));
        assert!(checker.check(&place, monday(), t("12:30"), 90).is_open);
        assert!(checker.check(&place, monday(), t("19:30"), 120).is_open);
        // Spans the afternoon gap
        assert!(!checker.check(&place, monday(), t("14:00"), 360).is_open);
    }

    #[test]
    fn test_missing_close_is_all_day() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "Plaza")
            .with_opening_hours(OpeningHours::new(vec![Period::all_day(1)]));
        assert!(checker.check(&place, monday(), t("00:00"), 60).is_open);
        assert!(checker.check(&place, monday(), t("22:00"), 120).is_open);
        assert!(!checker.check(&place, monday(), t("23:00"), 120).is_open);
    }

    #[test]
    fn test_overnight_period_not_wrapped() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "Club").with_opening_hours(OpeningHours::new(vec![Period {
            open: DayTime::new(1, "2000"),
            close: Some(DayTime::new(2, "0300")),
        }]));
        let r = checker.check(&place, monday(), t("21:00"), 60);
        assert!(!r.is_open);
        assert_eq!(r.warning.as_deref(), Some(OUTSIDE_HOURS));
    }

    #[test]
    fn test_sunday_first_text_order() {
        let checker = OpeningHoursChecker::new(WeekdayTextOrder::SundayFirst);
        let hours = OpeningHours::new(vec![Period::same_day(1, "0900", "1700")]).with_weekday_text([
            "Sunday: Closed",
            "Monday: 9-5",
            "Tuesday: Closed",
            "Wednesday: Closed",
            "Thursday: Closed",
            "Friday: Closed",
            "Saturday: Closed",
        ]);
        let place = Place::new("p", "x").with_opening_hours(hours);
        let r = checker.check(&place, monday(), t("10:00"), 30);
        assert_eq!(r.hours.as_deref(), Some("Monday: 9-5"));
        let closed = checker.check(&place, sunday(), t("10:00"), 30);
        assert_eq!(closed.warning.as_deref(), Some("Sunday: Closed"));
    }

    #[test]
    fn test_malformed_period_ignored() {
        let checker = OpeningHoursChecker::default();
        let place = Place::new("p", "x").with_opening_hours(OpeningHours::new(vec![
            Period::same_day(1, "9am", "5pm"),
        ]));
        let r = checker.check(&place, monday(), t("10:00"), 30);
        assert!(!r.is_open);
        assert_eq!(r.warning.as_deref(), Some(OUTSIDE_HOURS));
    }

    #[test]
    fn test_huge_duration_is_outside_hours() {
        let checker = OpeningHoursChecker::default();
        let r = checker.check(&office_hours_place(), monday(), t("10:00"), u32::MAX);
        assert!(!r.is_open);
        assert_eq!(r.warning.as_deref(), Some(OUTSIDE_HOURS));

        let all_day = Place::new("p", "x")
            .with_opening_hours(OpeningHours::new(vec![Period::all_day(1)]));
        assert!(!checker.check(&all_day, monday(), t("00:00"), u32::MAX).is_open);
    }
}
