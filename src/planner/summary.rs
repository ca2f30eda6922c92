//! Itinerary summary metrics.
//!
//! Computes headline figures for a generated itinerary and flags visits
//! that fall outside their place's opening hours. Flags are advisory; the
//! itinerary is never altered.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Visit minutes | Σ visit durations |
//! | Travel minutes | Σ inbound travel |
//! | Latest finish | Max end time over all days |
//! | Unscheduled | Input places that were not placed on any day |
//! | Violations | Visits outside opening hours |

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{DaySchedule, Place, TimeOfDay};
use crate::opening_hours::OpeningHoursChecker;

/// A visit that conflicts with opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub violation_type: ViolationType,
    /// Day the visit is on (1-based).
    pub day_index: u32,
    /// Place concerned.
    pub place_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of opening-hours conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// The place has no opening period on that weekday.
    ClosedOnDay,
    /// The visit does not fit inside any opening period.
    OutsideHours,
}

impl Violation {
    fn closed_on_day(day_index: u32, place_id: &str, message: String) -> Self {
        Self {
            violation_type: ViolationType::ClosedOnDay,
            day_index,
            place_id: place_id.to_string(),
            message,
            severity: 90,
        }
    }

    fn outside_hours(day_index: u32, place_id: &str, message: String) -> Self {
        Self {
            violation_type: ViolationType::OutsideHours,
            day_index,
            place_id: place_id.to_string(),
            message,
            severity: 60,
        }
    }
}

/// Summary of a generated itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItinerarySummary {
    /// Number of scheduled visits.
    pub scheduled_count: usize,
    /// Ids of input places left off the itinerary, in input order.
    pub unscheduled: Vec<String>,
    /// Σ visit durations (minutes).
    pub visit_minutes: u32,
    /// Σ travel (minutes).
    pub travel_minutes: u32,
    /// Finish time per day index.
    pub finish_by_day: BTreeMap<u32, TimeOfDay>,
    /// Latest finish across all days.
    pub latest_finish: Option<TimeOfDay>,
    /// Opening-hours conflicts.
    pub violations: Vec<Violation>,
}

impl ItinerarySummary {
    /// Computes the summary for `days` generated from `places`.
    pub fn calculate(days: &[DaySchedule], places: &[Place], checker: &OpeningHoursChecker) -> Self {
        let mut scheduled_ids: HashSet<&str> = HashSet::new();
        let mut visit_minutes = 0;
        let mut travel_minutes = 0;
        let mut finish_by_day = BTreeMap::new();
        let mut violations = Vec::new();

        for day in days {
            if let Some(finish) = day.finish_time() {
                finish_by_day.insert(day.day_index, finish);
            }
            for entry in &day.places {
                scheduled_ids.insert(entry.place.id.as_str());
                visit_minutes = u32::saturating_add(visit_minutes, entry.duration_minutes.unwrap_or(0));
                travel_minutes = u32::saturating_add(travel_minutes, entry.travel_minutes);

                let (Some(start), Some(duration)) = (entry.start_time, entry.duration_minutes) else {
                    continue;
                };
                let check = checker.check(&entry.place, day.date, start, duration);
                if check.is_open {
                    continue;
                }
                let message = check.warning.unwrap_or_default();
                let no_periods_today = entry
                    .place
                    .opening_hours
                    .as_ref()
                    .is_some_and(|h| h.periods_on(day.date.weekday()).next().is_none());
                violations.push(if no_periods_today {
                    Violation::closed_on_day(day.day_index, &entry.place.id, message)
                } else {
                    Violation::outside_hours(day.day_index, &entry.place.id, message)
                });
            }
        }

        let unscheduled = places
            .iter()
            .filter(|p| !scheduled_ids.contains(p.id.as_str()))
            .map(|p| p.id.clone())
            .collect();

        Self {
            scheduled_count: days.iter().map(DaySchedule::len).sum(),
            unscheduled,
            visit_minutes,
            travel_minutes,
            latest_finish: finish_by_day.values().max().copied(),
            finish_by_day,
            violations,
        }
    }

    /// Whether every input place made it onto the itinerary.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Whether no visit conflicts with opening hours.
    pub fn is_conflict_free(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{category, OpeningHours, Period};
    use crate::planner::ItineraryBuilder;
    use chrono::NaiveDate;

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, d)
    }

    fn places() -> Vec<Place> {
        vec![
            Place::new("A", "Attraction").with_category(category::TOURIST_ATTRACTION),
            Place::new("B", "Restaurant").with_category(category::RESTAURANT),
            Place::new("C", "Museum").with_category(category::MUSEUM),
            Place::new("D", "Park").with_category(category::PARK),
        ]
    }

    #[test]
    fn test_summary_totals() {
        let days = ItineraryBuilder::default().build(&places(), date(1), date(2));
        let s = ItinerarySummary::calculate(&days, &places(), &OpeningHoursChecker::default());

        assert_eq!(s.scheduled_count, 4);
        assert!(s.is_complete());
        assert_eq!(s.visit_minutes, 120 + 90 + 150 + 90);
        assert_eq!(s.travel_minutes, 30);
        assert_eq!(s.finish_by_day[&1].to_string(), "12:45");
        assert_eq!(s.finish_by_day[&2].to_string(), "13:15");
        assert_eq!(s.latest_finish.map(|t| t.to_string()), Some("13:15".to_string()));
        assert!(s.is_conflict_free());
    }

    #[test]
    fn test_unscheduled_reported() {
        let many: Vec<Place> = (0..7).map(|i| Place::new(format!("p{i}"), "x")).collect();
        let days = ItineraryBuilder::default().build(&many, date(1), date(1));
        let s = ItinerarySummary::calculate(&days, &many, &OpeningHoursChecker::default());
        assert_eq!(s.scheduled_count, 5);
        assert_eq!(s.unscheduled.len(), 2);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_hours_violations() {
        // 2025-06-01 is a Sunday
        let mut input = places();
        input[0] = input[0]
            .clone()
            .with_opening_hours(OpeningHours::new(vec![Period::same_day(1, "0900", "1700")]));
        input[1] = input[1]
            .clone()
            .with_opening_hours(OpeningHours::new(vec![Period::same_day(0, "1200", "2200")]));

        let days = ItineraryBuilder::default().build(&input, date(1), date(2));
        let s = ItinerarySummary::calculate(&days, &input, &OpeningHoursChecker::default());

        assert_eq!(s.violations.len(), 2);
        let a = s.violations.iter().find(|v| v.place_id == "A").unwrap();
        assert_eq!(a.violation_type, ViolationType::ClosedOnDay);
        assert_eq!(a.day_index, 1);
        let b = s.violations.iter().find(|v| v.place_id == "B").unwrap();
        assert_eq!(b.violation_type, ViolationType::OutsideHours);
        assert!(!s.is_conflict_free());
    }

    #[test]
    fn test_empty_itinerary() {
        let s = ItinerarySummary::calculate(&[], &places(), &OpeningHoursChecker::default());
        assert_eq!(s.scheduled_count, 0);
        assert_eq!(s.unscheduled.len(), 4);
        assert!(s.latest_finish.is_none());
    }
}
