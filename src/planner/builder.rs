//! Multi-day itinerary builder.
//!
//! # Algorithm
//!
//! 1. `total_days` = inclusive day count of the trip.
//! 2. For each day `d`: `per_day = ceil(remaining / (total_days - d))`,
//!    `cap = min(max_places_per_day, per_day)`.
//! 3. The [`SlotAllocator`] picks up to `cap` places from the remaining
//!    pool (the first day gets the first-day priority stage).
//! 4. Walk the picks with a clock starting at `day_start`: add travel
//!    from the previous pick, record the start, add the category visit
//!    length.
//! 5. Remove the picks from the pool; keep the day only if non-empty.
//!
//! # Complexity
//! O(d * n log n) where d=days, n=places (rating sort per day).

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::allocation::SlotAllocator;
use crate::config::{PlannerConfig, ScheduleConfig};
use crate::models::{inclusive_days, DaySchedule, Place, ScheduledPlace, Trip};
use crate::travel::{PlanarTravelEstimator, TravelTimeEstimator};

/// Greedy day-by-day itinerary builder.
///
/// Pure: the same places and dates always produce the same itinerary.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_itinerary::models::Place;
/// use u_itinerary::planner::ItineraryBuilder;
///
/// let places = vec![
///     Place::new("A", "Castle").with_category("tourist_attraction").with_rating(4.5),
///     Place::new("B", "Bistro").with_category("restaurant").with_rating(4.0),
/// ];
/// let start = NaiveDate::from_ymd_opt(2025, 6, 1);
///
/// let days = ItineraryBuilder::default().build(&places, start, start);
/// assert_eq!(days.len(), 1);
/// assert_eq!(days[0].places[1].start_time.unwrap().to_string(), "11:15");
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryBuilder<T = PlanarTravelEstimator> {
    config: ScheduleConfig,
    allocator: SlotAllocator,
    estimator: T,
}

impl ItineraryBuilder<PlanarTravelEstimator> {
    /// Creates a builder with the planar travel estimator.
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            config: config.schedule.clone(),
            allocator: SlotAllocator::from_config(&config.schedule),
            estimator: PlanarTravelEstimator::new(config.travel),
        }
    }
}

impl Default for ItineraryBuilder<PlanarTravelEstimator> {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

impl<T: TravelTimeEstimator> ItineraryBuilder<T> {
    /// Replaces the travel-time estimator.
    pub fn with_estimator<E: TravelTimeEstimator>(self, estimator: E) -> ItineraryBuilder<E> {
        ItineraryBuilder {
            config: self.config,
            allocator: self.allocator,
            estimator,
        }
    }

    /// Replaces the allocation policy.
    pub fn with_allocator(mut self, allocator: SlotAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Schedule settings in use.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Builds the itinerary for a trip.
    pub fn build_trip(&self, trip: &Trip) -> Vec<DaySchedule> {
        self.build(&trip.places, trip.start_date, trip.end_date)
    }

    /// Builds an itinerary over the inclusive range `start..=end`.
    ///
    /// Returns an empty itinerary when either date is missing, the range
    /// is inverted, or there are no places.
    pub fn build(
        &self,
        places: &[Place],
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<DaySchedule> {
        let (Some(start), Some(end)) = (start, end) else {
            debug!("trip has no date range; nothing to schedule");
            return Vec::new();
        };
        if places.is_empty() {
            return Vec::new();
        }
        let Some(total_days) = inclusive_days(start, end) else {
            debug!(%start, %end, "end date precedes start date; nothing to schedule");
            return Vec::new();
        };

        let mut remaining: Vec<Place> = places.to_vec();
        let mut days = Vec::new();

        for offset in 0..total_days {
            if remaining.is_empty() {
                break;
            }
            let Some(date) = start.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };

            let days_left = (total_days - offset) as usize;
            let per_day = remaining.len().div_ceil(days_left);
            let cap = per_day.min(self.config.max_places_per_day);

            let picks = self.allocator.allocate(&remaining, cap, offset == 0);
            let day = self.schedule_day(offset + 1, date, &remaining, &picks);

            let chosen: HashSet<usize> = picks.into_iter().collect();
            let mut index = 0;
            remaining.retain(|_| {
                let keep = !chosen.contains(&index);
                index += 1;
                keep
            });

            debug!(
                day = day.day_index,
                %date,
                places = day.len(),
                total_minutes = day.total_duration_minutes,
                "scheduled day"
            );
            if !day.is_empty() {
                days.push(day);
            }
        }

        days
    }

    /// Times the picked places sequentially from `day_start`.
    fn schedule_day(
        &self,
        day_index: u32,
        date: NaiveDate,
        pool: &[Place],
        picks: &[usize],
    ) -> DaySchedule {
        let mut day = DaySchedule::new(day_index, date);
        let mut clock = self.config.day_start;
        let mut previous: Option<&Place> = None;

        for &index in picks {
            let place = &pool[index];
            let travel = previous.map_or(0, |prev| {
                self.estimator
                    .estimate_minutes(&prev.coordinates, &place.coordinates)
            });
            clock = clock.add_minutes(travel);

            let duration = self.config.visit_minutes_for(place.category.as_deref());
            day.push(ScheduledPlace::new(place.clone(), clock, duration).with_travel(travel));

            clock = clock.add_minutes(duration);
            previous = Some(place);
        }

        day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{category, Coordinates, TimeOfDay};

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn t(hm: &str) -> TimeOfDay {
        hm.parse().unwrap()
    }

    fn abcd() -> Vec<Place> {
        vec![
            Place::new("A", "Attraction").with_category(category::TOURIST_ATTRACTION).with_rating(4.5),
            Place::new("B", "Restaurant").with_category(category::RESTAURANT).with_rating(4.0),
            Place::new("C", "Museum").with_category(category::MUSEUM).with_rating(4.8),
            Place::new("D", "Park").with_category(category::PARK).with_rating(3.5),
        ]
    }

    fn many_places(n: usize) -> Vec<Place> {
        let cats = [
            category::TOURIST_ATTRACTION,
            category::RESTAURANT,
            category::MUSEUM,
            category::PARK,
            category::SHOPPING_MALL,
            category::LODGING,
            "cafe",
        ];
        (0..n)
            .map(|i| {
                Place::new(format!("p{i}"), format!("Place {i}"))
                    .with_category(cats[i % cats.len()])
                    .with_rating((i % 5) as f64)
                    .with_coordinates(40.0 + (i as f64) * 0.01, -3.0 - (i as f64) * 0.02)
            })
            .collect()
    }

    #[derive(Debug)]
    struct FixedTravel(u32);

    impl TravelTimeEstimator for FixedTravel {
        fn estimate_minutes(&self, _from: &Coordinates, _to: &Coordinates) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_two_day_example() {
        let days = ItineraryBuilder::default().build(&abcd(), date(2025, 6, 1), date(2025, 6, 2));
        assert_eq!(days.len(), 2);

        let day1 = &days[0];
        assert_eq!(day1.day_index, 1);
        assert_eq!(day1.date, date(2025, 6, 1).unwrap());
        assert_eq!(day1.place_ids().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(day1.places[0].start_time, Some(t("09:00")));
        assert_eq!(day1.places[0].duration_minutes, Some(120));
        assert_eq!(day1.places[0].travel_minutes, 0);
        assert_eq!(day1.places[1].start_time, Some(t("11:15")));
        assert_eq!(day1.places[1].duration_minutes, Some(90));
        assert_eq!(day1.places[1].travel_minutes, 15);
        assert_eq!(day1.places[1].end_time(), Some(t("12:45")));
        assert_eq!(day1.total_duration_minutes, 120 + 90 + 15);

        let day2 = &days[1];
        assert_eq!(day2.day_index, 2);
        assert_eq!(day2.place_ids().collect::<Vec<_>>(), vec!["C", "D"]);
        assert_eq!(day2.places[0].start_time, Some(t("09:00")));
        assert_eq!(day2.places[0].duration_minutes, Some(150));
        assert_eq!(day2.places[1].start_time, Some(t("11:45")));
    }

    #[test]
    fn test_missing_dates_or_places() {
        let b = ItineraryBuilder::default();
        assert!(b.build(&abcd(), None, date(2025, 6, 2)).is_empty());
        assert!(b.build(&abcd(), date(2025, 6, 1), None).is_empty());
        assert!(b.build(&[], date(2025, 6, 1), date(2025, 6, 2)).is_empty());
        assert!(b.build(&abcd(), date(2025, 6, 3), date(2025, 6, 1)).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let b = ItineraryBuilder::default();
        let places = many_places(17);
        let first = b.build(&places, date(2025, 3, 1), date(2025, 3, 5));
        let second = b.build(&places, date(2025, 3, 1), date(2025, 3, 5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_coverage_and_capacity() {
        let b = ItineraryBuilder::default();
        let places = many_places(23);
        let days = b.build(&places, date(2025, 3, 1), date(2025, 3, 5)); // 5 days × 5 ≥ 23

        let mut seen: Vec<&str> = days.iter().flat_map(|d| d.place_ids()).collect();
        assert_eq!(seen.len(), 23);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 23, "a place was scheduled twice");

        for day in &days {
            assert!(day.len() <= 5);
        }
    }

    #[test]
    fn test_overflow_leaves_places_unscheduled() {
        let b = ItineraryBuilder::default();
        let days = b.build(&many_places(12), date(2025, 3, 1), date(2025, 3, 2));
        assert_eq!(days.len(), 2);
        assert!(days.iter().all(|d| d.len() == 5));
    }

    #[test]
    fn test_timing_continuity() {
        let b = ItineraryBuilder::default();
        let days = b.build(&many_places(14), date(2025, 3, 1), date(2025, 3, 3));
        for day in &days {
            for pair in day.places.windows(2) {
                let expected = pair[0].end_time().unwrap().add_minutes(pair[1].travel_minutes);
                assert_eq!(pair[1].start_time, Some(expected));
            }
            let sum: u32 = day.places.iter().map(|p| p.total_minutes()).sum();
            assert_eq!(day.total_duration_minutes, sum);
        }
    }

    #[test]
    fn test_spreads_evenly() {
        let b = ItineraryBuilder::default();
        // 7 places over 3 days: ceil(7/3)=3, ceil(4/2)=2, ceil(2/1)=2
        let days = b.build(&many_places(7), date(2025, 3, 1), date(2025, 3, 3));
        let sizes: Vec<usize> = days.iter().map(DaySchedule::len).collect();
        assert_eq!(sizes, vec![3, 2, 2]);
    }

    #[test]
    fn test_trailing_days_dropped() {
        let b = ItineraryBuilder::default();
        // 2 places over 4 days: one per day, last two days empty
        let days = b.build(&many_places(2), date(2025, 3, 1), date(2025, 3, 4));
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].day_index, 2);
    }

    #[test]
    fn test_custom_estimator() {
        let b = ItineraryBuilder::default().with_estimator(FixedTravel(40));
        let days = b.build(&abcd(), date(2025, 6, 1), date(2025, 6, 1));
        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.len(), 4);
        // A 09:00-11:00, +40 → B 11:40-13:10
        assert_eq!(day.places[1].start_time, Some(t("11:40")));
        assert!(day.places.iter().skip(1).all(|p| p.travel_minutes == 40));
    }

    #[test]
    fn test_custom_config() {
        let mut config = PlannerConfig::default();
        config.schedule.day_start = t("08:00");
        config.schedule.max_places_per_day = 1;
        let b = ItineraryBuilder::new(&config);
        let days = b.build(&abcd(), date(2025, 6, 1), date(2025, 6, 2));
        assert_eq!(days.len(), 2);
        assert!(days.iter().all(|d| d.len() == 1));
        assert_eq!(days[0].places[0].place.id, "A");
        assert_eq!(days[0].places[0].start_time, Some(t("08:00")));
    }

    #[test]
    fn test_huge_configured_visit_saturates() {
        let mut config = PlannerConfig::default();
        config
            .schedule
            .visit_minutes
            .insert(category::TOURIST_ATTRACTION.to_string(), u32::MAX);
        let days = ItineraryBuilder::new(&config).build(&abcd(), date(2025, 6, 1), date(2025, 6, 2));

        let day = &days[0];
        assert_eq!(day.place_ids().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(day.places[0].duration_minutes, Some(u32::MAX));
        assert_eq!(day.places[1].start_time.map(|s| s.minutes()), Some(u32::MAX));
        assert_eq!(day.total_duration_minutes, u32::MAX);
    }

    #[test]
    fn test_build_trip() {
        let trip = Trip::new("t", "Trip")
            .with_dates(date(2025, 6, 1).unwrap(), date(2025, 6, 2).unwrap());
        let trip = abcd().into_iter().fold(trip, Trip::with_place);
        let days = ItineraryBuilder::default().build_trip(&trip);
        assert_eq!(days.len(), 2);
    }
}
