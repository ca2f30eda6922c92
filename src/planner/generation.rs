//! Cancellable itinerary generation and the planner session.
//!
//! [`GenerationTask`] wraps a build in an async unit of work that can be
//! cancelled while it waits. [`TripPlanner`] owns one trip's committed
//! schedule and is the single writer for generation and edits.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::builder::ItineraryBuilder;
use super::cascade::{apply_edit, EntryEdit};
use crate::error::{ItineraryError, Result};
use crate::models::{DaySchedule, Trip};
use crate::travel::{PlanarTravelEstimator, TravelTimeEstimator};

/// One cancellable generation run.
///
/// The optional latency stands in for upstream work (fetching place data,
/// remote travel estimates). Cancelling while it is pending discards the
/// run.
#[derive(Debug, Clone, Default)]
pub struct GenerationTask {
    token: CancellationToken,
    latency: Duration,
}

impl GenerationTask {
    /// Creates a task with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the latency awaited before building.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Token that cancels this task when triggered.
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancels the task.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the task has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits out the latency, then builds the itinerary for `trip`.
    ///
    /// Returns [`ItineraryError::Cancelled`] if the token fires first.
    pub async fn run<T: TravelTimeEstimator>(
        &self,
        builder: &ItineraryBuilder<T>,
        trip: &Trip,
    ) -> Result<Vec<DaySchedule>> {
        info!(trip = %trip.id, places = trip.places.len(), "generation started");

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                info!(trip = %trip.id, "generation cancelled");
                return Err(ItineraryError::Cancelled);
            }
            _ = tokio::time::sleep(self.latency) => {}
        }

        let days = builder.build_trip(trip);
        info!(trip = %trip.id, days = days.len(), "generation finished");
        Ok(days)
    }
}

/// A trip together with its committed itinerary.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_itinerary::models::{Place, TimeOfDay, Trip};
/// use u_itinerary::planner::{EntryEdit, TripPlanner};
///
/// let trip = Trip::new("t1", "Lisbon")
///     .with_dates(
///         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     )
///     .with_place(Place::new("a", "Tower").with_category("tourist_attraction"))
///     .with_place(Place::new("b", "Tasca").with_category("restaurant"));
///
/// let mut planner = TripPlanner::new(trip);
/// planner.generate();
/// planner.edit_entry(&EntryEdit::new(1, 0).with_duration(60)).unwrap();
///
/// let day = &planner.schedule()[0];
/// assert_eq!(day.places[1].start_time, Some(TimeOfDay::from_minutes(10 * 60 + 15)));
/// ```
#[derive(Debug, Clone)]
pub struct TripPlanner<T = PlanarTravelEstimator> {
    trip: Trip,
    builder: ItineraryBuilder<T>,
    schedule: Vec<DaySchedule>,
}

impl TripPlanner<PlanarTravelEstimator> {
    /// Creates a planner with the default builder and no schedule.
    pub fn new(trip: Trip) -> Self {
        Self::with_builder(trip, ItineraryBuilder::default())
    }
}

impl<T: TravelTimeEstimator> TripPlanner<T> {
    /// Creates a planner using `builder`.
    pub fn with_builder(trip: Trip, builder: ItineraryBuilder<T>) -> Self {
        Self {
            trip,
            builder,
            schedule: Vec::new(),
        }
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    /// The committed itinerary.
    pub fn schedule(&self) -> &[DaySchedule] {
        &self.schedule
    }

    /// Regenerates and commits the itinerary.
    pub fn generate(&mut self) -> &[DaySchedule] {
        self.schedule = self.builder.build_trip(&self.trip);
        &self.schedule
    }

    /// Regenerates through `task`; commits only if the task completes.
    pub async fn generate_with(&mut self, task: &GenerationTask) -> Result<&[DaySchedule]> {
        let days = task.run(&self.builder, &self.trip).await?;
        self.schedule = days;
        Ok(&self.schedule)
    }

    /// Applies a manual edit to the committed itinerary.
    pub fn edit_entry(&mut self, edit: &EntryEdit) -> Result<()> {
        apply_edit(&mut self.schedule, edit)
    }
}
