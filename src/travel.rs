//! Travel-time estimation between places.
//!
//! Travel time plays the role of a sequence-dependent setup time: it is
//! inserted between consecutive visits of a day and depends only on the
//! pair of places involved.
//!
//! # Algorithm
//!
//! [`PlanarTravelEstimator`] treats latitude/longitude as a flat plane:
//!
//! ```text
//! degrees = √(Δlat² + Δlng²)
//! km      = degrees × 111
//! minutes = max(round(km × 2), 15)
//! ```
//!
//! This is a coarse urban heuristic (≈30 km/h), not a geodesic or
//! road-network distance. The constants and the floor are part of the
//! observable behavior; substitute a different [`TravelTimeEstimator`]
//! explicitly rather than altering them.

use crate::config::TravelConfig;
use crate::models::Coordinates;

/// Estimates minutes needed to travel between two locations.
pub trait TravelTimeEstimator: Send + Sync {
    /// Estimated travel minutes from `from` to `to`.
    fn estimate_minutes(&self, from: &Coordinates, to: &Coordinates) -> u32;
}

/// Straight-line planar estimator with a minimum floor.
///
/// # Example
///
/// ```
/// use u_itinerary::models::Coordinates;
/// use u_itinerary::travel::{PlanarTravelEstimator, TravelTimeEstimator};
///
/// let est = PlanarTravelEstimator::default();
/// let a = Coordinates::new(48.85, 2.35);
/// assert_eq!(est.estimate_minutes(&a, &a), 15);
/// assert_eq!(est.estimate_minutes(&a, &Coordinates::new(48.95, 2.35)), 22);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarTravelEstimator {
    config: TravelConfig,
}

impl PlanarTravelEstimator {
    /// Creates an estimator with explicit constants.
    pub fn new(config: TravelConfig) -> Self {
        Self { config }
    }

    /// Planar distance in kilometers.
    pub fn distance_km(&self, from: &Coordinates, to: &Coordinates) -> f64 {
        let d_lat = to.lat - from.lat;
        let d_lng = to.lng - from.lng;
        (d_lat * d_lat + d_lng * d_lng).sqrt() * self.config.km_per_degree
    }
}

impl TravelTimeEstimator for PlanarTravelEstimator {
    fn estimate_minutes(&self, from: &Coordinates, to: &Coordinates) -> u32 {
        let minutes = (self.distance_km(from, to) * self.config.minutes_per_km).round();
        // Non-finite input (NaN coordinates) falls back to the floor.
        let minutes = if minutes.is_finite() && minutes > 0.0 {
            minutes.min(u32::MAX as f64) as u32
        } else {
            0
        };
        minutes.max(self.config.min_minutes)
    }
}
