//! Place-to-day allocation.
//!
//! Chooses which of the still-unscheduled places go into one day. The
//! choice is made by a [`SlotAllocator`] running an ordered list of
//! [`SelectionStage`]s; each stage adds places to the day until it is
//! full.
//!
//! # Default Policy
//!
//! 1. [`stages::FirstDayPriority`]: on the trip's first day, lead with a
//!    tourist attraction.
//! 2. [`stages::CategoryDiversity`]: one place per preferred category
//!    (restaurant, museum, park, shopping, lodging).
//! 3. [`stages::RatingFill`]: fill what is left with the best-rated places.
//!
//! # Usage
//!
//! ```
//! use u_itinerary::allocation::SlotAllocator;
//! use u_itinerary::config::ScheduleConfig;
//! use u_itinerary::models::Place;
//!
//! let pool = vec![
//!     Place::new("a", "Gardens").with_category("park").with_rating(4.0),
//!     Place::new("b", "Tower").with_category("tourist_attraction"),
//!     Place::new("c", "Bistro").with_category("restaurant"),
//! ];
//! let allocator = SlotAllocator::from_config(&ScheduleConfig::default());
//! let picked = allocator.allocate(&pool, 2, true);
//! assert_eq!(picked, vec![1, 2]); // attraction first, then restaurant
//! ```

mod allocator;
pub mod stages;

pub use allocator::SlotAllocator;

use crate::models::Place;
use std::fmt::Debug;

/// Per-call allocation inputs.
#[derive(Debug, Clone, Copy)]
pub struct AllocationContext {
    /// Maximum number of places for the day.
    pub capacity: usize,
    /// Whether the day is the first of the trip.
    pub is_first_day: bool,
}

/// Places chosen so far for one day, as indices into the pool.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    picked: Vec<usize>,
    capacity: usize,
}

impl Selection {
    /// Creates an empty selection with room for `capacity` places.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            picked: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Whether no more places fit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.picked.len() >= self.capacity
    }

    /// Whether the pool index has been chosen.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.picked.contains(&index)
    }

    /// Adds a pool index. Ignored when full or already chosen.
    pub fn push(&mut self, index: usize) -> bool {
        if self.is_full() || self.contains(index) {
            return false;
        }
        self.picked.push(index);
        true
    }

    /// Number of chosen places.
    pub fn len(&self) -> usize {
        self.picked.len()
    }

    /// Whether nothing has been chosen.
    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    /// Chosen indices in selection order.
    pub fn into_indices(self) -> Vec<usize> {
        self.picked
    }
}

/// One step of the allocation policy.
///
/// Stages see the whole pool and the selection built so far, and may
/// append further pool indices. They must not pick an index twice;
/// [`Selection::push`] enforces this and the capacity.
pub trait SelectionStage: Send + Sync + Debug {
    /// Stage name (for logging).
    fn name(&self) -> &'static str;

    /// Adds places to `selection`.
    fn select(&self, pool: &[Place], context: &AllocationContext, selection: &mut Selection);
}
