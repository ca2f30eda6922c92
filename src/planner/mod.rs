//! Itinerary planning.
//!
//! - [`ItineraryBuilder`]: spreads a trip's places across its days
//! - [`cascade`]: re-times a day after a manual edit
//! - [`ItinerarySummary`]: headline metrics and opening-hours conflicts
//! - [`TripPlanner`]: owns the committed schedule; generation can run as a
//!   cancellable [`GenerationTask`]

mod builder;
pub mod cascade;
mod generation;
mod summary;

pub use builder::ItineraryBuilder;
pub use cascade::{apply_edit, cascade_day, EntryEdit};
pub use generation::{GenerationTask, TripPlanner};
pub use summary::{ItinerarySummary, Violation, ViolationType};
