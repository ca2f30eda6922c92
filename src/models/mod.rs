//! Itinerary domain models.
//!
//! Provides the data types exchanged with the trip-storage collaborator
//! and produced by the planner.
//!
//! # Domain Mappings
//!
//! | u-itinerary | Role |
//! |-------------|------|
//! | Place | Point of interest (input) |
//! | Trip | Date range + places (input) |
//! | DaySchedule | One generated day (output) |
//! | ScheduledEvent | One booked visit on the calendar |

mod event;
mod hours;
mod itinerary;
mod place;
mod time;
mod trip;

pub use event::{EventDraft, EventUpdate, ScheduledEvent};
pub use hours::{DayTime, OpeningHours, Period, TimeWindow, WeekdayTextOrder};
pub use itinerary::{DaySchedule, ScheduledPlace};
pub use place::{category, Coordinates, Place};
pub use time::{TimeOfDay, MINUTES_PER_DAY};
pub use trip::{inclusive_days, Trip, TripMeta};
