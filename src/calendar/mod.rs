//! Week-view calendar of manually booked visits.
//!
//! - [`EventStore`]: create, update, remove and query bookings
//! - [`WeekView`]: seven-day navigation and hour-cell creation requests
//! - [`WeekGrid`]: positioned events with opening-hours advisories
//!
//! Bookings reference places by id. A booking whose place is unknown is
//! kept in the store but not rendered.

mod layout;
mod store;
mod week;

pub use layout::{Advisory, DayColumn, EventLayout, WeekGrid};
pub use store::EventStore;
pub use week::{WeekView, DAYS_PER_WEEK};
