//! Multi-day trip itinerary planning.
//!
//! Turns a trip's date range and list of places into per-day visit plans,
//! checks visits against opening hours, keeps a week-view calendar of
//! manual bookings, and exports either to iCalendar.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Place`, `Trip`, `DaySchedule`,
//!   `ScheduledEvent`, `OpeningHours`, `TimeOfDay`
//! - **`travel`**: Travel-time estimation between coordinates
//! - **`opening_hours`**: Advisory opening-hours checks
//! - **`allocation`**: Which places go into one day
//! - **`planner`**: Itinerary building, edit cascade, summary, cancellable
//!   generation
//! - **`calendar`**: Manual bookings and week-view layout
//! - **`export`**: iCalendar output
//! - **`validation`**: Input integrity checks
//! - **`config`**: TOML-backed planner settings
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_itinerary::models::{Place, Trip};
//! use u_itinerary::planner::ItineraryBuilder;
//!
//! let trip = Trip::new("t1", "Porto")
//!     .with_dates(
//!         NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
//!     )
//!     .with_place(Place::new("A", "Clérigos").with_category("tourist_attraction"))
//!     .with_place(Place::new("B", "Cantina").with_category("restaurant"))
//!     .with_place(Place::new("C", "Serralves").with_category("museum"))
//!     .with_place(Place::new("D", "Cristal").with_category("park"));
//!
//! let days = ItineraryBuilder::default().build_trip(&trip);
//! assert_eq!(days.len(), 2);
//! assert_eq!(days[1].places[0].place.id, "C");
//! ```

pub mod allocation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod opening_hours;
pub mod planner;
pub mod travel;
pub mod validation;

pub use error::{ItineraryError, Result};
