//! Planner configuration.
//!
//! Every lookup table the engine uses (visit durations, category
//! preference order, travel constants, calendar geometry) lives here and
//! is passed explicitly into the components that need it. All fields have
//! defaults, so an empty TOML document yields the standard behavior.
//!
//! # Example
//!
//! ```
//! use u_itinerary::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [schedule]
//!     max_places_per_day = 4
//!
//!     [schedule.visit_minutes]
//!     museum = 180
//! "#).unwrap();
//!
//! assert_eq!(config.schedule.max_places_per_day, 4);
//! assert_eq!(config.schedule.visit_minutes_for(Some("museum")), 180);
//! assert_eq!(config.schedule.visit_minutes_for(Some("restaurant")), 90);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::{category, TimeOfDay, WeekdayTextOrder};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub schedule: ScheduleConfig,
    pub travel: TravelConfig,
    pub hours: HoursConfig,
    pub calendar: CalendarConfig,
}

impl PlannerConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded planner configuration");
        Ok(config)
    }
}

/// Itinerary generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Clock value at which every generated day starts.
    pub day_start: TimeOfDay,
    /// Upper bound on visits per generated day.
    pub max_places_per_day: usize,
    /// Category given priority on the first day of a trip.
    pub first_day_category: Option<String>,
    /// Categories to spread across each day, in preference order.
    pub category_preference: Vec<String>,
    /// Visit length per category (minutes). Entries read from TOML are
    /// merged over the built-in table.
    #[serde(deserialize_with = "merge_visit_minutes")]
    pub visit_minutes: BTreeMap<String, u32>,
    /// Visit length for categories absent from `visit_minutes`.
    pub default_visit_minutes: u32,
}

fn default_visit_minutes() -> BTreeMap<String, u32> {
    [
        (category::RESTAURANT, 90),
        (category::TOURIST_ATTRACTION, 120),
        (category::MUSEUM, 150),
        (category::PARK, 90),
        (category::SHOPPING_MALL, 120),
        (category::LODGING, 30),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn merge_visit_minutes<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<String, u32>::deserialize(deserializer)?;
    let mut table = default_visit_minutes();
    table.extend(overrides);
    Ok(table)
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start: TimeOfDay::from_minutes(9 * 60),
            max_places_per_day: 5,
            first_day_category: Some(category::TOURIST_ATTRACTION.to_string()),
            category_preference: [
                category::RESTAURANT,
                category::MUSEUM,
                category::PARK,
                category::SHOPPING_MALL,
                category::LODGING,
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            visit_minutes: default_visit_minutes(),
            default_visit_minutes: 60,
        }
    }
}

impl ScheduleConfig {
    /// Visit length for a place category.
    pub fn visit_minutes_for(&self, category: Option<&str>) -> u32 {
        category
            .and_then(|c| self.visit_minutes.get(c))
            .copied()
            .unwrap_or(self.default_visit_minutes)
    }
}

/// Travel-time heuristic constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    /// Planar degrees-to-kilometers factor.
    pub km_per_degree: f64,
    /// Minutes per kilometer (2.0 ≈ 30 km/h).
    pub minutes_per_km: f64,
    /// Lower bound on any estimate.
    pub min_minutes: u32,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            km_per_degree: 111.0,
            minutes_per_km: 2.0,
            min_minutes: 15,
        }
    }
}

/// Opening-hours interpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    /// Ordering of `weekday_text` lines in the source data.
    pub weekday_text_order: WeekdayTextOrder,
}

/// Week-view calendar geometry and defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Vertical pixels per minute on the 24-hour axis.
    pub pixels_per_minute: f64,
    /// Events never render shorter than this.
    pub min_event_height_px: f64,
    /// First day of the displayed week.
    pub week_start: Weekday,
    /// Duration pre-filled when creating an event from an hour cell.
    pub default_event_minutes: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            pixels_per_minute: 1.0,
            min_event_height_px: 20.0,
            week_start: Weekday::Sun,
            default_event_minutes: 60,
        }
    }
}
