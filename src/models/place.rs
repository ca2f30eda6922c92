//! Place (point of interest) model.
//!
//! Places arrive from a place-search collaborator and are treated as
//! read-only input by every planning component.

use serde::{Deserialize, Serialize};

use super::OpeningHours;

/// Category identifiers as produced by the place-details source.
pub mod category {
    pub const TOURIST_ATTRACTION: &str = "tourist_attraction";
    pub const RESTAURANT: &str = "restaurant";
    pub const MUSEUM: &str = "museum";
    pub const PARK: &str = "park";
    pub const SHOPPING_MALL: &str = "shopping_mall";
    pub const LODGING: &str = "lodging";
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether latitude and longitude are within their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A point of interest that can be visited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Unique place identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Formatted street address.
    #[serde(default)]
    pub address: String,
    /// Location.
    pub coordinates: Coordinates,
    /// Primary category (e.g. `"museum"`). `None` = uncategorized.
    #[serde(default)]
    pub category: Option<String>,
    /// Average rating (0.0..5.0). `None` = unrated.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Opening hours. `None` = unknown, treated as always open.
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

impl Place {
    /// Creates a place with the given id and name at the origin.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            coordinates: Coordinates::default(),
            category: None,
            rating: None,
            opening_hours: None,
        }
    }

    /// Sets the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the coordinates.
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Coordinates::new(lat, lng);
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the opening hours.
    pub fn with_opening_hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = Some(hours);
        self
    }

    /// Whether the place belongs to `category`.
    #[inline]
    pub fn is_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    /// Rating with missing values treated as zero.
    #[inline]
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}
