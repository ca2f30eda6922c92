//! Input validation for trips.
//!
//! Checks the structural integrity of a trip before planning. Detects:
//! - Duplicate or empty place IDs
//! - Coordinates outside the valid latitude/longitude ranges
//! - Ratings outside 0-5
//! - Malformed opening-hours periods and weekday text
//! - Missing or inverted date ranges
//!
//! Validation is advisory. The planner degrades gracefully on every one
//! of these inputs (an inverted range yields an empty itinerary, a
//! malformed period never admits a visit), so callers decide whether an
//! issue is worth surfacing.

use std::collections::HashSet;

use crate::models::{DayTime, OpeningHours, Trip};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two places share the same ID.
    DuplicateId,
    /// A place has an empty ID.
    EmptyId,
    /// Latitude or longitude out of range, or not finite.
    InvalidCoordinates,
    /// Rating outside 0-5.
    InvalidRating,
    /// A period has a bad day-of-week or time.
    InvalidOpeningHours,
    /// Weekday text present but not one line per day.
    WeekdayTextLength,
    /// Start or end date missing.
    MissingDates,
    /// End date precedes start date.
    InvalidDateRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a trip.
///
/// Checks:
/// 1. Both dates present and `end >= start`
/// 2. No empty or duplicate place IDs
/// 3. Coordinates and ratings in range
/// 4. Opening-hours periods have days 0-6 and `HHMM` times
/// 5. Weekday text, when present, has exactly seven lines
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_trip(trip: &Trip) -> ValidationResult {
    let mut errors = Vec::new();

    match (trip.start_date, trip.end_date) {
        (Some(start), Some(end)) if end < start => errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDateRange,
            format!("Trip '{}' ends ({end}) before it starts ({start})", trip.id),
        )),
        (Some(_), Some(_)) => {}
        _ => errors.push(ValidationError::new(
            ValidationErrorKind::MissingDates,
            format!("Trip '{}' has no complete date range", trip.id),
        )),
    }

    let mut ids = HashSet::new();
    for place in &trip.places {
        if place.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Place '{}' has an empty ID", place.name),
            ));
        } else if !ids.insert(place.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate place ID: {}", place.id),
            ));
        }

        if !place.coordinates.is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCoordinates,
                format!(
                    "Place '{}' has invalid coordinates ({}, {})",
                    place.id, place.coordinates.lat, place.coordinates.lng
                ),
            ));
        }

        if let Some(rating) = place.rating {
            if !(0.0..=5.0).contains(&rating) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidRating,
                    format!("Place '{}' has rating {rating} outside 0-5", place.id),
                ));
            }
        }

        if let Some(hours) = &place.opening_hours {
            validate_hours(&place.id, hours, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_hours(place_id: &str, hours: &OpeningHours, errors: &mut Vec<ValidationError>) {
    for (i, period) in hours.periods.iter().enumerate() {
        let mut check = |label: &str, dt: &DayTime| {
            if dt.day > 6 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidOpeningHours,
                    format!("Place '{place_id}' period {i} {label} day {} not in 0-6", dt.day),
                ));
            }
            if dt.time_of_day().is_err() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidOpeningHours,
                    format!("Place '{place_id}' period {i} {label} time {:?} is not HHMM", dt.time),
                ));
            }
        };
        check("open", &period.open);
        if let Some(close) = &period.close {
            check("close", close);
        }
    }

    if !hours.weekday_text.is_empty() && hours.weekday_text.len() != 7 {
        errors.push(ValidationError::new(
            ValidationErrorKind::WeekdayTextLength,
            format!(
                "Place '{place_id}' has {} weekday text lines, expected 7",
                hours.weekday_text.len()
            ),
        ));
    }
}
