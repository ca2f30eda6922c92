//! Time-of-day model.
//!
//! Visits are placed on a wall-clock axis measured in minutes since
//! midnight. Values may run past 24:00 when an edited day spills over
//! midnight; they are never wrapped back to the start of the day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ItineraryError;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A wall-clock time expressed as minutes since midnight.
///
/// Serialized as `"HH:MM"`.
///
/// # Examples
///
/// ```
/// use u_itinerary::models::TimeOfDay;
///
/// let t: TimeOfDay = "09:30".parse().unwrap();
/// assert_eq!(t.minutes(), 570);
/// assert_eq!(t.add_minutes(45).to_string(), "10:15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Midnight at the end of the day (24:00).
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Creates a time from minutes since midnight.
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Creates a time from an hour and minute on the 24-hour clock.
    ///
    /// Returns `None` for hours above 23 or minutes above 59.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour * 60 + minute))
    }

    /// Parses the compact `"HHMM"` form used by opening-hours periods.
    pub fn parse_compact(text: &str) -> Result<Self, ItineraryError> {
        let trimmed = text.trim();
        if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ItineraryError::InvalidTime(text.to_string()));
        }
        let hour: u32 = trimmed[..2]
            .parse()
            .map_err(|_| ItineraryError::InvalidTime(text.to_string()))?;
        let minute: u32 = trimmed[2..]
            .parse()
            .map_err(|_| ItineraryError::InvalidTime(text.to_string()))?;
        // "2400" shows up in some sources as the end of the day.
        if hour == 24 && minute == 0 {
            return Ok(Self::END_OF_DAY);
        }
        Self::from_hm(hour, minute).ok_or_else(|| ItineraryError::InvalidTime(text.to_string()))
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Hour component (may exceed 23 after midnight spill-over).
    #[inline]
    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    /// Minute component.
    #[inline]
    pub fn minute(&self) -> u32 {
        self.0 % 60
    }

    /// Returns this time advanced by `minutes`, saturating at `u32::MAX`.
    #[inline]
    pub fn add_minutes(&self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ItineraryError;

    /// Parses `"HH:MM"` on the 24-hour clock (a single-digit hour is accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minute) = split_colon(s)?;
        Self::from_hm(hour, minute).ok_or_else(|| ItineraryError::InvalidTime(s.to_string()))
    }
}

// Serialized values may carry a spilled hour such as "25:30".
impl TryFrom<String> for TimeOfDay {
    type Error = ItineraryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (hour, minute) = split_colon(&value)?;
        if minute > 59 {
            return Err(ItineraryError::InvalidTime(value));
        }
        Ok(Self(hour * 60 + minute))
    }
}

fn split_colon(s: &str) -> Result<(u32, u32), ItineraryError> {
    let err = || ItineraryError::InvalidTime(s.to_string());
    let (hour, minute) = s.trim().split_once(':').ok_or_else(err)?;
    if minute.len() != 2 || hour.is_empty() || hour.len() > 2 {
        return Err(err());
    }
    let hour: u32 = hour.parse().map_err(|_| err())?;
    let minute: u32 = minute.parse().map_err(|_| err())?;
    Ok((hour, minute))
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_form() {
        let t: TimeOfDay = "16:30".parse().unwrap();
        assert_eq!(t.minutes(), 990);
        assert_eq!(t.hour(), 16);
        assert_eq!(t.minute(), 30);

        let single: TimeOfDay = "9:05".parse().unwrap();
        assert_eq!(single.to_string(), "09:05");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("1230".parse::<TimeOfDay>().is_err());
        assert!("12:5".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_parse_compact() {
        assert_eq!(TimeOfDay::parse_compact("0900").unwrap().minutes(), 540);
        assert_eq!(TimeOfDay::parse_compact("1730").unwrap().minutes(), 1050);
        assert_eq!(TimeOfDay::parse_compact("2400").unwrap(), TimeOfDay::END_OF_DAY);
        assert!(TimeOfDay::parse_compact("9:00").is_err());
        assert!(TimeOfDay::parse_compact("2500").is_err());
    }

    #[test]
    fn test_spill_past_midnight() {
        let late = TimeOfDay::from_hm(23, 30).unwrap().add_minutes(60);
        assert_eq!(late.minutes(), 1470);
        assert_eq!(late.to_string(), "24:30");

        let later = TimeOfDay::from_hm(23, 30).unwrap().add_minutes(120);
        assert_eq!(later.minutes(), 1530);
        assert_eq!(later.to_string(), "25:30");
    }

    #[test]
    fn test_add_minutes_saturates() {
        let t = TimeOfDay::from_hm(10, 0).unwrap().add_minutes(u32::MAX);
        assert_eq!(t.minutes(), u32::MAX);
        assert!(t > TimeOfDay::END_OF_DAY);
    }

    #[test]
    fn test_serde_as_string() {
        let t = TimeOfDay::from_hm(11, 15).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"11:15\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"noon\"").is_err());

        let spilled: TimeOfDay = serde_json::from_str("\"25:30\"").unwrap();
        assert_eq!(spilled.minutes(), 1530);
    }
}
