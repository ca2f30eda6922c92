//! iCalendar (RFC 5545) export.
//!
//! Serializes an itinerary, or the manually booked calendar, into a
//! `.ics` document that standard calendar readers can import.
//!
//! # Format
//!
//! - Lines end with CRLF and are folded at 75 octets.
//! - Text values escape `\`, `;`, `,` and newlines.
//! - Visit times are wall-clock times at the destination; they are
//!   converted to UTC through a fixed offset and written as
//!   `YYYYMMDDTHHMMSSZ`.
//!
//! Export is total: entries without a start time or duration are skipped
//! and nothing here returns an error.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use u_itinerary::export::IcsExporter;
//! use u_itinerary::models::{DaySchedule, Place, ScheduledPlace, TripMeta};
//!
//! let mut day = DaySchedule::new(1, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
//! day.push(ScheduledPlace::new(Place::new("tower", "Tower"), "09:00".parse().unwrap(), 120));
//!
//! let stamp = Utc.with_ymd_and_hms(2025, 5, 20, 8, 0, 0).unwrap();
//! let ics = IcsExporter::default().export(&TripMeta::new("t1", "Lisbon"), &[day], stamp);
//!
//! assert!(ics.contains("DTSTART:20250601T090000Z\r\n"));
//! assert!(ics.contains("DTEND:20250601T110000Z\r\n"));
//! assert!(ics.ends_with("END:VCALENDAR\r\n"));
//! ```

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

use crate::calendar::EventStore;
use crate::models::{DaySchedule, Place, TimeOfDay, TripMeta};

const PRODID: &str = "-//u-itinerary//Trip Itinerary//EN";
const UID_DOMAIN: &str = "u-itinerary";
const MAX_LINE_OCTETS: usize = 75;
const UTC_STAMP: &str = "%Y%m%dT%H%M%SZ";

/// Writes itineraries as iCalendar documents.
#[derive(Debug, Clone, Copy)]
pub struct IcsExporter {
    utc_offset: FixedOffset,
}

impl Default for IcsExporter {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
        }
    }
}

impl IcsExporter {
    /// Creates an exporter treating visit times as UTC.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the destination's offset from UTC.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Exports a generated itinerary.
    pub fn export(&self, trip: &TripMeta, days: &[DaySchedule], generated_at: DateTime<Utc>) -> String {
        let mut doc = IcsDocument::begin(trip);
        let stamp = generated_at.format(UTC_STAMP).to_string();

        for day in days {
            for entry in &day.places {
                let (Some(start), Some(duration)) = (entry.start_time, entry.duration_minutes) else {
                    continue;
                };
                let Some((dtstart, dtend)) = self.utc_span(day.date, start, duration) else {
                    continue;
                };

                let mut description = Vec::new();
                if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
                    description.push(notes.to_string());
                }
                description.extend(place_facts(&entry.place, duration));
                if entry.travel_minutes > 0 {
                    description.push(format!(
                        "Travel time from previous stop: {} minutes",
                        entry.travel_minutes
                    ));
                }

                doc.event(&VEvent {
                    uid: format!("{}-{}-day{}@{UID_DOMAIN}", trip.id, entry.place.id, day.day_index),
                    stamp: &stamp,
                    start: dtstart,
                    end: dtend,
                    place: &entry.place,
                    description: description.join("\n"),
                });
            }
        }

        doc.finish()
    }

    /// Exports manually booked events. Events whose place is not in
    /// `places` are skipped.
    pub fn export_events(
        &self,
        trip: &TripMeta,
        store: &EventStore,
        places: &[Place],
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut doc = IcsDocument::begin(trip);
        let stamp = generated_at.format(UTC_STAMP).to_string();

        let mut events: Vec<_> = store.iter().collect();
        events.sort_by_key(|e| (e.date, e.start_time));

        for event in events {
            let Some(place) = places.iter().find(|p| p.id == event.place_id) else {
                continue;
            };
            let Some((dtstart, dtend)) = self.utc_span(event.date, event.start_time, event.duration_minutes)
            else {
                continue;
            };

            let mut description = Vec::new();
            if let Some(notes) = event.notes.as_deref().filter(|n| !n.is_empty()) {
                description.push(notes.to_string());
            }
            description.extend(place_facts(place, event.duration_minutes));

            doc.event(&VEvent {
                uid: format!("{}-{}@{UID_DOMAIN}", trip.id, event.id),
                stamp: &stamp,
                start: dtstart,
                end: dtend,
                place,
                description: description.join("\n"),
            });
        }

        doc.finish()
    }

    /// UTC start and end stamps for a visit, or `None` if out of range.
    fn utc_span(&self, date: NaiveDate, start: TimeOfDay, duration: u32) -> Option<(String, String)> {
        let offset = Duration::seconds(i64::from(self.utc_offset.local_minus_utc()));
        let local_start = date
            .and_time(NaiveTime::MIN)
            .checked_add_signed(Duration::minutes(i64::from(start.minutes())))?;
        let utc_start: NaiveDateTime = local_start.checked_sub_signed(offset)?;
        let utc_end = utc_start.checked_add_signed(Duration::minutes(i64::from(duration)))?;
        Some((
            utc_start.format(UTC_STAMP).to_string(),
            utc_end.format(UTC_STAMP).to_string(),
        ))
    }
}

/// Rating and duration lines shared by both export flavours.
fn place_facts(place: &Place, duration: u32) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if let Some(rating) = place.rating {
        lines.push(format!("Rating: {rating}/5"));
    }
    lines.push(format!("Duration: {duration} minutes"));
    lines
}

struct VEvent<'a> {
    uid: String,
    stamp: &'a str,
    start: String,
    end: String,
    place: &'a Place,
    description: String,
}

/// Accumulates content lines with CRLF endings and folding.
struct IcsDocument {
    out: String,
}

impl IcsDocument {
    fn begin(trip: &TripMeta) -> Self {
        let mut doc = Self { out: String::new() };
        doc.raw("BEGIN:VCALENDAR");
        doc.raw("VERSION:2.0");
        doc.raw(&format!("PRODID:{PRODID}"));
        doc.raw("CALSCALE:GREGORIAN");
        doc.raw("METHOD:PUBLISH");
        doc.text("X-WR-CALNAME", &trip.name);
        doc.text("X-WR-CALDESC", &format!("Travel itinerary for {}", trip.name));
        doc
    }

    fn event(&mut self, event: &VEvent<'_>) {
        self.raw("BEGIN:VEVENT");
        self.raw(&format!("UID:{}", event.uid));
        self.raw(&format!("DTSTAMP:{}", event.stamp));
        self.raw(&format!("DTSTART:{}", event.start));
        self.raw(&format!("DTEND:{}", event.end));
        self.text("SUMMARY", &event.place.name);
        self.text("DESCRIPTION", &event.description);
        self.text("LOCATION", &event.place.address);
        if let Some(category) = event.place.category.as_deref().filter(|c| !c.is_empty()) {
            self.text("CATEGORIES", category);
        }
        self.raw("STATUS:CONFIRMED");
        self.raw("TRANSP:OPAQUE");
        self.raw("END:VEVENT");
    }

    fn finish(mut self) -> String {
        self.raw("END:VCALENDAR");
        self.out
    }

    fn text(&mut self, name: &str, value: &str) {
        self.raw(&format!("{name}:{}", escape_text(value)));
    }

    fn raw(&mut self, line: &str) {
        self.out.push_str(&fold_line(line));
        self.out.push_str("\r\n");
    }
}

/// Escapes a TEXT value (RFC 5545 §3.3.11).
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Folds a content line at 75 octets without splitting a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for c in line.chars() {
        // Continuation lines start with a space, which counts toward the limit.
        if width + c.len_utf8() > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += c.len_utf8();
    }
    out
}
