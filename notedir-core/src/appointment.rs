//! Source-neutral appointment types.
//!
//! Sources convert their API responses into these types, and notedir-cli
//! works exclusively with them when generating notes.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One appointment occurrence (source-neutral).
///
/// Recurring series arrive pre-expanded: one `Appointment` per occurrence,
/// each carrying `is_recurring` and the series' opaque recurrence
/// descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub subject: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub organizer: String,
    /// Raw semicolon-delimited attendee list, exactly as the source
    /// reports it.
    #[serde(default)]
    pub required_attendees: String,
    #[serde(default)]
    pub is_recurring: bool,
    /// Opaque recurrence descriptor (e.g. an RRULE line). Present only
    /// when `is_recurring`; never interpreted by the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
}

impl Appointment {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Split `required_attendees` into distinct raw entries: deduplicated
    /// and sorted by their raw text, with blank entries dropped.
    ///
    /// Normalization (trimming) happens later, so ` Bob` and `Bob` are
    /// distinct entries here.
    pub fn attendees(&self) -> Vec<String> {
        let mut entries = BTreeSet::new();
        for raw in self.required_attendees.split(';') {
            if raw.trim().is_empty() {
                continue;
            }
            entries.insert(raw.to_string());
        }
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_appointment(attendees: &str) -> Appointment {
        Appointment {
            subject: "Standup".to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap(),
            location: None,
            organizer: "Carol".to_string(),
            required_attendees: attendees.to_string(),
            is_recurring: false,
            recurrence: None,
        }
    }

    #[test]
    fn attendees_are_deduplicated_and_sorted() {
        let appt = make_appointment("Bob;alice;Bob;  ");
        assert_eq!(appt.attendees(), vec!["Bob", "alice"]);
    }

    #[test]
    fn attendees_empty_field_yields_no_entries() {
        let appt = make_appointment("");
        assert!(appt.attendees().is_empty());
    }

    #[test]
    fn attendees_keep_raw_text() {
        // Dedup happens on raw text, before any trimming.
        let appt = make_appointment(" Bob;Bob");
        assert_eq!(appt.attendees(), vec![" Bob", "Bob"]);
    }

    #[test]
    fn start_date_is_date_only() {
        let appt = make_appointment("");
        assert_eq!(
            appt.start_date(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }
}
