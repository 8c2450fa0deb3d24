//! The three note writers: meeting notes, person logs, series logs.
//!
//! Meeting notes are overwritten deterministically on every run. Person
//! and series logs are create-or-append: the switch is decided solely by
//! file existence at call time, so two occurrences of the same series in
//! one run correctly create then append.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notedir_core::Appointment;

use crate::render::render;
use crate::sanitize::normalize_name;
use crate::templates::TemplateSet;
use crate::vault::{meeting_note_filename, Vault};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M";

/// Whether a series log was created from its template or appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    Created,
    Appended,
}

pub struct NoteWriter<'a> {
    vault: &'a Vault,
    templates: &'a TemplateSet,
}

impl<'a> NoteWriter<'a> {
    pub fn new(vault: &'a Vault, templates: &'a TemplateSet) -> Self {
        NoteWriter { vault, templates }
    }

    /// Write the canonical note for one appointment occurrence and append
    /// a mention to each attendee's person log. Returns the meeting note
    /// path. Overwrites any previous note for the same occurrence.
    pub fn write_meeting_note(&self, appt: &Appointment) -> Result<PathBuf> {
        let date = appt.start_date();

        // The checkbox list and the person logs derive from the same
        // normalized, deduplicated, raw-sorted set.
        let attendees: Vec<String> = appt
            .attendees()
            .iter()
            .filter_map(|raw| normalize_name(raw))
            .collect();

        let mention = format!("{} on {}", appt.subject, date.format(DATE_FMT));
        for name in &attendees {
            self.append_person_mention(name, &mention)?;
        }

        let checkbox_list = attendees
            .iter()
            .map(|name| format!("- [ ] {name}"))
            .collect::<Vec<_>>()
            .join("\n");

        let start = appt.start.format(DATETIME_FMT).to_string();
        let end = appt.end.format(DATETIME_FMT).to_string();
        let location = appt.location.as_deref().unwrap_or("");

        let content = render(
            &self.templates.meeting,
            &[
                ("MeetingSubject", appt.subject.as_str()),
                ("MeetingStart", &start),
                ("MeetingEnd", &end),
                ("MeetingLocation", location),
                ("MeetingOrganizer", appt.organizer.as_str()),
                ("AttendeesList", &checkbox_list),
            ],
        );

        let path = self.vault.meeting_note_path(&appt.subject, date);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Create-or-append one meeting mention in a person's log.
    ///
    /// First mention renders the person template; later mentions append a
    /// single list item, one per (person, meeting) pair.
    pub fn append_person_mention(&self, name: &str, mention: &str) -> Result<()> {
        let path = self.vault.person_log_path(name);
        let item = format!("- {mention}");

        if path.exists() {
            append(&path, &format!("\n{item}"))
        } else {
            let content = render(
                &self.templates.person,
                &[("PersonName", name), ("MeetingList", item.as_str())],
            );
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))
        }
    }

    /// Create-or-append the running log for a recurring series.
    pub fn write_series_entry(&self, appt: &Appointment) -> Result<SeriesOutcome> {
        let path = self.vault.series_log_path(&appt.subject);
        let date = appt.start_date();

        if path.exists() {
            let line = format!(
                "\n- [{} Meeting]({})",
                date.format(DATE_FMT),
                meeting_note_filename(&appt.subject, date)
            );
            append(&path, &line)?;
            Ok(SeriesOutcome::Appended)
        } else {
            // MeetingFrequency is deliberately not bound: the literal
            // placeholder survives in the file for manual completion.
            let next_date = date.format(DATE_FMT).to_string();
            let content = render(
                &self.templates.recurring,
                &[
                    ("MeetingSubject", appt.subject.as_str()),
                    ("NextMeetingDate", &next_date),
                    ("PastMeetingsList", ""),
                ],
            );
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(SeriesOutcome::Created)
        }
    }
}

fn append(path: &Path, text: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to append to {}", path.display()))
}
