//! Drives the note writers over one fetched batch of appointments.
//!
//! Appointments are processed strictly in chronological order, so file
//! creation and every append happen in the same order on every run over
//! the same input.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use notedir_core::Appointment;

use crate::notes::{NoteWriter, SeriesOutcome};
use crate::templates::TemplateSet;
use crate::vault::Vault;

/// What to do when one appointment fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failure; earlier writes stay on disk.
    FailFast,
    /// Process every appointment, reporting failures at the end.
    Continue,
}

#[derive(Debug, Default)]
pub struct RunStats {
    pub notes_written: usize,
    pub series_created: usize,
    pub series_appended: usize,
    pub failed: usize,
}

/// Per-appointment result: the note path written, or the failure cause.
pub struct AppointmentOutcome {
    pub subject: String,
    pub start: DateTime<Utc>,
    pub result: Result<PathBuf, String>,
}

pub struct RunReport {
    pub stats: RunStats,
    pub outcomes: Vec<AppointmentOutcome>,
}

impl RunReport {
    pub fn failures(&self) -> impl Iterator<Item = &AppointmentOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Run the pipeline over one batch.
///
/// Returns `Err` only for failures before any appointment is processed
/// (directory creation); per-appointment failures land in the report.
pub fn run(
    vault: &Vault,
    templates: &TemplateSet,
    appointments: &[Appointment],
    policy: ErrorPolicy,
) -> anyhow::Result<RunReport> {
    vault.ensure_dirs()?;

    // Sources are asked for ascending order; re-sort so append ordering
    // stays deterministic regardless of source behavior.
    let mut batch: Vec<&Appointment> = appointments.iter().collect();
    batch.sort_by_key(|a| a.start);

    let writer = NoteWriter::new(vault, templates);
    let mut stats = RunStats::default();
    let mut outcomes = Vec::with_capacity(batch.len());

    for appt in batch {
        match process_one(&writer, appt, &mut stats) {
            Ok(path) => {
                log::info!("Wrote {}", path.display());
                outcomes.push(AppointmentOutcome {
                    subject: appt.subject.clone(),
                    start: appt.start,
                    result: Ok(path),
                });
            }
            Err(err) => {
                stats.failed += 1;
                log::error!("Failed to process '{}': {:#}", appt.subject, err);
                outcomes.push(AppointmentOutcome {
                    subject: appt.subject.clone(),
                    start: appt.start,
                    result: Err(format!("{err:#}")),
                });
                if policy == ErrorPolicy::FailFast {
                    break;
                }
            }
        }
    }

    Ok(RunReport { stats, outcomes })
}

fn process_one(
    writer: &NoteWriter,
    appt: &Appointment,
    stats: &mut RunStats,
) -> anyhow::Result<PathBuf> {
    if appt.is_recurring {
        match writer.write_series_entry(appt)? {
            SeriesOutcome::Created => stats.series_created += 1,
            SeriesOutcome::Appended => stats.series_appended += 1,
        }
    }

    let path = writer.write_meeting_note(appt)?;
    stats.notes_written += 1;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_appointment(subject: &str, day: u32) -> Appointment {
        Appointment {
            subject: subject.to_string(),
            start: Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, day, 10, 30, 0).unwrap(),
            location: None,
            organizer: "Carol".to_string(),
            required_attendees: String::new(),
            is_recurring: false,
            recurrence: None,
        }
    }

    #[test]
    fn single_appointment_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());
        let templates = TemplateSet::builtin();

        let mut appt = make_appointment("1:1", 1);
        appt.required_attendees = "A;B".to_string();

        let report = run(&vault, &templates, &[appt], ErrorPolicy::FailFast).unwrap();

        assert_eq!(report.stats.notes_written, 1);
        assert_eq!(report.stats.failed, 0);
        assert!(vault.meeting_note_path("1:1", chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).exists());
        assert_eq!(std::fs::read_dir(vault.people_dir()).unwrap().count(), 2);
        assert_eq!(std::fs::read_dir(vault.recurring_dir()).unwrap().count(), 0);
    }

    #[test]
    fn recurring_series_created_then_appended_within_one_run() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());
        let templates = TemplateSet::builtin();

        let mut first = make_appointment("Standup", 4);
        first.is_recurring = true;
        first.recurrence = Some("FREQ=WEEKLY".to_string());
        let mut second = make_appointment("Standup", 11);
        second.is_recurring = true;
        second.recurrence = Some("FREQ=WEEKLY".to_string());

        let report = run(&vault, &templates, &[first, second], ErrorPolicy::FailFast).unwrap();

        assert_eq!(report.stats.series_created, 1);
        assert_eq!(report.stats.series_appended, 1);
        assert_eq!(report.stats.notes_written, 2);
    }

    #[test]
    fn appointments_are_processed_in_chronological_order() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());
        let templates = TemplateSet::builtin();

        // Delivered out of order on purpose.
        let batch = vec![
            make_appointment("later", 20),
            make_appointment("earlier", 5),
        ];

        let report = run(&vault, &templates, &batch, ErrorPolicy::FailFast).unwrap();

        let subjects: Vec<&str> = report.outcomes.iter().map(|o| o.subject.as_str()).collect();
        assert_eq!(subjects, vec!["earlier", "later"]);
    }

    /// Make the third of five appointments fail by planting a directory
    /// where its meeting note should go.
    fn plant_failure(vault: &Vault) {
        vault.ensure_dirs().unwrap();
        let bad = vault.meeting_note_path("three", chrono::NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        std::fs::create_dir_all(bad).unwrap();
    }

    #[test]
    fn fail_fast_aborts_remaining_appointments() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());
        let templates = TemplateSet::builtin();
        plant_failure(&vault);

        let batch: Vec<Appointment> = ["one", "two", "three", "four", "five"]
            .iter()
            .enumerate()
            .map(|(i, s)| make_appointment(s, i as u32 + 1))
            .collect();

        let report = run(&vault, &templates, &batch, ErrorPolicy::FailFast).unwrap();

        assert_eq!(report.stats.notes_written, 2);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.outcomes.len(), 3);

        let date = |d| chrono::NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        assert!(vault.meeting_note_path("one", date(1)).is_file());
        assert!(vault.meeting_note_path("two", date(2)).is_file());
        assert!(!vault.meeting_note_path("four", date(4)).exists());
        assert!(!vault.meeting_note_path("five", date(5)).exists());
    }

    #[test]
    fn keep_going_processes_the_rest_and_reports_the_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());
        let templates = TemplateSet::builtin();
        plant_failure(&vault);

        let batch: Vec<Appointment> = ["one", "two", "three", "four", "five"]
            .iter()
            .enumerate()
            .map(|(i, s)| make_appointment(s, i as u32 + 1))
            .collect();

        let report = run(&vault, &templates, &batch, ErrorPolicy::Continue).unwrap();

        assert_eq!(report.stats.notes_written, 4);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.failures().count(), 1);

        let date = |d| chrono::NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        assert!(vault.meeting_note_path("four", date(4)).is_file());
        assert!(vault.meeting_note_path("five", date(5)).is_file());
    }
}
