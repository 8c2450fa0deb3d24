//! Dry run: show what a pull would write, without touching the vault.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use notedir_core::{Appointment, AppointmentSource, DateRange, SubprocessSource};

use crate::config;
use crate::sanitize::normalize_name;
use crate::vault::Vault;

pub async fn run(from: Option<String>, to: Option<String>) -> Result<()> {
    let cfg = config::load_config()?;

    let range = DateRange::from_args(from.as_deref(), to.as_deref(), cfg.window_days)
        .map_err(|e| anyhow::anyhow!(e))?;

    let source = SubprocessSource::new(&cfg.source.provider, config::source_params(&cfg)?);
    let mut appointments = source.list_appointments(&range).await?;
    appointments.sort_by_key(|a| a.start);

    if appointments.is_empty() {
        println!("No appointments in range.");
        return Ok(());
    }

    let vault = Vault::new(config::vault_path(&cfg));
    let plan = plan(&vault, &appointments);

    for line in &plan {
        println!("{line}");
    }
    println!("\nRun `notedir pull` to write these notes.");

    Ok(())
}

/// Describe each planned write as a `+` (create) or `~` (overwrite/append)
/// line. Tracks paths the batch itself would create, so the second
/// occurrence of a series in one run shows as an append.
fn plan(vault: &Vault, appointments: &[Appointment]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut will_exist: HashSet<PathBuf> = HashSet::new();

    let exists = |path: &PathBuf, will_exist: &HashSet<PathBuf>| {
        path.exists() || will_exist.contains(path)
    };

    for appt in appointments {
        if appt.is_recurring {
            let series = vault.series_log_path(&appt.subject);
            if exists(&series, &will_exist) {
                lines.push(format!("~ {} (append)", series.display()));
            } else {
                lines.push(format!("+ {}", series.display()));
            }
            will_exist.insert(series);
        }

        let note = vault.meeting_note_path(&appt.subject, appt.start_date());
        if exists(&note, &will_exist) {
            lines.push(format!("~ {} (overwrite)", note.display()));
        } else {
            lines.push(format!("+ {}", note.display()));
        }
        will_exist.insert(note);

        for raw in appt.attendees() {
            let Some(name) = normalize_name(&raw) else {
                continue;
            };
            let log = vault.person_log_path(&name);
            if exists(&log, &will_exist) {
                lines.push(format!("~ {} (append)", log.display()));
            } else {
                lines.push(format!("+ {}", log.display()));
            }
            will_exist.insert(log);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_appointment(subject: &str, day: u32, recurring: bool) -> Appointment {
        Appointment {
            subject: subject.to_string(),
            start: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap(),
            location: None,
            organizer: String::new(),
            required_attendees: "Alice".to_string(),
            is_recurring: recurring,
            recurrence: recurring.then(|| "FREQ=WEEKLY".to_string()),
        }
    }

    #[test]
    fn plan_marks_second_series_occurrence_as_append() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());

        let batch = vec![
            make_appointment("Standup", 3, true),
            make_appointment("Standup", 10, true),
        ];
        let lines = plan(&vault, &batch);

        let series_lines: Vec<&String> = lines
            .iter()
            .filter(|l| l.contains("Recurring - Standup.md"))
            .collect();
        assert_eq!(series_lines.len(), 2);
        assert!(series_lines[0].starts_with('+'));
        assert!(series_lines[1].starts_with('~'));

        // Second mention of Alice is an append too.
        let person_lines: Vec<&String> =
            lines.iter().filter(|l| l.contains("Alice.md")).collect();
        assert_eq!(person_lines.len(), 2);
        assert!(person_lines[0].starts_with('+'));
        assert!(person_lines[1].starts_with('~'));
    }

    #[test]
    fn plan_is_read_only() {
        let tmp = tempfile::tempdir().unwrap();
        let vault = Vault::new(tmp.path());

        plan(&vault, &[make_appointment("Standup", 3, false)]);

        assert!(!vault.meetings_dir().exists());
        assert!(!vault.people_dir().exists());
        assert!(!vault.recurring_dir().exists());
    }
}
