//! Output directory layout for generated notes.
//!
//! ```text
//! <vault>/
//!   meetings/   <date> - <subject>.md      one per occurrence, overwritten
//!   people/     <name>.md                  one per attendee, append-only
//!   recurring/  Recurring - <subject>.md   one per series, append-only
//! ```

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::sanitize::{sanitize_filename, MAX_FILENAME_LEN};

pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Vault { root: root.into() }
    }

    pub fn meetings_dir(&self) -> PathBuf {
        self.root.join("meetings")
    }

    pub fn people_dir(&self) -> PathBuf {
        self.root.join("people")
    }

    pub fn recurring_dir(&self) -> PathBuf {
        self.root.join("recurring")
    }

    /// Create the three note directories if absent.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        for dir in [self.meetings_dir(), self.people_dir(), self.recurring_dir()] {
            if !dir.exists() {
                log::info!("Creating {}", dir.display());
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }

    pub fn meeting_note_path(&self, subject: &str, date: NaiveDate) -> PathBuf {
        self.meetings_dir().join(meeting_note_filename(subject, date))
    }

    pub fn person_log_path(&self, name: &str) -> PathBuf {
        self.people_dir()
            .join(sanitize_filename(name, ".md", MAX_FILENAME_LEN))
    }

    pub fn series_log_path(&self, subject: &str) -> PathBuf {
        let name = format!("Recurring - {subject}");
        self.recurring_dir()
            .join(sanitize_filename(&name, ".md", MAX_FILENAME_LEN))
    }
}

/// `<date> - <subject>.md`, shared by the meeting writer and the link
/// lines appended to series logs.
pub fn meeting_note_filename(subject: &str, date: NaiveDate) -> String {
    let stem = format!("{} - {}", date.format("%Y-%m-%d"), subject);
    sanitize_filename(&stem, ".md", MAX_FILENAME_LEN)
}
