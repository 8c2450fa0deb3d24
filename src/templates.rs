//! The three note templates and where they come from.
//!
//! Built-in defaults are always available; a templates directory can
//! override any of them per file (`meeting.md`, `person.md`,
//! `recurring.md`).

use anyhow::{Context, Result};
use notedir_core::NoteDirError;
use std::path::Path;

pub const DEFAULT_MEETING_TEMPLATE: &str = "\
# {{ MeetingSubject }}

- **When:** {{ MeetingStart }} to {{ MeetingEnd }}
- **Where:** {{ MeetingLocation }}
- **Organizer:** {{ MeetingOrganizer }}

## Attendees

{{ AttendeesList }}

## Notes

";

pub const DEFAULT_PERSON_TEMPLATE: &str = "\
# {{ PersonName }}

## Meetings

{{ MeetingList }}";

pub const DEFAULT_RECURRING_TEMPLATE: &str = "\
# {{ MeetingSubject }}

- **Frequency:** {{ MeetingFrequency }}
- **Next meeting:** {{ NextMeetingDate }}

## Past meetings
{{ PastMeetingsList }}";

/// The loaded template texts, one per note kind.
#[derive(Debug)]
pub struct TemplateSet {
    pub meeting: String,
    pub person: String,
    pub recurring: String,
}

impl TemplateSet {
    pub fn builtin() -> Self {
        TemplateSet {
            meeting: DEFAULT_MEETING_TEMPLATE.to_string(),
            person: DEFAULT_PERSON_TEMPLATE.to_string(),
            recurring: DEFAULT_RECURRING_TEMPLATE.to_string(),
        }
    }

    /// Load templates from `dir`, falling back to the built-in text for
    /// any file that does not exist.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(TemplateSet {
            meeting: load_or_default(dir, "meeting.md", DEFAULT_MEETING_TEMPLATE)?,
            person: load_or_default(dir, "person.md", DEFAULT_PERSON_TEMPLATE)?,
            recurring: load_or_default(dir, "recurring.md", DEFAULT_RECURRING_TEMPLATE)?,
        })
    }

    /// Write the default template files into `dir`, skipping any that
    /// already exist.
    pub fn write_defaults(dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create templates directory at {}", dir.display()))?;

        for (name, text) in [
            ("meeting.md", DEFAULT_MEETING_TEMPLATE),
            ("person.md", DEFAULT_PERSON_TEMPLATE),
            ("recurring.md", DEFAULT_RECURRING_TEMPLATE),
        ] {
            let path = dir.join(name);
            if path.exists() {
                continue;
            }
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write template {}", path.display()))?;
        }

        Ok(())
    }
}

fn load_or_default(dir: &Path, name: &str, default: &str) -> Result<String> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(default.to_string());
    }
    std::fs::read_to_string(&path).map_err(|e| {
        NoteDirError::Template(format!("Failed to read {}: {e}", path.display())).into()
    })
}
