//! Attendee-name and filename cleanup.

/// Characters that may not appear in note filenames.
const RESERVED_CHARS: &[char] = &[
    '\\', '/', ':', '*', '?', '"', '<', '>', '|', '@', '[', ']',
];

/// Maximum filename length, extension included.
pub const MAX_FILENAME_LEN: usize = 250;

/// Trim a raw attendee entry into a display name, or `None` when blank.
/// Case and interior whitespace are preserved.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Replace reserved characters with hyphens and trim the result.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '-' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Build a filename from a display string: sanitize the stem, bound the
/// total length (extension included) to `max_len` chars, then append the
/// extension.
///
/// Distinct inputs may collide after truncation; no dedupe suffixes are
/// added.
pub fn sanitize_filename(name: &str, extension: &str, max_len: usize) -> String {
    let stem = sanitize(name);
    let budget = max_len.saturating_sub(extension.chars().count());

    if stem.chars().count() > budget {
        let truncated: String = stem.chars().take(budget).collect();
        format!("{truncated}{extension}")
    } else {
        format!("{stem}{extension}")
    }
}
