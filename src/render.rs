//! Literal placeholder substitution for note templates.
//!
//! Templates are static markdown with `{{ Key }}` placeholders. There is
//! deliberately no templating language here: no conditionals, no loops,
//! just substitution.

use std::sync::OnceLock;

use regex::Regex;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid placeholder regex")
    })
}

/// Replace every `{{ key }}` with its bound value. Whitespace inside the
/// braces is insignificant. Placeholders without a binding are left
/// verbatim.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> String {
    placeholder_re()
        .replace_all(template, |caps: &regex::Captures| {
            let key = &caps[1];
            match bindings.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
