use crate::constants::{DEFAULT_DISPLAY_NAME, DEFAULT_INITIAL};
use crate::error::NoteRejected;
use crate::types::Session;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub fn display_name_or_default(display_name: Option<&str>) -> &str {
    non_empty(display_name).unwrap_or(DEFAULT_DISPLAY_NAME)
}

/// First character of the display name, else of the email, else "U"; upper-cased.
pub fn avatar_initial(display_name: Option<&str>, email: Option<&str>) -> String {
    non_empty(display_name)
        .or_else(|| non_empty(email))
        .and_then(|text| text.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| DEFAULT_INITIAL.to_string())
}

/// Trimmed note content, or `None` when nothing but whitespace was entered.
pub fn note_content(raw: &str) -> Option<&str> {
    let content = raw.trim();
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Local checks an "add note" submission must pass before reaching the store.
pub fn validate_note<'a>(session: Option<&'a Session>, raw: &'a str) -> Result<(&'a Session, &'a str), NoteRejected> {
    let session = session.ok_or(NoteRejected::NoSession)?;
    let content = note_content(raw).ok_or(NoteRejected::Empty)?;
    Ok((session, content))
}
