use crate::error::{Result, StashError};
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// Characters of surrounding text kept on each side of the selection.
pub const CONTEXT_CHARS: usize = 500;

/// Marker standing in for the selection inside the stored context.
pub const SNIPPET_MARKER: &str = "[[SNIPPET]]";

/// Minimum selection length, counted after trimming.
pub const MIN_SELECTION_CHARS: usize = 3;

/// How long the post-capture undo window stays open.
pub const UNDO_WINDOW_MS: u64 = 5000;

/// Trims the selection and rejects what remains when it is shorter than
/// [`MIN_SELECTION_CHARS`]. The trimmed text is what gets captured and what
/// the context search looks for.
pub fn validate_selection(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_SELECTION_CHARS {
        return Err(StashError::Api(format!(
            "Selection too short: at least {} characters required",
            MIN_SELECTION_CHARS
        )));
    }
    Ok(trimmed)
}

/// Decides the undo window: true when a line spelling `u` (any case)
/// arrives on `rx` before `window_ms` lapses. A lapsed window or a closed
/// channel keeps the capture.
pub fn undo_requested(rx: &Receiver<String>, window_ms: u64) -> bool {
    match rx.recv_timeout(Duration::from_millis(window_ms)) {
        Ok(line) => line.trim().eq_ignore_ascii_case("u"),
        Err(_) => false,
    }
}

/// Builds the stored context for a selection: up to [`CONTEXT_CHARS`]
/// characters on each side of its first occurrence in `document`, joined by
/// [`SNIPPET_MARKER`]. The selection itself is not included. Returns the
/// empty string when the selection does not occur verbatim in the document.
pub fn extract_context(document: &str, selection: &str) -> String {
    let start = match document.find(selection) {
        Some(idx) => idx,
        None => return String::new(),
    };
    let end = start + selection.len();

    let before = tail_chars(&document[..start], CONTEXT_CHARS);
    let after = head_chars(&document[end..], CONTEXT_CHARS);
    format!("{}{}{}", before, SNIPPET_MARKER, after)
}

/// Last `n` characters of `s`, or all of it when shorter.
fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// First `n` characters of `s`, or all of it when shorter.
fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
