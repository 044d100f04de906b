//! Helpers for putting operator-supplied strings into log lines.
//! Message bodies may span lines and credentials must never reach a log file.

/// Longest preview of operator text kept in a log line: one GSM-7 SMS segment.
const LOG_PREVIEW_CHARS: usize = 160;

/// Render operator text as one log line: backslash, CR, LF and tab become their
/// escape sequences, other control characters become `\xNN`, and anything past
/// [`LOG_PREVIEW_CHARS`] characters is replaced by a trailing `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(LOG_PREVIEW_CHARS) + 8);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(LOG_PREVIEW_CHARS) {
        push_escaped(&mut out, ch);
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    use std::fmt::Write;
    match ch {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => {
            let _ = write!(out, "\\x{:02X}", c as u32);
        }
        c => out.push(c),
    }
}

/// Replace a secret with a fixed-width mask; only emptiness is revealed.
pub fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "********"
    }
}
