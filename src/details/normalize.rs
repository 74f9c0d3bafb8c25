//! Whitespace and invisible-mark cleanup for scraped text.

/// Directional formatting marks that scraped pages leak into labels:
/// RLM, LRM, LRE and PDF.
const INVISIBLE_MARKS: [char; 4] = ['\u{200F}', '\u{200E}', '\u{202A}', '\u{202C}'];

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Removes invisible directional marks, collapses whitespace runs to a
/// single space and trims both ends.
///
/// A mark sitting between two spaces does not split the run, so
/// `"a \u{200F} b"` becomes `"a b"`. The function is idempotent.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.chars() {
        if INVISIBLE_MARKS.contains(&c) {
            continue;
        }
        if is_space(c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}
