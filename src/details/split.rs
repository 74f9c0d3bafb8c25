//! Repair of mangled key/value pairs from scraped "details" sections.
//!
//! Scraped detail tables are inconsistently shaped. Sometimes the key already
//! holds `"Label: Value"` and the value is empty or echoes the label,
//! sometimes the value repeats the key as a prefix or suffix
//! (`"Battery"` => `"Battery: 2 included"`). [`split`] recovers a clean pair.
//! It is a best-effort heuristic and never fails.

use super::normalize::normalize;
use super::DetailEntry;
use regex::Regex;
use tracing::debug;

/// Splits `s` at its first colon into trimmed halves.
fn split_first_colon(s: &str) -> Option<(String, String)> {
    s.split_once(':').map(|(left, right)| (left.trim().to_string(), right.trim().to_string()))
}

/// Recovers the canonical key/value pair from a raw detail entry.
pub fn split(raw_key: &str, raw_value: &str) -> DetailEntry {
    let mut key = normalize(raw_key);
    let mut value = normalize(raw_value);

    // "Label: Value" packed into the key, value empty or echoing the label
    if let Some((left, right)) = split_first_colon(&key) {
        let stripped = value.strip_suffix(':').unwrap_or(&value).trim().to_lowercase();
        let left_lower = left.to_lowercase();

        if !right.is_empty()
            && (value.is_empty() || stripped == left_lower || stripped.starts_with(&left_lower))
        {
            key = left;
            value = right;
        } else if right.is_empty() && value.is_empty() {
            key = left;
        }
    }

    if value.is_empty() {
        if let Some((left, right)) = split_first_colon(&key) {
            key = left;
            value = right;
        }
    }

    value = strip_key_echo(&key, value, true);
    // A value that is nothing but the key carries no information.
    value = strip_key_echo(&key, value, false);

    if let Some(bare) = key.strip_suffix(':') {
        key = bare.trim().to_string();
        value = strip_key_echo(&key, value, true);
        value = strip_key_echo(&key, value, false);
    }

    // Keys must not hold a colon; whatever follows it belongs to the value.
    if let Some((left, right)) = split_first_colon(&key) {
        key = left;
        value = match (right.is_empty(), value.is_empty()) {
            (true, _) => value,
            (false, true) => right,
            (false, false) => format!("{} {}", right, value),
        };
    }

    DetailEntry { key, value }
}

/// Strips the key when the value repeats it as a `": Key"` suffix or a
/// `"Key:"` prefix.
///
/// With `guard` set, a value equal to the key (ignoring case) is left alone.
/// Patterns that fail to compile skip their step and keep the value as is.
fn strip_key_echo(key: &str, mut value: String, guard: bool) -> String {
    if key.is_empty() || value.is_empty() {
        return value;
    }

    let escaped = regex::escape(key);

    match Regex::new(&format!(r"(?i)\s*:\s*{}\s*:?$", escaped)) {
        Ok(trailing) => {
            if trailing.is_match(&value) {
                value = trailing.replace(&value, "").trim().to_string();
            }
        }
        Err(e) => debug!("Skipping trailing key cleanup for {:?}: {}", key, e),
    }

    match Regex::new(&format!(r"(?i)^{}(?:\s*:\s*|\s+|$)", escaped)) {
        Ok(leading) => {
            let echoes_key = value.to_lowercase() == key.to_lowercase();
            if leading.is_match(&value) && !(guard && echoes_key) {
                value = leading.replace(&value, "").trim().to_string();
            }
        }
        Err(e) => debug!("Skipping leading key cleanup for {:?}: {}", key, e),
    }

    value
}
