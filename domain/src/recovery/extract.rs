//! JSON Recovery Engine.
//!
//! Pulls a single JSON object out of free-form model output. Model replies
//! arrive wrapped in code fences, prefixed with prose, or cut off mid-object;
//! [`extract_json`] handles all three without ever calling back into a model.
//!
//! The scan is a two-state automaton:
//!
//! | State | On `{` | On `}` | Other |
//! |-------|--------|--------|-------|
//! | `Seeking` | enter `Inside { depth: 1 }` | ignore | ignore |
//! | `Inside { depth }` | `depth + 1` | `depth - 1`, stop at 0 | append |
//!
//! # Known limitation
//!
//! Braces inside JSON string literals are counted like structural braces.
//! A description such as `"use {} carefully"` is balanced and harmless, but
//! a lone `"}"` inside a string closes the object early. The first parse
//! then fails and the second pass (first `{` to last `}`) usually recovers
//! the full object.

use serde_json::{Map, Value};

/// Code-fence delimiters stripped before scanning.
const FENCE_MARKERS: [&str; 2] = ["```json", "```"];

/// A parsed JSON object.
pub type JsonObject = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Seeking,
    Inside { depth: usize },
}

/// Remove code-fence markers and surrounding whitespace.
pub fn strip_fences(text: &str) -> String {
    let mut cleaned = text.to_string();
    for marker in FENCE_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.trim().to_string()
}

/// Brace-balanced candidate starting at the first `{`.
///
/// Returns the byte offset of the opening brace, the candidate slice and
/// whether the automaton saw the object close. An unclosed candidate runs to
/// the end of the input.
fn balanced_candidate(cleaned: &str) -> Option<(usize, &str, bool)> {
    let mut state = ScanState::Seeking;
    let mut start = 0;

    for (idx, ch) in cleaned.char_indices() {
        state = match (state, ch) {
            (ScanState::Seeking, '{') => {
                start = idx;
                ScanState::Inside { depth: 1 }
            }
            (ScanState::Seeking, _) => ScanState::Seeking,
            (ScanState::Inside { depth }, '{') => ScanState::Inside { depth: depth + 1 },
            (ScanState::Inside { depth: 1 }, '}') => {
                return Some((start, &cleaned[start..=idx], true));
            }
            (ScanState::Inside { depth }, '}') => ScanState::Inside { depth: depth - 1 },
            (inside, _) => inside,
        };
    }

    match state {
        ScanState::Seeking => None,
        ScanState::Inside { .. } => Some((start, &cleaned[start..], false)),
    }
}

/// Extract the first JSON object from arbitrary model output.
///
/// 1. Strip code fences and whitespace.
/// 2. Find the first `{`; no brace means no JSON.
/// 3. Take the brace-balanced span and parse it.
/// 4. On failure, parse from the first `{` to the last `}` instead.
///
/// Returns `None` when neither span parses as an object. Truncated input
/// never yields a partial object.
///
/// # Examples
///
/// ```
/// use secscope_domain::recovery::extract::extract_json;
///
/// let reply = "Here you go:\n```json\n{\"issues\":[]}\n```";
/// let object = extract_json(reply).unwrap();
/// assert_eq!(object["issues"], serde_json::json!([]));
///
/// assert!(extract_json(r#"{"issues": [{"type":"injection""#).is_none());
/// assert!(extract_json("no json here").is_none());
/// ```
pub fn extract_json(text: &str) -> Option<JsonObject> {
    let cleaned = strip_fences(text);
    let (start, candidate, _closed) = balanced_candidate(&cleaned)?;

    if let Ok(object) = serde_json::from_str::<JsonObject>(candidate) {
        return Some(object);
    }

    let last = cleaned.rfind('}')?;
    if last <= start {
        return None;
    }
    serde_json::from_str::<JsonObject>(&cleaned[start..=last]).ok()
}
