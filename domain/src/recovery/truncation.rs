//! Truncation check for raw model output.
//!
//! Gates the continuation stage: a reply is treated as cut off when it opens
//! more braces than it closes, or when it ends on an open brace or bracket.

/// Check whether `text` looks like a JSON document that was cut off.
///
/// ```
/// use secscope_domain::recovery::truncation::looks_truncated;
///
/// assert!(looks_truncated(r#"{"issues":[{"type":"injection""#));
/// assert!(looks_truncated("{\"issues\":[\n"));
/// assert!(!looks_truncated(r#"{"issues":[]}"#));
/// ```
pub fn looks_truncated(text: &str) -> bool {
    let open = text.matches('{').count();
    let close = text.matches('}').count();
    let trimmed = text.trim_end();
    open > close || trimmed.ends_with('{') || trimmed.ends_with('[')
}
