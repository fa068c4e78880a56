//! Recovery results. The only value that crosses the tool boundary.

use super::attempt::{GenerationAttempt, Stage};
use super::extract::JsonObject;
use crate::util::bound_chars;
use serde::Serialize;
use serde_json::{Value, json};

/// Documented bound on each raw text carried by a fallback payload.
pub const DEFAULT_RAW_OUTPUT_LIMIT: usize = 1200;

/// Key marking an unstructured payload in serialized results.
pub const RAW_OUTPUT_KEY: &str = "raw_output";

/// Bounded raw text from the primary and recovery stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFallback {
    pub primary: String,
    pub retry: String,
}

impl RawFallback {
    /// Build a fallback payload, trimming each text and cutting it at `limit`
    /// characters.
    pub fn bounded(primary: &str, retry: &str, limit: usize) -> Self {
        Self {
            primary: bound_chars(primary.trim(), limit),
            retry: bound_chars(retry.trim(), limit),
        }
    }
}

/// Either a schema-conforming object or bounded raw text for diagnosis.
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryResult {
    Structured(JsonObject),
    Unstructured(RawFallback),
}

impl RecoveryResult {
    pub fn is_structured(&self) -> bool {
        matches!(self, RecoveryResult::Structured(_))
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            RecoveryResult::Structured(object) => Some(object),
            RecoveryResult::Unstructured(_) => None,
        }
    }

    /// Serialize to the wire shape: the object itself, or
    /// `{"raw_output": {"primary": .., "retry": ..}}`.
    pub fn to_value(&self) -> Value {
        match self {
            RecoveryResult::Structured(object) => Value::Object(object.clone()),
            RecoveryResult::Unstructured(raw) => json!({ RAW_OUTPUT_KEY: raw }),
        }
    }
}

impl Serialize for RecoveryResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// Outcome of a full `resolve`/`analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub result: RecoveryResult,
    /// Stage that produced `result`.
    pub stage: Stage,
    /// Every generator call made, in order.
    pub attempts: Vec<GenerationAttempt>,
}

impl Resolution {
    pub fn new(result: RecoveryResult, stage: Stage, attempts: Vec<GenerationAttempt>) -> Self {
        Self {
            result,
            stage,
            attempts,
        }
    }

    /// Number of generator calls made.
    pub fn generations(&self) -> usize {
        self.attempts.len()
    }

    /// True when anything beyond the primary stage was needed.
    pub fn escalated(&self) -> bool {
        self.stage != Stage::Primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::TRUNCATION_MARKER;

    #[test]
    fn test_structured_serializes_as_object() {
        let object = json!({"issues": [], "summary": ""}).as_object().cloned().unwrap();
        let result = RecoveryResult::Structured(object);
        assert!(result.is_structured());
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"issues": [], "summary": ""}));
    }

    #[test]
    fn test_unstructured_serializes_under_raw_output() {
        let result = RecoveryResult::Unstructured(RawFallback::bounded(" {\"issues\": [ ", "", 1200));
        assert!(!result.is_structured());
        assert_eq!(
            result.to_value(),
            json!({"raw_output": {"primary": "{\"issues\": [", "retry": ""}})
        );
    }

    #[test]
    fn test_fallback_is_bounded() {
        let long = "x".repeat(DEFAULT_RAW_OUTPUT_LIMIT + 50);
        let raw = RawFallback::bounded(&long, "short", DEFAULT_RAW_OUTPUT_LIMIT);
        assert_eq!(
            raw.primary.chars().count(),
            DEFAULT_RAW_OUTPUT_LIMIT + TRUNCATION_MARKER.chars().count()
        );
        assert!(raw.primary.ends_with(TRUNCATION_MARKER));
        assert_eq!(raw.retry, "short");
    }
}
