//! Escalation stages and the generation attempts made within them.

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// One step of the escalation ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Fast model, deterministic, stage-1 budget.
    Primary,
    /// Strong model, explicit re-ask, stage-2 budget.
    Recovery,
    /// Strong model asked for only the missing suffix.
    Continuation,
    /// Tool-specific keyword heuristic (classifier only).
    Heuristic,
    /// Raw-text payload after every stage failed.
    Fallback,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Primary => "primary",
            Stage::Recovery => "recovery",
            Stage::Continuation => "continuation",
            Stage::Heuristic => "heuristic",
            Stage::Fallback => "fallback",
        }
    }

    /// Whether this stage produced a model-parsed result.
    pub fn is_generated(&self) -> bool {
        matches!(self, Stage::Primary | Stage::Recovery | Stage::Continuation)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a stage did not produce a schema-conforming object.
///
/// All three kinds escalate identically; they differ only in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageFailure {
    /// The generator returned no usable text.
    Generation { reason: String },
    /// Text exists but holds no balanced JSON object.
    Parse,
    /// JSON parsed but required keys are missing.
    SchemaIncomplete { missing: Vec<String> },
}

impl std::fmt::Display for StageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageFailure::Generation { reason } => write!(f, "generation failed: {}", reason),
            StageFailure::Parse => write!(f, "no parseable JSON object"),
            StageFailure::SchemaIncomplete { missing } => {
                write!(f, "missing required keys: {}", missing.join(", "))
            }
        }
    }
}

/// Raw outcome of a single generator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Text(String),
    Failed(String),
}

impl AttemptOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            AttemptOutcome::Text(t) => Some(t),
            AttemptOutcome::Failed(_) => None,
        }
    }

    /// Text for diagnostics: the raw text, or an explanatory message.
    pub fn diagnostic(&self) -> String {
        match self {
            AttemptOutcome::Text(t) => t.trim().to_string(),
            AttemptOutcome::Failed(reason) => format!("generation failed: {}", reason),
        }
    }
}

/// A single request/response pair made during one `resolve` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationAttempt {
    pub stage: Stage,
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Length of the prompt in characters; the prompt itself is not retained.
    pub prompt_chars: usize,
    pub outcome: AttemptOutcome,
}

impl GenerationAttempt {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Continuation.to_string(), "continuation");
        assert!(Stage::Recovery.is_generated());
        assert!(!Stage::Heuristic.is_generated());
        assert!(!Stage::Fallback.is_generated());
    }

    #[test]
    fn test_failure_display() {
        let failure = StageFailure::SchemaIncomplete {
            missing: vec!["classification".to_string(), "confidence".to_string()],
        };
        assert_eq!(
            failure.to_string(),
            "missing required keys: classification, confidence"
        );
        let failure = StageFailure::Generation {
            reason: "Response was empty".to_string(),
        };
        assert_eq!(failure.to_string(), "generation failed: Response was empty");
    }

    #[test]
    fn test_outcome_diagnostic() {
        assert_eq!(AttemptOutcome::Text("  {\"a\" ".to_string()).diagnostic(), "{\"a\"");
        assert_eq!(
            AttemptOutcome::Failed("blocked".to_string()).diagnostic(),
            "generation failed: blocked"
        );
        assert!(AttemptOutcome::Failed("x".to_string()).text().is_none());
    }
}
