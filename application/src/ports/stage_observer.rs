//! Port for stage-transition observability.
//!
//! The retry policy reports every stage transition through
//! [`StageObserver`] in addition to `tracing`. Silent degradation to a
//! raw-text fallback is otherwise invisible to the caller, so adapters
//! typically persist these events (see the JSONL logger in the
//! infrastructure layer).

use secscope_domain::{Model, Stage, StageFailure, ToolName};
use serde_json::{Value, json};
use std::sync::Arc;

/// A stage transition inside one `resolve`/`analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    PrimaryAttempted {
        tool: ToolName,
        model: Model,
    },
    TruncationDetected {
        tool: ToolName,
        stage: Stage,
    },
    RecoveryAttempted {
        tool: ToolName,
        model: Model,
    },
    ContinuationAttempted {
        tool: ToolName,
        source: Stage,
    },
    StageSucceeded {
        tool: ToolName,
        stage: Stage,
        generations: usize,
    },
    StageFailed {
        tool: ToolName,
        stage: Stage,
        failure: StageFailure,
    },
    HeuristicApplied {
        tool: ToolName,
    },
    FallbackReached {
        tool: ToolName,
        generations: usize,
    },
}

impl StageEvent {
    /// Event type identifier used in structured logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            StageEvent::PrimaryAttempted { .. } => "primary_attempted",
            StageEvent::TruncationDetected { .. } => "truncation_detected",
            StageEvent::RecoveryAttempted { .. } => "recovery_attempted",
            StageEvent::ContinuationAttempted { .. } => "continuation_attempted",
            StageEvent::StageSucceeded { .. } => "stage_succeeded",
            StageEvent::StageFailed { .. } => "stage_failed",
            StageEvent::HeuristicApplied { .. } => "heuristic_applied",
            StageEvent::FallbackReached { .. } => "fallback_reached",
        }
    }

    pub fn tool(&self) -> ToolName {
        match self {
            StageEvent::PrimaryAttempted { tool, .. }
            | StageEvent::TruncationDetected { tool, .. }
            | StageEvent::RecoveryAttempted { tool, .. }
            | StageEvent::ContinuationAttempted { tool, .. }
            | StageEvent::StageSucceeded { tool, .. }
            | StageEvent::StageFailed { tool, .. }
            | StageEvent::HeuristicApplied { tool }
            | StageEvent::FallbackReached { tool, .. } => *tool,
        }
    }

    /// Event-specific fields as a JSON object (always includes `tool`).
    pub fn payload(&self) -> Value {
        let tool = self.tool().as_str();
        match self {
            StageEvent::PrimaryAttempted { model, .. } | StageEvent::RecoveryAttempted { model, .. } => {
                json!({ "tool": tool, "model": model.as_str() })
            }
            StageEvent::TruncationDetected { stage, .. } => {
                json!({ "tool": tool, "stage": stage.as_str() })
            }
            StageEvent::ContinuationAttempted { source, .. } => {
                json!({ "tool": tool, "source": source.as_str() })
            }
            StageEvent::StageSucceeded {
                stage, generations, ..
            } => json!({ "tool": tool, "stage": stage.as_str(), "generations": generations }),
            StageEvent::StageFailed { stage, failure, .. } => json!({
                "tool": tool,
                "stage": stage.as_str(),
                "failure": failure,
                "message": failure.to_string(),
            }),
            StageEvent::HeuristicApplied { .. } => json!({ "tool": tool }),
            StageEvent::FallbackReached { generations, .. } => {
                json!({ "tool": tool, "generations": generations })
            }
        }
    }
}

/// Receiver of stage transitions.
///
/// `on_event` is synchronous and infallible so observability can never
/// disrupt a request; adapters swallow their own failures.
pub trait StageObserver: Send + Sync {
    fn on_event(&self, event: &StageEvent);
}

/// No-op observer for tests and when structured logging is disabled.
pub struct NoStageObserver;

impl StageObserver for NoStageObserver {
    fn on_event(&self, _event: &StageEvent) {}
}

/// Observer that forwards every event to several delegates.
#[derive(Default)]
pub struct CompositeStageObserver {
    delegates: Vec<Arc<dyn StageObserver>>,
}

impl CompositeStageObserver {
    pub fn new(delegates: Vec<Arc<dyn StageObserver>>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, observer: Arc<dyn StageObserver>) {
        self.delegates.push(observer);
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl StageObserver for CompositeStageObserver {
    fn on_event(&self, event: &StageEvent) {
        for d in &self.delegates {
            d.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<&'static str>>);

    impl StageObserver for Recording {
        fn on_event(&self, event: &StageEvent) {
            self.0.lock().unwrap().push(event.event_type());
        }
    }

    #[test]
    fn test_payload_includes_tool() {
        let event = StageEvent::StageFailed {
            tool: ToolName::Config,
            stage: Stage::Recovery,
            failure: StageFailure::SchemaIncomplete {
                missing: vec!["issues".to_string()],
            },
        };
        let payload = event.payload();
        assert_eq!(payload["tool"], "config");
        assert_eq!(payload["stage"], "recovery");
        assert_eq!(payload["failure"]["kind"], "schema_incomplete");
        assert_eq!(payload["message"], "missing required keys: issues");
    }

    #[test]
    fn test_composite_fans_out() {
        let a = Arc::new(Recording::default());
        let b = Arc::new(Recording::default());
        let composite = CompositeStageObserver::new(vec![a.clone(), b.clone()]);

        composite.on_event(&StageEvent::HeuristicApplied {
            tool: ToolName::Classify,
        });

        assert_eq!(*a.0.lock().unwrap(), vec!["heuristic_applied"]);
        assert_eq!(*b.0.lock().unwrap(), vec!["heuristic_applied"]);
    }
}
