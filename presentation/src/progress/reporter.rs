//! Console stage reporter
//!
//! Prints retry-policy stage transitions to stderr so a user can see when a
//! tool escalated or degraded. stdout stays reserved for the result.

use colored::Colorize;
use secscope_application::{StageEvent, StageObserver};

/// Reports stage transitions as one colored line each on stderr
pub struct StageReporter;

impl StageReporter {
    pub fn new() -> Self {
        Self
    }

    /// Render one event as a single line.
    pub fn render(event: &StageEvent) -> String {
        match event {
            StageEvent::PrimaryAttempted { tool, model } => {
                format!("{} {} via {}", "->".cyan(), tool.as_str().bold(), model)
            }
            StageEvent::TruncationDetected { tool, stage } => format!(
                "{} {}: {} output looks truncated",
                "!".yellow(),
                tool.as_str().bold(),
                stage
            ),
            StageEvent::RecoveryAttempted { tool, model } => format!(
                "{} {}: retrying with {}",
                "->".yellow(),
                tool.as_str().bold(),
                model
            ),
            StageEvent::ContinuationAttempted { tool, source } => format!(
                "{} {}: requesting continuation of {} output",
                "->".yellow(),
                tool.as_str().bold(),
                source
            ),
            StageEvent::StageSucceeded {
                tool,
                stage,
                generations,
            } => format!(
                "{} {}: structured result from {} ({} generation{})",
                "v".green(),
                tool.as_str().bold(),
                stage,
                generations,
                if *generations == 1 { "" } else { "s" }
            ),
            StageEvent::StageFailed {
                tool,
                stage,
                failure,
            } => format!(
                "{} {}: {} failed: {}",
                "x".red(),
                tool.as_str().bold(),
                stage,
                failure
            ),
            StageEvent::HeuristicApplied { tool } => format!(
                "{} {}: falling back to keyword heuristic",
                "!".yellow(),
                tool.as_str().bold()
            ),
            StageEvent::FallbackReached { tool, generations } => format!(
                "{} {}: no structured result after {} generations, returning raw output",
                "x".red().bold(),
                tool.as_str().bold(),
                generations
            ),
        }
    }
}

impl Default for StageReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StageObserver for StageReporter {
    fn on_event(&self, event: &StageEvent) {
        eprintln!("{}", Self::render(event));
    }
}
