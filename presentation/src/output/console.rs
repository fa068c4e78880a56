//! Console output formatter for tool results

use colored::Colorize;
use secscope_application::{RouteOutput, ToolOutcome};
use secscope_domain::{Resolution, ToolName};
use serde_json::Value;

/// Formats routed and direct tool results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a routed result: routing decision, outcome, result body
    pub fn format_route(output: &RouteOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header(output.decision.tool.envelope_label()));
        text.push('\n');
        text.push_str(&format!(
            "{} {}\n",
            "Routing:".cyan().bold(),
            output.decision.basis
        ));

        match &output.outcome {
            ToolOutcome::Completed(resolution) => {
                text.push_str(&Self::resolution_summary(resolution));
            }
            ToolOutcome::Failed(message) => {
                text.push_str(&format!("{} {}\n", "Error:".red().bold(), message));
            }
        }

        text.push('\n');
        text.push_str(&Self::pretty(&output.outcome.to_value()));
        text.push_str(&Self::footer());
        text
    }

    /// Format a direct tool invocation
    pub fn format_tool(tool: ToolName, resolution: &Resolution) -> String {
        let mut text = String::new();

        text.push_str(&Self::header(tool.envelope_label()));
        text.push('\n');
        text.push_str(&Self::resolution_summary(resolution));
        text.push('\n');
        text.push_str(&Self::pretty(&resolution.result.to_value()));
        text.push_str(&Self::footer());
        text
    }

    /// Format as compact JSON
    pub fn format_json(value: &Value) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn resolution_summary(resolution: &Resolution) -> String {
        let generations = match resolution.generations() {
            1 => "1 generation".to_string(),
            n => format!("{} generations", n),
        };
        let mut text = format!(
            "{} {} ({})\n",
            "Stage:".cyan().bold(),
            resolution.stage,
            generations
        );

        if resolution.escalated() {
            let failed = resolution
                .attempts
                .iter()
                .filter(|attempt| !attempt.succeeded())
                .count();
            let detail = match failed {
                0 => "yes".to_string(),
                1 => "yes, 1 generation returned no text".to_string(),
                n => format!("yes, {} generations returned no text", n),
            };
            text.push_str(&format!("{} {}\n", "Escalated:".yellow().bold(), detail));
        }

        if !resolution.stage.is_generated() {
            let note = if resolution.result.is_structured() {
                "Degraded: keyword heuristic verdict"
            } else {
                "Degraded: no structured result; raw model output follows"
            };
            text.push_str(&format!("{}\n", note.yellow()));
        }
        text
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
