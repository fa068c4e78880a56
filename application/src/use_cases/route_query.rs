//! Route Query use case.
//!
//! Picks a tool for a free-form query (keyword precedence table first, the
//! model's one-word vote as tie-breaker), runs it on the whole query and
//! wraps the outcome in the `{tool, result}` envelope. The envelope is
//! always produced: any fault inside the tool, including a panic or
//! cancellation, becomes `{"error": "..."}` in `result`.

use crate::ports::text_generator::GenerationParams;
use crate::use_cases::analyze_content::{AnalyzeContentUseCase, AnalyzeInput};
use crate::use_cases::shared::generate_cancellable;
use futures::FutureExt;
use secscope_domain::util::truncate_str;
use secscope_domain::{
    Model, PromptTemplate, Resolution, RoutingDecision, parse_vote, select_tool,
};
use serde_json::{Value, json};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// What the selected tool produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Completed(Resolution),
    /// The tool invocation itself faulted.
    Failed(String),
}

impl ToolOutcome {
    /// The `result` half of the envelope.
    pub fn to_value(&self) -> Value {
        match self {
            ToolOutcome::Completed(resolution) => resolution.result.to_value(),
            ToolOutcome::Failed(message) => json!({ "error": message }),
        }
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            ToolOutcome::Completed(resolution) => Some(resolution),
            ToolOutcome::Failed(_) => None,
        }
    }
}

/// Output of [`RouteQueryUseCase::route`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutput {
    pub decision: RoutingDecision,
    pub outcome: ToolOutcome,
}

impl RouteOutput {
    /// `{"tool": <label>, "result": <object>}`
    ///
    /// Completed runs carry the envelope label (`vulnerability_scanner`);
    /// faulted runs carry the short tool name (`vuln`).
    pub fn envelope(&self) -> Value {
        let tool = match self.outcome {
            ToolOutcome::Completed(_) => self.decision.tool.envelope_label(),
            ToolOutcome::Failed(_) => self.decision.tool.as_str(),
        };
        json!({
            "tool": tool,
            "result": self.outcome.to_value(),
        })
    }
}

/// Use case for routing a query to a tool.
#[derive(Clone)]
pub struct RouteQueryUseCase {
    analyze: AnalyzeContentUseCase,
    router_model: Model,
}

impl RouteQueryUseCase {
    pub fn new(analyze: AnalyzeContentUseCase) -> Self {
        Self {
            analyze,
            router_model: Model::default_primary(),
        }
    }

    pub fn with_router_model(mut self, model: Model) -> Self {
        self.router_model = model;
        self
    }

    /// Decide which tool handles `query`.
    ///
    /// A failed or cancelled vote counts as an empty vote; the keyword
    /// table and default still apply.
    pub async fn choose_tool(
        &self,
        query: &str,
        cancellation_token: &Option<CancellationToken>,
    ) -> RoutingDecision {
        let params = GenerationParams::deterministic(
            self.router_model.clone(),
            self.analyze.policy().params().router_max_tokens,
        );
        let prompt = PromptTemplate::routing(query);

        let vote = match generate_cancellable(
            self.analyze.policy().generator().as_ref(),
            &prompt,
            &params,
            cancellation_token,
        )
        .await
        {
            Ok(Ok(text)) => parse_vote(&text),
            Ok(Err(e)) => {
                warn!("Routing vote failed: {}", e);
                String::new()
            }
            Err(_) => String::new(),
        };

        select_tool(query, &vote)
    }

    /// Route `query`, run the selected tool on it and report the outcome.
    pub async fn route(
        &self,
        query: &str,
        cancellation_token: &Option<CancellationToken>,
    ) -> RouteOutput {
        let decision = self.choose_tool(query, cancellation_token).await;
        info!(
            "Router selected tool: {} ({}) for query: {}",
            decision.tool,
            decision.basis,
            truncate_str(query, 120)
        );

        let input = AnalyzeInput::new(decision.tool, query);
        let run = AssertUnwindSafe(self.analyze.execute(input, cancellation_token));
        let outcome = match run.catch_unwind().await {
            Ok(Ok(resolution)) => ToolOutcome::Completed(resolution),
            Ok(Err(e)) => {
                error!("Error while running tool '{}': {}", decision.tool, e);
                ToolOutcome::Failed(e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Tool '{}' panicked: {}", decision.tool, message);
                ToolOutcome::Failed(message)
            }
        };

        RouteOutput { decision, outcome }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
