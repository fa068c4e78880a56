//! Analyze Content use case.
//!
//! Runs one analysis tool directly against a piece of content: render the
//! tool prompt, resolve it through the [`EscalatingRetryPolicy`] and, for
//! tools with a keyword heuristic, replace a raw-text fallback with the
//! heuristic's verdict.

use crate::ports::stage_observer::StageEvent;
use crate::use_cases::resolve_structured::{EscalatingRetryPolicy, ResolveError};
use secscope_domain::{
    DomainError, FallbackPolicy, RecoveryResult, Resolution, Stage, ToolCatalog, ToolName,
    classify_by_keywords,
};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Errors that can occur during analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<ResolveError> for AnalyzeError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Cancelled => AnalyzeError::Cancelled,
        }
    }
}

/// Input for the [`AnalyzeContentUseCase`].
#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub tool: ToolName,
    pub content: String,
    /// Language hint for code and config tools. `None` means `auto`.
    pub language: Option<String>,
}

impl AnalyzeInput {
    pub fn new(tool: ToolName, content: impl Into<String>) -> Self {
        Self {
            tool,
            content: content.into(),
            language: None,
        }
    }

    /// Build from a raw tool name, rejecting unknown names.
    pub fn parse(tool: &str, content: impl Into<String>) -> Result<Self, AnalyzeError> {
        Ok(Self::new(ToolName::from_str(tool)?, content))
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }
}

/// Use case for running one tool against content.
pub struct AnalyzeContentUseCase {
    policy: EscalatingRetryPolicy,
    catalog: Arc<ToolCatalog>,
}

impl Clone for AnalyzeContentUseCase {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

impl AnalyzeContentUseCase {
    pub fn new(policy: EscalatingRetryPolicy, catalog: Arc<ToolCatalog>) -> Self {
        Self { policy, catalog }
    }

    pub fn policy(&self) -> &EscalatingRetryPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Analyze `input.content` with `input.tool`.
    pub async fn execute(
        &self,
        input: AnalyzeInput,
        cancellation_token: &Option<CancellationToken>,
    ) -> Result<Resolution, AnalyzeError> {
        let spec = self.catalog.get(input.tool);
        let prompt = spec.render_prompt(&input.content, input.language.as_deref());

        let resolution = self
            .policy
            .resolve(spec, &prompt, cancellation_token)
            .await?;

        if resolution.result.is_structured() || spec.fallback() != FallbackPolicy::KeywordHeuristic
        {
            return Ok(resolution);
        }

        info!(tool = %input.tool, "Applying keyword heuristic after fallback");
        self.policy
            .emit(StageEvent::HeuristicApplied { tool: input.tool });
        Ok(Resolution::new(
            RecoveryResult::Structured(classify_by_keywords(&input.content)),
            Stage::Heuristic,
            resolution.attempts,
        ))
    }
}
