//! Escalating retry policy.
//!
//! Turns one prompt into a [`Resolution`] by walking the escalation ladder:
//!
//! 1. **Primary**: fast model, temperature 0, primary budget.
//! 2. **Truncation check** on the primary text. It only gates continuation.
//! 3. **Recovery**: strong model, the prompt plus an explicit JSON-only
//!    instruction, recovery budget. Always runs when primary failed.
//! 4. **Continuation** (primary looked truncated): strong model asked for the
//!    missing suffix only, with the original prompt as context. The partial
//!    text and the continuation are concatenated before extraction. Repeated
//!    once against the recovery text when that also looked truncated.
//! 5. **Fallback**: bounded raw text of the primary and recovery stages.
//!
//! Generator failures are stage failures and escalate like parse failures.
//! Only cancellation ends the ladder early.

use crate::config::RecoveryParams;
use crate::ports::stage_observer::{NoStageObserver, StageEvent, StageObserver};
use crate::ports::text_generator::{GenerationParams, TextGenerator};
use crate::use_cases::shared::{check_cancelled, generate_cancellable};
use secscope_domain::util::truncate_str;
use secscope_domain::{
    AttemptOutcome, GenerationAttempt, JsonObject, PromptTemplate, RawFallback, RecoveryResult,
    Resolution, Stage, StageFailure, ToolSpec, looks_truncated,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors that end a `resolve` call without a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Operation cancelled")]
    Cancelled,
}

/// Drives the recovery engine across escalating generation stages.
pub struct EscalatingRetryPolicy {
    generator: Arc<dyn TextGenerator>,
    params: RecoveryParams,
    observer: Arc<dyn StageObserver>,
}

impl Clone for EscalatingRetryPolicy {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            params: self.params.clone(),
            observer: self.observer.clone(),
        }
    }
}

impl EscalatingRetryPolicy {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            params: RecoveryParams::default(),
            observer: Arc::new(NoStageObserver),
        }
    }

    pub fn with_params(mut self, params: RecoveryParams) -> Self {
        self.params = params;
        self
    }

    /// Create with a stage observer.
    pub fn with_observer(mut self, observer: Arc<dyn StageObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn params(&self) -> &RecoveryParams {
        &self.params
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    /// Report a stage transition to the observer.
    pub(crate) fn emit(&self, event: StageEvent) {
        debug!(event = event.event_type(), payload = %event.payload(), "stage event");
        self.observer.on_event(&event);
    }

    /// Resolve `prompt` into a structured or fallback result for `spec`.
    ///
    /// Never fails for generator or parse errors; those degrade to
    /// [`RecoveryResult::Unstructured`]. Returns `Err` only on cancellation.
    pub async fn resolve(
        &self,
        spec: &ToolSpec,
        prompt: &str,
        cancellation_token: &Option<CancellationToken>,
    ) -> Result<Resolution, ResolveError> {
        let tool = spec.name();
        let budgets = spec.budgets();
        let mut attempts: Vec<GenerationAttempt> = Vec::new();

        info!(tool = %tool, "Resolving: {}", truncate_str(prompt, 80));

        // ==================== Stage 1: Primary ====================
        self.emit(StageEvent::PrimaryAttempted {
            tool,
            model: spec.primary_model().clone(),
        });
        let primary = self
            .generate(
                Stage::Primary,
                prompt,
                GenerationParams::deterministic(spec.primary_model().clone(), budgets.primary),
                &mut attempts,
                cancellation_token,
            )
            .await?;
        if let Some(object) = self.evaluate(spec, Stage::Primary, &primary, None) {
            return Ok(self.succeed(spec, object, Stage::Primary, attempts));
        }

        // ==================== Stage 2: Truncation check ====================
        let primary_truncated = primary.text().is_some_and(looks_truncated);
        if primary_truncated {
            warn!(tool = %tool, "Primary output looks truncated");
            self.emit(StageEvent::TruncationDetected {
                tool,
                stage: Stage::Primary,
            });
        }

        // ==================== Stage 3: Recovery ====================
        warn!(tool = %tool, "Escalating to recovery with {}", spec.strong_model());
        self.emit(StageEvent::RecoveryAttempted {
            tool,
            model: spec.strong_model().clone(),
        });
        let recovery = self
            .generate(
                Stage::Recovery,
                &PromptTemplate::with_recovery(prompt),
                GenerationParams::deterministic(spec.strong_model().clone(), budgets.recovery),
                &mut attempts,
                cancellation_token,
            )
            .await?;
        if let Some(object) = self.evaluate(spec, Stage::Recovery, &recovery, None) {
            return Ok(self.succeed(spec, object, Stage::Recovery, attempts));
        }

        // ==================== Stage 4: Continuation ====================
        if primary_truncated && self.params.continuation {
            let mut sources: Vec<(Stage, &str)> = Vec::with_capacity(2);
            if let Some(text) = primary.text() {
                sources.push((Stage::Primary, text));
            }
            if let Some(text) = recovery.text()
                && looks_truncated(text)
            {
                self.emit(StageEvent::TruncationDetected {
                    tool,
                    stage: Stage::Recovery,
                });
                sources.push((Stage::Recovery, text));
            }

            let continuation_prompt = PromptTemplate::continuation(prompt);
            for (source, partial) in sources {
                warn!(tool = %tool, "Requesting continuation of {} output", source);
                self.emit(StageEvent::ContinuationAttempted { tool, source });
                let continuation = self
                    .generate(
                        Stage::Continuation,
                        &continuation_prompt,
                        GenerationParams::deterministic(
                            spec.strong_model().clone(),
                            budgets.continuation,
                        ),
                        &mut attempts,
                        cancellation_token,
                    )
                    .await?;
                let joined = continuation
                    .text()
                    .map(|suffix| format!("{}{}", partial.trim_end(), suffix.trim()));
                if let Some(object) =
                    self.evaluate(spec, Stage::Continuation, &continuation, joined.as_deref())
                {
                    return Ok(self.succeed(spec, object, Stage::Continuation, attempts));
                }
            }
        }

        // ==================== Stage 5: Fallback ====================
        error!(
            tool = %tool,
            generations = attempts.len(),
            "All stages failed; returning raw output"
        );
        self.emit(StageEvent::FallbackReached {
            tool,
            generations: attempts.len(),
        });
        let raw = RawFallback::bounded(
            &primary.diagnostic(),
            &recovery.diagnostic(),
            self.params.raw_output_limit,
        );
        Ok(Resolution::new(
            RecoveryResult::Unstructured(raw),
            Stage::Fallback,
            attempts,
        ))
    }

    /// Run one generation and record it as an attempt.
    async fn generate(
        &self,
        stage: Stage,
        prompt: &str,
        params: GenerationParams,
        attempts: &mut Vec<GenerationAttempt>,
        cancellation_token: &Option<CancellationToken>,
    ) -> Result<AttemptOutcome, ResolveError> {
        check_cancelled(cancellation_token)?;
        debug!(
            "{} generation: model={} max_tokens={} prompt_chars={}",
            stage,
            params.model,
            params.max_tokens,
            prompt.chars().count()
        );

        let outcome = match generate_cancellable(
            self.generator.as_ref(),
            prompt,
            &params,
            cancellation_token,
        )
        .await?
        {
            Ok(text) => AttemptOutcome::Text(text),
            Err(e) => AttemptOutcome::Failed(e.to_string()),
        };

        attempts.push(GenerationAttempt {
            stage,
            model: params.model,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            prompt_chars: prompt.chars().count(),
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// Conform the stage output (or `candidate`, when given) to the schema.
    fn evaluate(
        &self,
        spec: &ToolSpec,
        stage: Stage,
        outcome: &AttemptOutcome,
        candidate: Option<&str>,
    ) -> Option<JsonObject> {
        let conformed = match outcome {
            AttemptOutcome::Failed(reason) => Err(StageFailure::Generation {
                reason: reason.clone(),
            }),
            AttemptOutcome::Text(text) => spec.conform(candidate.unwrap_or(text)),
        };

        match conformed {
            Ok(object) => Some(object),
            Err(failure) => {
                warn!(tool = %spec.name(), "{} stage failed: {}", stage, failure);
                self.emit(StageEvent::StageFailed {
                    tool: spec.name(),
                    stage,
                    failure,
                });
                None
            }
        }
    }

    fn succeed(
        &self,
        spec: &ToolSpec,
        object: JsonObject,
        stage: Stage,
        attempts: Vec<GenerationAttempt>,
    ) -> Resolution {
        info!(
            tool = %spec.name(),
            generations = attempts.len(),
            "Structured result from {} stage",
            stage
        );
        self.emit(StageEvent::StageSucceeded {
            tool: spec.name(),
            stage,
            generations: attempts.len(),
        });
        Resolution::new(RecoveryResult::Structured(object), stage, attempts)
    }
}
