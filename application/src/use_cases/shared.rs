//! Shared utilities for use cases.
//!
//! Contains cancellation checking and the cancellable generation helper used
//! by the retry policy and the router's vote.

use crate::ports::text_generator::{GenerationParams, GeneratorError, TextGenerator};
use crate::use_cases::resolve_structured::ResolveError;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(ResolveError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), ResolveError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(ResolveError::Cancelled);
    }
    Ok(())
}

/// Run one generation, racing it against the cancellation token.
///
/// The outer `Result` carries cancellation; the inner one is the
/// generator's own outcome, which callers record as a stage failure.
pub(crate) async fn generate_cancellable(
    generator: &dyn TextGenerator,
    prompt: &str,
    params: &GenerationParams,
    cancellation_token: &Option<CancellationToken>,
) -> Result<Result<String, GeneratorError>, ResolveError> {
    check_cancelled(cancellation_token)?;

    match cancellation_token {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(ResolveError::Cancelled),
                outcome = generator.generate(prompt, params) => Ok(outcome),
            }
        }
        None => Ok(generator.generate(prompt, params).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::scripted::ScriptedGenerator;
    use secscope_domain::Model;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(&None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(&Some(token.clone())).is_ok());
        token.cancel();
        assert_eq!(check_cancelled(&Some(token)), Err(ResolveError::Cancelled));
    }

    #[tokio::test]
    async fn test_generate_passes_through_outcome() {
        let generator = ScriptedGenerator::new(vec![
            Ok("hello".to_string()),
            Err(GeneratorError::Timeout),
        ]);
        let params = GenerationParams::deterministic(Model::Gemini25Flash, 10);

        let first = generate_cancellable(&generator, "p", &params, &None).await;
        assert_eq!(first, Ok(Ok("hello".to_string())));

        let second = generate_cancellable(&generator, "p", &params, &None).await;
        assert_eq!(second, Ok(Err(GeneratorError::Timeout)));
    }

    #[tokio::test]
    async fn test_generate_skipped_when_already_cancelled() {
        let generator = ScriptedGenerator::new(vec![Ok("unused".to_string())]);
        let params = GenerationParams::deterministic(Model::Gemini25Flash, 10);
        let token = CancellationToken::new();
        token.cancel();

        let outcome = generate_cancellable(&generator, "p", &params, &Some(token)).await;
        assert_eq!(outcome, Err(ResolveError::Cancelled));
        assert_eq!(generator.call_count(), 0);
    }
}
