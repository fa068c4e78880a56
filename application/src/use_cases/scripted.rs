//! Scripted generator shared by use case tests.

use crate::ports::text_generator::{GenerationParams, GeneratorError, TextGenerator};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A recorded generator call.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub prompt: String,
    pub params: GenerationParams,
}

/// Replays a fixed list of outcomes and records every call.
///
/// Once the script runs out every further call fails with `Empty`.
pub(crate) struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<Result<String, GeneratorError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGenerator {
    pub fn new(outcomes: Vec<Result<String, GeneratorError>>) -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::from(outcomes)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GeneratorError> {
        self.calls.lock().unwrap().push(Call {
            prompt: prompt.to_string(),
            params: params.clone(),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GeneratorError::Empty("script exhausted".to_string())))
    }
}

/// Generator whose calls never complete; used for cancellation tests.
pub(crate) struct PendingGenerator;

#[async_trait]
impl TextGenerator for PendingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, GeneratorError> {
        std::future::pending().await
    }
}
