//! Text generator port
//!
//! Defines the interface for calling a generative model. The retry policy
//! only depends on this contract; vendor adapters live in the
//! infrastructure layer.

use async_trait::async_trait;
use secscope_domain::Model;
use thiserror::Error;

/// Errors a generator can report instead of text.
///
/// Every variant is a stage failure for the retry policy; none of them is
/// retried at this level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Empty response: {0}")]
    Empty(String),

    #[error("Generation blocked: {0}")]
    Blocked(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Parameters of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(model: Model, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model,
            temperature,
            max_tokens,
        }
    }

    /// Temperature 0.0. Every call the core makes is deterministic.
    pub fn deterministic(model: Model, max_tokens: u32) -> Self {
        Self::new(model, 0.0, max_tokens)
    }
}

/// Capability to turn a prompt into text.
///
/// Implementations must support temperature 0.0, at least two model tiers,
/// a max-output-token limit, and should salvage partial text when a
/// generation stops early.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GeneratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_params() {
        let params = GenerationParams::deterministic(Model::Gemini25Pro, 1200);
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.max_tokens, 1200);
        assert_eq!(params.model, Model::Gemini25Pro);
    }

    #[test]
    fn test_error_display() {
        let err = GeneratorError::Http {
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 429: quota");
        assert_eq!(GeneratorError::Timeout.to_string(), "Timeout");
    }
}
