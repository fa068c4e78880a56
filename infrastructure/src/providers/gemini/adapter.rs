//! Gemini text generator
//!
//! One `generateContent` POST per call; no retries at this level. The
//! escalating retry policy owns all retry behaviour.

use super::error::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use reqwest::Client;
use secscope_application::{GenerationParams, GeneratorError, TextGenerator};
use secscope_domain::Model;
use secscope_domain::util::truncate_str;
use std::time::Duration;
use tracing::debug;

/// Bytes of an error body kept in `GeneratorError::Http`.
const MAX_ERROR_BODY: usize = 500;

/// Header carrying the API key. The key never appears in the URL.
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Build from the `[gemini]` config section, resolving the API key.
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GeminiError> {
        let api_key = config
            .resolve_api_key()
            .ok_or_else(|| GeminiError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::new(config.base_url.clone(), api_key, config.timeout())
    }

    /// `generateContent` URL for `model`, without the key.
    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.as_str()
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GeneratorError> {
        let request = GenerateContentRequest::new(prompt, params);
        debug!(
            "Gemini request: model={} max_tokens={}",
            params.model, params.max_tokens
        );

        let response = self
            .client
            .post(self.endpoint(&params.model))
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, "request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GeneratorError::Http {
                status: status.as_u16(),
                body: truncate_str(&body, MAX_ERROR_BODY).to_string(),
            });
        }

        let decoded: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, "invalid response body"))?;

        decoded.into_text()
    }
}

/// Map a reqwest failure, dropping the request URL from the message.
fn transport_error(err: reqwest::Error, context: &str) -> GeneratorError {
    if err.is_timeout() {
        GeneratorError::Timeout
    } else {
        GeneratorError::Transport(format!("{}: {}", context, err.without_url()))
    }
}
