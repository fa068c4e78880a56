//! Wire types for `models/{model}:generateContent` and their conversion
//! into generator outcomes.

use secscope_application::{GenerationParams, GeneratorError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Finish reason of a candidate that completed normally.
const FINISH_STOP: &str = "STOP";

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub candidate_count: u32,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn new(prompt: &'a str, params: &GenerationParams) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
                candidate_count: 1,
            },
        }
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl Candidate {
    /// Text parts joined by newlines, trimmed.
    fn joined_text(&self) -> String {
        self.content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

impl GenerateContentResponse {
    /// Turn a decoded response into text or a generator error.
    ///
    /// A candidate that stopped early (token limit, safety, ...) still yields
    /// its partial text when it has any; the retry policy decides what to do
    /// with it.
    pub fn into_text(self) -> Result<String, GeneratorError> {
        let Some(candidate) = self.candidates.first() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => GeneratorError::Blocked(format!("prompt blocked: {}", reason)),
                None => GeneratorError::Empty("no candidates returned".to_string()),
            });
        };

        let text = candidate.joined_text();
        match candidate.finish_reason.as_deref() {
            Some(reason) if reason != FINISH_STOP => {
                warn!("Generation stopped early (finish_reason={})", reason);
                if text.is_empty() {
                    Err(GeneratorError::Blocked(format!("finish_reason={}", reason)))
                } else {
                    Ok(text)
                }
            }
            _ if text.is_empty() => Err(GeneratorError::Empty(
                "response had no text content".to_string(),
            )),
            _ => Ok(text),
        }
    }
}
