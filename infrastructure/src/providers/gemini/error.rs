//! Error types for the Gemini adapter

use thiserror::Error;

/// Errors that can occur while constructing the Gemini adapter.
///
/// Per-request failures are reported as
/// [`GeneratorError`](secscope_application::GeneratorError) instead.
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is required. Set {env} or gemini.api_key in the config file.")]
    MissingApiKey { env: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
