//! Google Gemini provider
//!
//! Implements the [`TextGenerator`](secscope_application::TextGenerator)
//! port over the Generative Language REST API (`generateContent`).

mod adapter;
mod error;
mod types;

pub use adapter::GeminiGenerator;
pub use error::GeminiError;
