//! Text generation providers

pub mod gemini;

pub use gemini::{GeminiError, GeminiGenerator};
