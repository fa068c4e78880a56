//! Prompt domain
//!
//! Templates for each analysis tool plus the escalation and routing prompts.

mod template;

pub use template::{DEFAULT_LANGUAGE_HINT, PromptTemplate};
