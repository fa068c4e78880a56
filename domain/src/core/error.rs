//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown or unsupported tool '{0}'")]
    UnknownTool(String),

    #[error("Invalid stage budget for {tool}: {reason}")]
    InvalidBudget { tool: String, reason: String },
}
