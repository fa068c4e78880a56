//! Domain layer for secscope
//!
//! This crate contains the core logic of the request router: tool
//! specifications, the JSON recovery engine and the routing precedence
//! table. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Four analysis tools (phishing, vuln, config, classify) are each described
//! by a [`ToolSpec`]: a prompt template, the keys a reply must contain to
//! count as structured, the bounded score fields, the model tiers and the
//! per-stage token budgets.
//!
//! ## Recovery
//!
//! [`extract_json`] recovers a single JSON object from free-form model
//! output. The escalating retry policy in the application layer drives it
//! after every generation and degrades to a bounded [`RecoveryResult::Unstructured`]
//! payload when nothing conforms.
//!
//! ## Routing
//!
//! [`select_tool`] applies the fixed keyword precedence table, consulting
//! the model's vote only as tie-breaker or last resort.

pub mod config;
pub mod core;
pub mod prompt;
pub mod recovery;
pub mod routing;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model};
pub use prompt::{DEFAULT_LANGUAGE_HINT, PromptTemplate};
pub use recovery::{
    AttemptOutcome, DEFAULT_RAW_OUTPUT_LIMIT, GenerationAttempt, JsonObject, RawFallback,
    RecoveryResult, Resolution, Stage, StageFailure, extract_json, looks_truncated,
};
pub use routing::{RoutingBasis, RoutingDecision, parse_vote, select_tool};
pub use tool::{
    FallbackPolicy, StageBudgets, ToolCatalog, ToolName, ToolSpec, classify_by_keywords,
};
