//! Application layer for secscope
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RecoveryParams;
pub use ports::{
    stage_observer::{CompositeStageObserver, NoStageObserver, StageEvent, StageObserver},
    text_generator::{GenerationParams, GeneratorError, TextGenerator},
};
pub use use_cases::analyze_content::{AnalyzeContentUseCase, AnalyzeError, AnalyzeInput};
pub use use_cases::resolve_structured::{EscalatingRetryPolicy, ResolveError};
pub use use_cases::route_query::{RouteOutput, RouteQueryUseCase, ToolOutcome};
