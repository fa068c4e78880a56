//! Tool domain
//!
//! Each analysis tool is a [`ToolSpec`]: prompt template, required keys,
//! bounded score fields, models and stage budgets. The retry policy is
//! generic over it.

pub mod catalog;
pub mod heuristic;
pub mod name;
pub mod spec;

pub use catalog::ToolCatalog;
pub use heuristic::classify_by_keywords;
pub use name::ToolName;
pub use spec::{FallbackPolicy, FieldDefault, PromptBuilder, StageBudgets, ToolSpec};
