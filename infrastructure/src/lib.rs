//! Infrastructure layer for secscope
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGeminiConfig, FileLoggingConfig,
    FileModelsConfig, FileOutputConfig, FileRecoveryConfig, FileServerConfig,
};
pub use logging::JsonlStageLogger;
pub use providers::{GeminiError, GeminiGenerator};
