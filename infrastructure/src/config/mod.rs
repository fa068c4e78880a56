//! Configuration file loading for secscope
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SECSCOPE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./secscope.toml` or `./.secscope.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/secscope/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGeminiConfig, FileLoggingConfig, FileModelsConfig,
    FileOutputConfig, FileRecoveryConfig, FileServerConfig, FileToolBudgetConfig,
    FileToolsConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
