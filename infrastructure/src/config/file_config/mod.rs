//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! types by the `to_*` methods.

mod logging;
mod models;
mod output;
mod providers;
mod recovery;
mod server;
mod tools;

pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use output::FileOutputConfig;
pub use providers::FileGeminiConfig;
pub use recovery::FileRecoveryConfig;
pub use server::FileServerConfig;
pub use tools::{FileToolBudgetConfig, FileToolsConfig};

use secscope_application::RecoveryParams;
use secscope_domain::{ConfigIssue, ConfigIssueCode, ToolCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration that cannot be used at all.
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model tiers
    pub models: FileModelsConfig,
    /// Gemini API settings
    pub gemini: FileGeminiConfig,
    /// Retry policy settings
    pub recovery: FileRecoveryConfig,
    /// Per-tool budget overrides
    pub tools: FileToolsConfig,
    /// HTTP boundary settings
    pub server: FileServerConfig,
    /// Stage log settings
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Empty model names
    /// 2. Tool sections (unknown names, zero budgets, raised recovery budgets)
    /// 3. The raw-output limit and router budget
    /// 4. The server bind address
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Model parse validation (catches empty names)
        issues.extend(self.models.parse_primary().1);
        issues.extend(self.models.parse_strong().1);
        issues.extend(self.models.parse_router().1);

        // 2. Tool budgets
        issues.extend(self.tools.parse_budgets().1);

        // 3. Recovery limits
        if self.recovery.raw_output_limit == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRawOutputLimit,
                "recovery.raw_output_limit cannot be 0",
            ));
        }
        if self.recovery.router_max_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroBudget {
                    field: "recovery.router_max_tokens".to_string(),
                },
                "recovery.router_max_tokens cannot be 0",
            ));
        }

        // 4. Server
        issues.extend(self.server.parse_bind().1);

        issues
    }

    /// Fail on any error-severity issue, returning the warnings otherwise.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }

    /// Build the tool catalog: built-in specs with configured models and
    /// budget overrides applied. Invalid sections are skipped; call
    /// [`check`](Self::check) first to reject them.
    pub fn to_tool_catalog(&self) -> ToolCatalog {
        let primary = self.models.parse_primary().0;
        let strong = self.models.parse_strong().0;

        let mut catalog = ToolCatalog::builtin().with_models(&primary, &strong);
        for (name, budgets) in self.tools.parse_budgets().0 {
            catalog = catalog.with_budgets(name, budgets);
        }
        catalog
    }

    pub fn to_recovery_params(&self) -> RecoveryParams {
        self.recovery.to_recovery_params()
    }
}
