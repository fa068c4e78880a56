//! Model tier configuration from TOML (`[models]` section)

use secscope_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model tier configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// primary = "gemini-2.5-flash"   # First attempt of every tool
/// strong = "gemini-2.5-pro"      # Recovery and continuation
/// router = "gemini-2.5-flash"    # Routing vote
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub primary: Option<String>,
    pub strong: Option<String>,
    pub router: Option<String>,
}

impl FileModelsConfig {
    /// Parse a single model string, falling back to `default` and collecting
    /// an issue for empty names.
    fn parse_single_model(
        field: &str,
        value: Option<&String>,
        default: Model,
    ) -> (Model, Vec<ConfigIssue>) {
        match value {
            None => (default, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                default,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: field.to_string(),
                    },
                    format!("models.{}: model name cannot be empty", field),
                )],
            ),
            Some(s) => (Model::from(s.trim()), Vec::new()),
        }
    }

    pub fn parse_primary(&self) -> (Model, Vec<ConfigIssue>) {
        Self::parse_single_model("primary", self.primary.as_ref(), Model::default_primary())
    }

    /// Parse `models.strong`; a non-pro model draws a warning.
    pub fn parse_strong(&self) -> (Model, Vec<ConfigIssue>) {
        let (model, mut issues) =
            Self::parse_single_model("strong", self.strong.as_ref(), Model::default_strong());
        if issues.is_empty() && !model.is_strong_tier() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::WeakStrongModel {
                    model: model.as_str().to_string(),
                },
                format!(
                    "models.strong: '{}' is not a pro-tier model; recovery may not improve on the primary attempt",
                    model
                ),
            ));
        }
        (model, issues)
    }

    pub fn parse_router(&self) -> (Model, Vec<ConfigIssue>) {
        Self::parse_single_model("router", self.router.as_ref(), Model::default_primary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let config = FileModelsConfig::default();
        assert_eq!(config.parse_primary().0, Model::Gemini25Flash);
        assert_eq!(config.parse_strong().0, Model::Gemini25Pro);
        assert_eq!(config.parse_router().0, Model::Gemini25Flash);
    }

    #[test]
    fn test_custom_model_name() {
        let config = FileModelsConfig {
            strong: Some("gemini-3-pro-preview".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_strong();
        assert_eq!(model, Model::Custom("gemini-3-pro-preview".to_string()));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_flash_strong_model_warns() {
        let config = FileModelsConfig {
            strong: Some("gemini-2.5-flash".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_strong();
        assert_eq!(model, Model::Gemini25Flash);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::WeakStrongModel {
                model: "gemini-2.5-flash".to_string()
            }
        );
    }

    #[test]
    fn test_empty_name_is_error() {
        let config = FileModelsConfig {
            primary: Some("  ".to_string()),
            ..Default::default()
        };
        let (model, issues) = config.parse_primary();
        assert_eq!(model, Model::Gemini25Flash);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::EmptyModelName {
                field: "primary".to_string()
            }
        );
    }
}
