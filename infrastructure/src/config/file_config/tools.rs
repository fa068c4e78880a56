//! Per-tool budget overrides from TOML (`[tools.<name>]` sections)

use secscope_domain::tool::catalog::default_budgets;
use secscope_domain::{ConfigIssue, ConfigIssueCode, StageBudgets, ToolName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Budget overrides for one tool. Absent fields keep the built-in budget.
///
/// # Example
///
/// ```toml
/// [tools.vuln]
/// primary_tokens = 900
/// recovery_tokens = 1600
/// continuation_tokens = 800
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolBudgetConfig {
    pub primary_tokens: Option<u32>,
    pub recovery_tokens: Option<u32>,
    pub continuation_tokens: Option<u32>,
}

/// All `[tools.<name>]` sections, keyed by the raw section name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileToolsConfig(pub BTreeMap<String, FileToolBudgetConfig>);

impl FileToolsConfig {
    /// Resolve every section into `(tool, budgets)` overrides.
    ///
    /// Unknown section names and zero budgets are errors; a recovery budget
    /// below the primary budget is raised and reported as a warning.
    pub fn parse_budgets(&self) -> (Vec<(ToolName, StageBudgets)>, Vec<ConfigIssue>) {
        let mut overrides = Vec::new();
        let mut issues = Vec::new();

        for (section, raw) in &self.0 {
            let name = match ToolName::from_str(section) {
                Ok(name) => name,
                Err(_) => {
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::UnknownTool {
                            name: section.clone(),
                        },
                        format!(
                            "tools.{}: unknown tool (expected one of phishing, vuln, config, classify)",
                            section
                        ),
                    ));
                    continue;
                }
            };

            let defaults = default_budgets(name);
            let primary = raw.primary_tokens.unwrap_or(defaults.primary);
            let recovery = raw.recovery_tokens.unwrap_or(defaults.recovery);
            let continuation = raw.continuation_tokens.unwrap_or(defaults.continuation);

            let mut zero = false;
            for (field, value) in [
                ("primary_tokens", primary),
                ("recovery_tokens", recovery),
                ("continuation_tokens", continuation),
            ] {
                if value == 0 {
                    zero = true;
                    issues.push(ConfigIssue::error(
                        ConfigIssueCode::ZeroBudget {
                            field: format!("tools.{}.{}", section, field),
                        },
                        format!("tools.{}.{}: budget cannot be 0", section, field),
                    ));
                }
            }
            if zero {
                continue;
            }

            if recovery < primary {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::BudgetRaised {
                        tool: name.as_str().to_string(),
                    },
                    format!(
                        "tools.{}: recovery_tokens ({}) raised to primary_tokens ({})",
                        section, recovery, primary
                    ),
                ));
            }

            match StageBudgets::new(name, primary, recovery, continuation) {
                Ok(budgets) => overrides.push((name, budgets)),
                Err(e) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroBudget {
                        field: format!("tools.{}", section),
                    },
                    e.to_string(),
                )),
            }
        }

        (overrides, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secscope_domain::Severity;

    fn config(section: &str, budgets: FileToolBudgetConfig) -> FileToolsConfig {
        FileToolsConfig(BTreeMap::from([(section.to_string(), budgets)]))
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tools = config(
            "vuln",
            FileToolBudgetConfig {
                primary_tokens: Some(900),
                ..Default::default()
            },
        );
        let (overrides, issues) = tools.parse_budgets();
        assert!(issues.is_empty());
        assert_eq!(overrides.len(), 1);
        let (name, budgets) = overrides[0];
        assert_eq!(name, ToolName::Vuln);
        assert_eq!(budgets.primary, 900);
        assert_eq!(budgets.recovery, 1200);
        assert_eq!(budgets.continuation, 600);
    }

    #[test]
    fn test_recovery_below_primary_is_raised_with_warning() {
        let tools = config(
            "classify",
            FileToolBudgetConfig {
                primary_tokens: Some(500),
                ..Default::default()
            },
        );
        let (overrides, issues) = tools.parse_budgets();
        assert_eq!(overrides[0].1.recovery, 500);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_unknown_tool_and_zero_budget() {
        let mut map = BTreeMap::new();
        map.insert("malware".to_string(), FileToolBudgetConfig::default());
        map.insert(
            "config".to_string(),
            FileToolBudgetConfig {
                continuation_tokens: Some(0),
                ..Default::default()
            },
        );
        let (overrides, issues) = FileToolsConfig(map).parse_budgets();
        assert!(overrides.is_empty());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.is_error()));
    }
}
