//! Configuration issues reported by file-config validation.
//!
//! Issues carry a severity: [`Severity::Error`] aborts startup,
//! [`Severity::Warning`] is logged and the value falls back to its default.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model field is present but blank.
    EmptyModelName { field: String },
    /// A `[tools.<name>]` section names no known tool.
    UnknownTool { name: String },
    /// A token budget is zero.
    ZeroBudget { field: String },
    /// The raw-output limit is zero.
    ZeroRawOutputLimit,
    /// `server.bind` is not a socket address.
    InvalidBindAddress { value: String },
    /// A recovery budget below the primary budget was raised.
    BudgetRaised { tool: String },
    /// `models.strong` is not a pro-tier model.
    WeakStrongModel { model: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::ZeroRawOutputLimit, "limit is zero");
        assert!(issue.is_error());
        let issue = ConfigIssue::warning(
            ConfigIssueCode::BudgetRaised {
                tool: "vuln".to_string(),
            },
            "raised",
        );
        assert!(!issue.is_error());
    }

    #[test]
    fn test_display() {
        let issue = ConfigIssue::error(
            ConfigIssueCode::EmptyModelName {
                field: "primary".to_string(),
            },
            "models.primary: model name cannot be empty",
        );
        assert_eq!(
            issue.to_string(),
            "error: models.primary: model name cannot be empty"
        );
    }
}
