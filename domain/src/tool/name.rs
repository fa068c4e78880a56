//! Tool names

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The four analysis tools the router can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolName {
    Phishing,
    Vuln,
    Config,
    Classify,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::Phishing,
        ToolName::Vuln,
        ToolName::Config,
        ToolName::Classify,
    ];

    /// Short name used in requests, routing votes and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Phishing => "phishing",
            ToolName::Vuln => "vuln",
            ToolName::Config => "config",
            ToolName::Classify => "classify",
        }
    }

    /// Name reported in the router envelope's `tool` field.
    pub fn envelope_label(&self) -> &'static str {
        match self {
            ToolName::Phishing => "phishing",
            ToolName::Vuln => "vulnerability_scanner",
            ToolName::Config => "config_risk",
            ToolName::Classify => "classifier",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ToolName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phishing" => Ok(ToolName::Phishing),
            "vuln" => Ok(ToolName::Vuln),
            "config" => Ok(ToolName::Config),
            "classify" => Ok(ToolName::Classify),
            _ => Err(DomainError::UnknownTool(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for name in ToolName::ALL {
            assert_eq!(name.as_str().parse::<ToolName>().unwrap(), name);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" VULN ".parse::<ToolName>().unwrap(), ToolName::Vuln);
    }

    #[test]
    fn test_unknown_tool() {
        let err = "malware".parse::<ToolName>().unwrap_err();
        assert_eq!(err, DomainError::UnknownTool("malware".to_string()));
    }

    #[test]
    fn test_envelope_labels() {
        assert_eq!(ToolName::Vuln.envelope_label(), "vulnerability_scanner");
        assert_eq!(ToolName::Config.envelope_label(), "config_risk");
        assert_eq!(ToolName::Classify.envelope_label(), "classifier");
        assert_eq!(ToolName::Phishing.envelope_label(), "phishing");
    }
}
