//! Tool-selection precedence table.
//!
//! Keyword rules are evaluated in order over the lower-cased query and
//! always win over the model's vote, except where a rule names a vote hint
//! (a substring of the vote that also satisfies the rule). Only when no rule
//! fires does an exact single-word vote count; otherwise the router defaults
//! to phishing.
//!
//! | # | Target | Query must contain all | ...and any of | Vote hint |
//! |---|--------|------------------------|---------------|-----------|
//! | 1 | vuln | scan, code | - | - |
//! | 2 | vuln | code | vulnerab, sql, injection | - |
//! | 3 | config | - | config, secret, policy, iam | - |
//! | 4 | phishing | - | email, click, link | phish |
//! | 5 | classify | - | label, confidence | class |

use crate::tool::name::ToolName;

/// Tool used when neither keywords nor the vote decide.
pub const DEFAULT_TOOL: ToolName = ToolName::Phishing;

/// One row of the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingRule {
    pub target: ToolName,
    pub all_of: &'static [&'static str],
    pub any_of: &'static [&'static str],
    pub vote_hint: Option<&'static str>,
}

impl RoutingRule {
    fn keywords_match(&self, query: &str) -> bool {
        if self.all_of.is_empty() && self.any_of.is_empty() {
            return false;
        }
        self.all_of.iter().all(|k| query.contains(k))
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| query.contains(k)))
    }

    fn vote_matches(&self, vote: &str) -> bool {
        self.vote_hint.is_some_and(|hint| vote.contains(hint))
    }

    /// Whether the rule fires for a lower-cased query and parsed vote.
    pub fn matches(&self, query: &str, vote: &str) -> bool {
        self.keywords_match(query) || self.vote_matches(vote)
    }
}

/// The fixed, ordered precedence table.
pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        target: ToolName::Vuln,
        all_of: &["scan", "code"],
        any_of: &[],
        vote_hint: None,
    },
    RoutingRule {
        target: ToolName::Vuln,
        all_of: &["code"],
        any_of: &["vulnerab", "sql", "injection"],
        vote_hint: None,
    },
    RoutingRule {
        target: ToolName::Config,
        all_of: &[],
        any_of: &["config", "secret", "policy", "iam"],
        vote_hint: None,
    },
    RoutingRule {
        target: ToolName::Phishing,
        all_of: &[],
        any_of: &["email", "click", "link"],
        vote_hint: Some("phish"),
    },
    RoutingRule {
        target: ToolName::Classify,
        all_of: &[],
        any_of: &["label", "confidence"],
        vote_hint: Some("class"),
    },
];

/// Why a tool was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingBasis {
    /// Row number (1-based) of the rule that fired.
    KeywordRule(usize),
    /// The model named the tool exactly.
    ModelVote,
    /// Nothing decided.
    Default,
}

impl std::fmt::Display for RoutingBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingBasis::KeywordRule(n) => write!(f, "keyword rule #{}", n),
            RoutingBasis::ModelVote => write!(f, "model vote"),
            RoutingBasis::Default => write!(f, "default"),
        }
    }
}

/// Selected tool plus the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingDecision {
    pub tool: ToolName,
    pub basis: RoutingBasis,
}

/// Normalize a raw routing reply to the single-word vote.
///
/// Lower-cases, trims and keeps the first whitespace-separated token.
pub fn parse_vote(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Apply the precedence table.
///
/// `vote` is the already-parsed vote (see [`parse_vote`]); an empty vote
/// means the routing generation failed.
pub fn select_tool(query: &str, vote: &str) -> RoutingDecision {
    let query = query.to_lowercase();

    for (idx, rule) in ROUTING_RULES.iter().enumerate() {
        if rule.matches(&query, vote) {
            return RoutingDecision {
                tool: rule.target,
                basis: RoutingBasis::KeywordRule(idx + 1),
            };
        }
    }

    if let Some(tool) = ToolName::ALL.into_iter().find(|t| t.as_str() == vote) {
        return RoutingDecision {
            tool,
            basis: RoutingBasis::ModelVote,
        };
    }

    RoutingDecision {
        tool: DEFAULT_TOOL,
        basis: RoutingBasis::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_code_routes_to_vuln_regardless_of_vote() {
        for vote in ["phishing", "classify", "", "config"] {
            let decision = select_tool("scan this code for sql injection", vote);
            assert_eq!(decision.tool, ToolName::Vuln);
            assert_eq!(decision.basis, RoutingBasis::KeywordRule(1));
        }
    }

    #[test]
    fn test_code_with_vulnerability_phrasing() {
        let decision = select_tool("Is there a vulnerability in this code?", "classify");
        assert_eq!(decision.tool, ToolName::Vuln);
        assert_eq!(decision.basis, RoutingBasis::KeywordRule(2));
    }

    #[test]
    fn test_email_link_routes_to_phishing() {
        let decision = select_tool("is this email asking me to click a link legit?", "vuln");
        assert_eq!(decision.tool, ToolName::Phishing);
        assert_eq!(decision.basis, RoutingBasis::KeywordRule(4));
    }

    #[test]
    fn test_config_keywords_beat_phishing_vote() {
        let decision = select_tool("check my IAM policy", "phishing");
        assert_eq!(decision.tool, ToolName::Config);
    }

    #[test]
    fn test_phish_vote_acts_as_tiebreaker() {
        let decision = select_tool("what do you make of this message?", "phishing.");
        assert_eq!(decision.tool, ToolName::Phishing);
        assert_eq!(decision.basis, RoutingBasis::KeywordRule(4));
    }

    #[test]
    fn test_class_vote_acts_as_tiebreaker() {
        let decision = select_tool("rate this text", "classification");
        assert_eq!(decision.tool, ToolName::Classify);
        assert_eq!(decision.basis, RoutingBasis::KeywordRule(5));
    }

    #[test]
    fn test_label_keyword() {
        let decision = select_tool("Give this a label with a confidence", "");
        assert_eq!(decision.tool, ToolName::Classify);
    }

    #[test]
    fn test_exact_vote_used_when_no_rule_fires() {
        let decision = select_tool("look at this terraform", "vuln");
        assert_eq!(decision.tool, ToolName::Vuln);
        assert_eq!(decision.basis, RoutingBasis::ModelVote);
    }

    #[test]
    fn test_inexact_vote_is_ignored() {
        let decision = select_tool("look at this terraform", "vulnerability");
        assert_eq!(decision.tool, ToolName::Phishing);
        assert_eq!(decision.basis, RoutingBasis::Default);
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let decision = select_tool("hello there", "");
        assert_eq!(decision, RoutingDecision {
            tool: ToolName::Phishing,
            basis: RoutingBasis::Default,
        });
    }

    #[test]
    fn test_parse_vote() {
        assert_eq!(parse_vote("  Vuln\n"), "vuln");
        assert_eq!(parse_vote("config - because secrets"), "config");
        assert_eq!(parse_vote(""), "");
        assert_eq!(parse_vote("   "), "");
    }

    #[test]
    fn test_empty_rule_never_matches() {
        let rule = RoutingRule {
            target: ToolName::Vuln,
            all_of: &[],
            any_of: &[],
            vote_hint: None,
        };
        assert!(!rule.matches("anything", "anything"));
    }

    #[test]
    fn test_basis_display() {
        assert_eq!(RoutingBasis::KeywordRule(3).to_string(), "keyword rule #3");
        assert_eq!(RoutingBasis::ModelVote.to_string(), "model vote");
    }
}
