//! Keyword-based risk classification, used when every generation stage of
//! the classifier failed.

use crate::recovery::JsonObject;
use serde_json::{Value, json};

const HIGH_RISK_MARKERS: &[&str] = &[
    "password",
    "aws_",
    "secret",
    "apikey",
    "ssn",
    "credit card",
    "private key",
];

const SUSPICIOUS_MARKERS: &[&str] = &[
    "suspicious",
    "click here",
    "urgent",
    "verify",
    "account locked",
    "transfer",
];

/// Classify `content` by keyword.
///
/// Always returns a schema-conforming classifier object with a fixed
/// confidence per label.
pub fn classify_by_keywords(content: &str) -> JsonObject {
    let lower = content.to_lowercase();
    let contains_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    let value = if contains_any(HIGH_RISK_MARKERS) {
        json!({
            "classification": "high-risk",
            "confidence": 0.85,
            "explanation": "Detected probable secret or sensitive data in text."
        })
    } else if contains_any(SUSPICIOUS_MARKERS) {
        json!({
            "classification": "suspicious",
            "confidence": 0.6,
            "explanation": "Text contains language often associated with phishing or suspicious actions."
        })
    } else {
        json!({
            "classification": "safe",
            "confidence": 0.35,
            "explanation": "No obvious indicators of risk detected; manual review recommended for ambiguous cases."
        })
    };

    match value {
        Value::Object(object) => object,
        _ => JsonObject::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_high_risk() {
        let object = classify_by_keywords("db PASSWORD=hunter2");
        assert_eq!(object["classification"], "high-risk");
        assert_eq!(object["confidence"], 0.85);
    }

    #[test]
    fn test_high_risk_wins_over_suspicious() {
        let object = classify_by_keywords("URGENT: verify your aws_secret now");
        assert_eq!(object["classification"], "high-risk");
    }

    #[test]
    fn test_phishing_language_is_suspicious() {
        let object = classify_by_keywords("Your account locked. Click here to restore.");
        assert_eq!(object["classification"], "suspicious");
        assert_eq!(object["confidence"], 0.6);
    }

    #[test]
    fn test_default_is_safe() {
        let object = classify_by_keywords("cron job completed in 3s");
        assert_eq!(object["classification"], "safe");
        assert_eq!(object["confidence"], 0.35);
        assert!(object["explanation"].as_str().is_some());
    }
}
