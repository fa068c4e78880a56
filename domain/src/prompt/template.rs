//! Prompt templates for the analysis tools and the escalation ladder

/// Language hint used when the caller gives none.
pub const DEFAULT_LANGUAGE_HINT: &str = "auto";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Phishing / malware indicator analysis of a message
    pub fn phishing(content: &str, _language: &str) -> String {
        format!(
            r#"You are a cybersecurity analyst specializing in phishing and malware detection.
Analyze the message below.

Return ONLY a compact JSON object with exactly this structure (no markdown, no commentary):
{{"risk_level":"high|medium|low","score":<float between 0 and 1>,"indicators":["suspicious pattern or clue"],"summary":"1-2 sentences explaining why"}}

Message:
"""{}""""#,
            content
        )
    }

    /// Static vulnerability scan of a code snippet
    pub fn vulnerability(content: &str, language: &str) -> String {
        format!(
            r#"You are a senior application security analyst performing a static vulnerability scan.

Return ONLY valid JSON (no markdown, no explanation) with exactly this schema:
{{"issues":[{{"line":<line number or null>,"severity":"critical|high|medium|low","type":"injection|auth|crypto|unsafe_deserialization|info_leak|hardcoded_secret|other","description":"one sentence","suggestion":"one sentence fix"}}],"summary":"1-2 sentence summary of the most important issues"}}

Code language: {}
Code:
"""{}""""#,
            language, content
        )
    }

    /// Configuration / policy risk scan
    pub fn config_risk(content: &str, language: &str) -> String {
        format!(
            r#"You are a cloud security engineer reviewing configuration for security issues.
Return ONLY a COMPACT JSON object (no whitespace beyond structural necessity, no code fences, no extra text) matching:
{{"issues":[{{"location":"<file/path/line or null>","type":"exposed_secret|permissive_policy|public_resource|misconfiguration|info_leak|other","severity":"critical|high|medium|low","description":"one sentence","suggestion":"one sentence"}}],"summary":"1-2 sentence summary"}}

LANGUAGE_HINT:{}
INPUT:
"""{}""""#,
            language, content
        )
    }

    /// Risk classification into safe / suspicious / high-risk
    pub fn classification(content: &str, _language: &str) -> String {
        format!(
            r#"You are a risk classification agent. Output ONLY a COMPACT JSON object matching this schema exactly (no markdown, no commentary, no code fences):
{{"classification":"safe|suspicious|high-risk","confidence":<float between 0 and 1>,"explanation":"short 1-sentence rationale"}}

- "safe": no immediate security concerns.
- "suspicious": possible concerns that need review.
- "high-risk": likely security issues needing immediate attention.

INPUT:
"""{}""""#,
            content
        )
    }

    /// Instruction appended to the original prompt for the recovery stage
    pub fn recovery_instruction() -> &'static str {
        "Your previous output was incomplete or invalid. Re-output ONLY a compact, fully valid JSON object matching the schema above. No markdown, no commentary."
    }

    /// Original prompt followed by the recovery instruction
    pub fn with_recovery(prompt: &str) -> String {
        format!("{}\n\n{}", prompt, Self::recovery_instruction())
    }

    /// Continuation request
    ///
    /// Carries the original prompt as context, never the partial output, so
    /// the model does not simply repeat what it already produced.
    pub fn continuation(original_prompt: &str) -> String {
        format!(
            r#"The previous response started a JSON object but was cut off. Continue the JSON from where it left off and OUTPUT ONLY the remaining characters needed to complete the object (no extra text).

Context:
{}"#,
            original_prompt
        )
    }

    /// Routing prompt asking for a single tool name
    pub fn routing(query: &str) -> String {
        format!(
            r#"You are a routing agent for a cybersecurity toolkit.
Available tools:
- phishing: analyze suspicious emails/messages
- vuln: analyze code snippets for static vulnerabilities
- config: analyze config files for secrets/misconfigurations
- classify: label any input as safe / suspicious / high-risk with a confidence score

Return only the single word name of the best tool: phishing, vuln, config, or classify.

User request:
"""{}""""#,
            query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_prompts_embed_content() {
        let content = "password = 'hunter2'";
        assert!(PromptTemplate::phishing(content, DEFAULT_LANGUAGE_HINT).contains(content));
        assert!(PromptTemplate::classification(content, DEFAULT_LANGUAGE_HINT).contains(content));
        let vuln = PromptTemplate::vulnerability(content, "python");
        assert!(vuln.contains(content));
        assert!(vuln.contains("Code language: python"));
        let config = PromptTemplate::config_risk(content, "terraform");
        assert!(config.contains("LANGUAGE_HINT:terraform"));
    }

    #[test]
    fn test_schemas_are_literal_braces() {
        let prompt = PromptTemplate::classification("x", DEFAULT_LANGUAGE_HINT);
        assert!(prompt.contains(r#"{"classification":"safe|suspicious|high-risk""#));
    }

    #[test]
    fn test_recovery_appends_instruction() {
        let prompt = PromptTemplate::with_recovery("ORIGINAL");
        assert!(prompt.starts_with("ORIGINAL\n\n"));
        assert!(prompt.ends_with(PromptTemplate::recovery_instruction()));
    }

    #[test]
    fn test_continuation_carries_original_prompt() {
        let prompt = PromptTemplate::continuation("ORIGINAL");
        assert!(prompt.ends_with("Context:\nORIGINAL"));
        assert!(prompt.contains("ONLY the remaining characters"));
    }

    #[test]
    fn test_routing_lists_all_tools() {
        let prompt = PromptTemplate::routing("scan my code");
        for tool in ["phishing:", "vuln:", "config:", "classify:"] {
            assert!(prompt.contains(tool));
        }
        assert!(prompt.contains("scan my code"));
    }
}
