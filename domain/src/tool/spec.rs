//! Tool specification: one analysis domain's prompt, schema and budgets.

use super::name::ToolName;
use crate::core::{error::DomainError, model::Model};
use crate::prompt::DEFAULT_LANGUAGE_HINT;
use crate::recovery::{
    JsonObject, StageFailure, extract_json, sanitize::sanitize_bounded_fields,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Builds the tool prompt from raw input and a language hint.
pub type PromptBuilder = fn(&str, &str) -> String;

/// Max output tokens per escalation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBudgets {
    pub primary: u32,
    pub recovery: u32,
    pub continuation: u32,
}

impl StageBudgets {
    /// Validate a budget set. Zero budgets are rejected; a recovery budget
    /// below the primary budget is raised to match it.
    pub fn new(
        tool: ToolName,
        primary: u32,
        recovery: u32,
        continuation: u32,
    ) -> Result<Self, DomainError> {
        if primary == 0 || recovery == 0 || continuation == 0 {
            return Err(DomainError::InvalidBudget {
                tool: tool.to_string(),
                reason: "token budgets must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            primary,
            recovery: recovery.max(primary),
            continuation,
        })
    }
}

/// What a tool returns when every generation stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Bounded raw text for manual diagnosis.
    RawText,
    /// Deterministic keyword classification.
    KeywordHeuristic,
}

/// Value inserted for an optional key missing from a structured result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    EmptyString,
    EmptyList,
}

impl FieldDefault {
    fn value(&self) -> Value {
        match self {
            FieldDefault::EmptyString => Value::String(String::new()),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Immutable configuration of one analysis domain.
///
/// Built once at startup (see [`ToolCatalog`](super::catalog::ToolCatalog))
/// and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    name: ToolName,
    prompt_builder: PromptBuilder,
    required_keys: &'static [&'static str],
    bounded_fields: &'static [&'static str],
    default_fields: &'static [(&'static str, FieldDefault)],
    fallback: FallbackPolicy,
    primary_model: Model,
    strong_model: Model,
    budgets: StageBudgets,
}

impl ToolSpec {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: ToolName,
        prompt_builder: PromptBuilder,
        required_keys: &'static [&'static str],
        bounded_fields: &'static [&'static str],
        default_fields: &'static [(&'static str, FieldDefault)],
        fallback: FallbackPolicy,
        budgets: StageBudgets,
    ) -> Self {
        Self {
            name,
            prompt_builder,
            required_keys,
            bounded_fields,
            default_fields,
            fallback,
            primary_model: Model::default_primary(),
            strong_model: Model::default_strong(),
            budgets,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_models(mut self, primary: Model, strong: Model) -> Self {
        self.primary_model = primary;
        self.strong_model = strong;
        self
    }

    pub fn with_budgets(mut self, budgets: StageBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    // ==================== Accessors ====================

    pub fn name(&self) -> ToolName {
        self.name
    }

    pub fn required_keys(&self) -> &[&'static str] {
        self.required_keys
    }

    pub fn bounded_fields(&self) -> &[&'static str] {
        self.bounded_fields
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn primary_model(&self) -> &Model {
        &self.primary_model
    }

    pub fn strong_model(&self) -> &Model {
        &self.strong_model
    }

    pub fn budgets(&self) -> StageBudgets {
        self.budgets
    }

    // ==================== Behaviour ====================

    /// Render the tool prompt. A missing or blank hint becomes `auto`.
    pub fn render_prompt(&self, content: &str, language_hint: Option<&str>) -> String {
        let hint = language_hint
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE_HINT);
        (self.prompt_builder)(content, hint)
    }

    /// Required keys absent from `object`, in declaration order.
    pub fn missing_keys(&self, object: &JsonObject) -> Vec<String> {
        self.required_keys
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| key.to_string())
            .collect()
    }

    /// Sanitize bounded fields and fill optional defaults.
    pub fn finalize(&self, mut object: JsonObject) -> JsonObject {
        sanitize_bounded_fields(&mut object, self.bounded_fields);
        for (key, default) in self.default_fields {
            object
                .entry(key.to_string())
                .or_insert_with(|| default.value());
        }
        object
    }

    /// Run the recovery engine over `text` and check the schema.
    ///
    /// Returns the finalized object, or the reason it does not count as
    /// structured.
    pub fn conform(&self, text: &str) -> Result<JsonObject, StageFailure> {
        let object = extract_json(text).ok_or(StageFailure::Parse)?;
        let missing = self.missing_keys(&object);
        if !missing.is_empty() {
            return Err(StageFailure::SchemaIncomplete { missing });
        }
        Ok(self.finalize(object))
    }
}
