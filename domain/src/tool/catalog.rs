//! Built-in tool specifications.

use super::name::ToolName;
use super::spec::{FallbackPolicy, FieldDefault, StageBudgets, ToolSpec};
use crate::core::model::Model;
use crate::prompt::PromptTemplate;

const PHISHING_REQUIRED: &[&str] = &["risk_level", "score"];
const ISSUES_REQUIRED: &[&str] = &["issues"];
const CLASSIFY_REQUIRED: &[&str] = &["classification", "confidence"];

const PHISHING_DEFAULTS: &[(&str, FieldDefault)] = &[
    ("indicators", FieldDefault::EmptyList),
    ("summary", FieldDefault::EmptyString),
];
const ISSUES_DEFAULTS: &[(&str, FieldDefault)] = &[("summary", FieldDefault::EmptyString)];
const CLASSIFY_DEFAULTS: &[(&str, FieldDefault)] = &[("explanation", FieldDefault::EmptyString)];

/// Built-in (primary, recovery, continuation) token budgets.
pub fn default_budgets(name: ToolName) -> StageBudgets {
    let (primary, recovery, continuation) = match name {
        ToolName::Phishing => (800, 1200, 600),
        ToolName::Vuln => (700, 1200, 600),
        ToolName::Config => (800, 1400, 600),
        ToolName::Classify => (200, 300, 200),
    };
    StageBudgets {
        primary,
        recovery,
        continuation,
    }
}

/// Built-in specification for one tool.
pub fn builtin_spec(name: ToolName) -> ToolSpec {
    let budgets = default_budgets(name);
    match name {
        ToolName::Phishing => ToolSpec::new(
            name,
            PromptTemplate::phishing,
            PHISHING_REQUIRED,
            &["score"],
            PHISHING_DEFAULTS,
            FallbackPolicy::RawText,
            budgets,
        ),
        ToolName::Vuln => ToolSpec::new(
            name,
            PromptTemplate::vulnerability,
            ISSUES_REQUIRED,
            &[],
            ISSUES_DEFAULTS,
            FallbackPolicy::RawText,
            budgets,
        ),
        ToolName::Config => ToolSpec::new(
            name,
            PromptTemplate::config_risk,
            ISSUES_REQUIRED,
            &[],
            ISSUES_DEFAULTS,
            FallbackPolicy::RawText,
            budgets,
        ),
        ToolName::Classify => ToolSpec::new(
            name,
            PromptTemplate::classification,
            CLASSIFY_REQUIRED,
            &["confidence"],
            CLASSIFY_DEFAULTS,
            FallbackPolicy::KeywordHeuristic,
            budgets,
        ),
    }
}

/// The full set of tool specifications, one per [`ToolName`].
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    phishing: ToolSpec,
    vuln: ToolSpec,
    config: ToolSpec,
    classify: ToolSpec,
}

impl ToolCatalog {
    /// Catalog with built-in prompts, schemas, models and budgets.
    pub fn builtin() -> Self {
        Self {
            phishing: builtin_spec(ToolName::Phishing),
            vuln: builtin_spec(ToolName::Vuln),
            config: builtin_spec(ToolName::Config),
            classify: builtin_spec(ToolName::Classify),
        }
    }

    /// Use the given model tiers for every tool.
    pub fn with_models(self, primary: &Model, strong: &Model) -> Self {
        Self {
            phishing: self.phishing.with_models(primary.clone(), strong.clone()),
            vuln: self.vuln.with_models(primary.clone(), strong.clone()),
            config: self.config.with_models(primary.clone(), strong.clone()),
            classify: self.classify.with_models(primary.clone(), strong.clone()),
        }
    }

    /// Override one tool's stage budgets.
    pub fn with_budgets(mut self, name: ToolName, budgets: StageBudgets) -> Self {
        let slot = self.slot_mut(name);
        *slot = slot.clone().with_budgets(budgets);
        self
    }

    pub fn get(&self, name: ToolName) -> &ToolSpec {
        match name {
            ToolName::Phishing => &self.phishing,
            ToolName::Vuln => &self.vuln,
            ToolName::Config => &self.config,
            ToolName::Classify => &self.classify,
        }
    }

    fn slot_mut(&mut self, name: ToolName) -> &mut ToolSpec {
        match name {
            ToolName::Phishing => &mut self.phishing,
            ToolName::Vuln => &mut self.vuln,
            ToolName::Config => &mut self.config,
            ToolName::Classify => &mut self.classify,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolSpec> {
        ToolName::ALL.into_iter().map(|name| self.get(name))
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_tool() {
        let catalog = ToolCatalog::builtin();
        for name in ToolName::ALL {
            assert_eq!(catalog.get(name).name(), name);
        }
        assert_eq!(catalog.iter().count(), 4);
    }

    #[test]
    fn test_required_keys() {
        let catalog = ToolCatalog::builtin();
        assert_eq!(catalog.get(ToolName::Vuln).required_keys(), &["issues"]);
        assert_eq!(catalog.get(ToolName::Config).required_keys(), &["issues"]);
        assert_eq!(
            catalog.get(ToolName::Classify).required_keys(),
            &["classification", "confidence"]
        );
        assert_eq!(
            catalog.get(ToolName::Phishing).required_keys(),
            &["risk_level", "score"]
        );
    }

    #[test]
    fn test_only_classifier_uses_heuristic() {
        let catalog = ToolCatalog::builtin();
        for spec in catalog.iter() {
            let expected = if spec.name() == ToolName::Classify {
                FallbackPolicy::KeywordHeuristic
            } else {
                FallbackPolicy::RawText
            };
            assert_eq!(spec.fallback(), expected);
        }
    }

    #[test]
    fn test_recovery_budget_never_below_primary() {
        for name in ToolName::ALL {
            let budgets = default_budgets(name);
            assert!(budgets.recovery >= budgets.primary);
        }
    }

    #[test]
    fn test_model_and_budget_overrides() {
        let primary = Model::Gemini25FlashLite;
        let strong = Model::Custom("gemini-3-pro-preview".to_string());
        let budgets = StageBudgets::new(ToolName::Config, 1000, 2000, 800).unwrap();
        let catalog = ToolCatalog::builtin()
            .with_models(&primary, &strong)
            .with_budgets(ToolName::Config, budgets);

        assert_eq!(catalog.get(ToolName::Vuln).primary_model(), &primary);
        assert_eq!(catalog.get(ToolName::Classify).strong_model(), &strong);
        assert_eq!(catalog.get(ToolName::Config).budgets(), budgets);
        assert_eq!(
            catalog.get(ToolName::Vuln).budgets(),
            default_budgets(ToolName::Vuln)
        );
    }
}
