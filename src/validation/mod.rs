pub mod completeness;
pub mod rules;

use serde_json::Value;

use crate::types::case::{CaseDraft, DomainCase};
use crate::types::issue::ValidationReport;
pub use completeness::{completeness_score, missing_fields, TRACKED_FIELDS};
pub use rules::{standard_rules, FnRule, RuleContext, ValidationRule};

/// Runs an ordered rule catalog over a case.
///
/// Every rule runs on every call; a failing rule never hides the others.
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(standard_rules())
    }
}

impl ValidationEngine {
    pub fn new(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
                ids.sort_unstable();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate rule id in catalog"
        );
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn validate(&self, case: &CaseDraft, ctx: &RuleContext) -> ValidationReport {
        let issues = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(case, ctx))
            .collect();
        ValidationReport::from_issues(issues)
    }

    pub fn validate_case(&self, case: &DomainCase, ctx: &RuleContext) -> ValidationReport {
        self.validate(&CaseDraft::from(case), ctx)
    }

    /// Resolve aliases from a raw object and validate without defaulting.
    pub fn validate_raw(&self, raw: &Value, ctx: &RuleContext) -> ValidationReport {
        self.validate(&CaseDraft::from_raw(raw), ctx)
    }
}

/// Validate against the standard catalog as of today.
pub fn validate(case: &CaseDraft) -> ValidationReport {
    ValidationEngine::standard().validate(case, &RuleContext::today())
}
