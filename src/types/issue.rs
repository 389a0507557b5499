use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
}

/// One finding produced by a validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable rule id, e.g. `required.pol`.
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub detail: String,
    /// Dot-paths into the case, e.g. `seller.email`.
    pub affected_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        id: &str,
        severity: Severity,
        message: impl Into<String>,
        detail: impl Into<String>,
        affected_fields: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            severity,
            message: message.into(),
            detail: detail.into(),
            affected_fields: affected_fields.iter().map(|f| f.to_string()).collect(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Outcome of one validation pass. Issues keep rule-catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no critical issue was raised.
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let valid = !issues.iter().any(|i| i.severity == Severity::Critical);
        Self { valid, issues }
    }

    pub fn of_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn critical(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.of_severity(Severity::Critical)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.of_severity(Severity::Warning)
    }

    pub fn suggestions(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.of_severity(Severity::Suggestion)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.of_severity(severity).count()
    }

    pub fn find(&self, id: &str) -> Option<&ValidationIssue> {
        self.issues.iter().find(|i| i.id == id)
    }
}
