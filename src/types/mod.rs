pub mod case;
pub mod identifiers;
pub mod issue;
pub mod summary;

pub use case::{CaseDraft, DomainCase, ModuleToggles, Party, Priority, TransportMode};
pub use identifiers::{CaseId, KeyDigest, RunId};
pub use issue::{Severity, ValidationIssue, ValidationReport};
pub use summary::{
    Decision, Financials, Metric, Narrative, Overall, Provider, ResultsSummary, RiskFactor,
    RiskLayer, ShipmentInfo,
};
