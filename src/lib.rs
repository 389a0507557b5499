//! Case intake and results engine for cargo shipment risk assessment.
//!
//! `shipcase-core` turns loosely shaped shipment records into a canonical
//! case, checks them against a catalog of business rules, resolves the latest
//! analysis result across an ordered chain of sources, and folds whatever
//! payload shape arrives into one results summary. Normalization is total:
//! malformed input degrades to defaults and absent values stay absent.

pub mod case;
pub mod fields;
pub mod resolution;
pub mod summary;
pub mod types;
pub mod validation;

pub use case::{normalize, normalize_at, to_raw};
pub use resolution::{Resolution, ResolverConfig, ResultResolver};
pub use summary::{classify_summary, normalize_summary, Scenario};
pub use types::{
    CaseDraft, CaseId, DomainCase, Metric, ModuleToggles, Party, Priority, ResultsSummary,
    Severity, TransportMode, ValidationIssue, ValidationReport,
};
pub use validation::{completeness_score, validate, RuleContext, ValidationEngine};
