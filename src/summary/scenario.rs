use serde::{Deserialize, Serialize};

use crate::types::summary::{Financials, Metric, ResultsSummary};

/// Coarse presentation scenario. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    FullRiskAndLoss,
    OperationalRiskOnly,
    NoRiskDetected,
}

impl Scenario {
    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::FullRiskAndLoss => "FULL_RISK_AND_LOSS",
            Scenario::OperationalRiskOnly => "OPERATIONAL_RISK_ONLY",
            Scenario::NoRiskDetected => "NO_RISK_DETECTED",
        }
    }
}

/// Fold 0-100 scores onto the 0-10 scale; 0-10 scores pass through.
pub fn normalized_score(raw: f64) -> f64 {
    if raw > 10.0 {
        raw / 10.0
    } else {
        raw
    }
}

pub fn has_operational_risk(risk_score: Metric) -> bool {
    risk_score
        .filter(|s| s.is_finite())
        .map(normalized_score)
        .is_some_and(|s| s > 0.0)
}

/// Any of expected loss, VaR95, CVaR or max loss is a finite positive number.
pub fn has_financial_exposure(financial: &Financials) -> bool {
    financial
        .exposure_metrics()
        .into_iter()
        .flatten()
        .any(|v| v.is_finite() && v > 0.0)
}

/// Classify from a score and loss metrics. Reads only; never adjusts numbers.
pub fn classify(risk_score: Metric, financial: &Financials) -> Scenario {
    match (
        has_operational_risk(risk_score),
        has_financial_exposure(financial),
    ) {
        (false, _) => Scenario::NoRiskDetected,
        (true, true) => Scenario::FullRiskAndLoss,
        (true, false) => Scenario::OperationalRiskOnly,
    }
}

pub fn classify_summary(summary: &ResultsSummary) -> Scenario {
    classify(summary.overall.risk_score, &summary.financial)
}
