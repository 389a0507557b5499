use serde::{Deserialize, Serialize};

/// A numeric result field that may be absent.
///
/// `None` means the payload never supplied the value; `Some(0.0)` is a real
/// zero. Serialized as `null` / number.
pub type Metric = Option<f64>;

/// Fallback route text when no route information resolves.
pub const ROUTE_NOT_SPECIFIED: &str = "Route not specified";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipmentInfo {
    pub id: Option<String>,
    pub route: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub transport_mode: Option<String>,
    pub carrier: Option<String>,
    pub cargo_type: Option<String>,
    pub etd: Option<String>,
    pub eta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Overall {
    pub risk_score: Metric,
    pub risk_level: String,
    /// Percentage, 0-100.
    pub confidence: Metric,
    /// Aggregation method label, passed through untouched.
    pub method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLayer {
    pub name: String,
    pub score: Metric,
    /// Percentage, 0-100.
    pub contribution_pct: Metric,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
    pub expected_loss: Metric,
    pub var95: Metric,
    pub cvar: Metric,
    pub max_loss: Metric,
    pub std_dev: Metric,
    pub cargo_value: Metric,
}

impl Financials {
    /// Loss metrics that indicate financial exposure, in classifier order.
    pub fn exposure_metrics(&self) -> [Metric; 4] {
        [self.expected_loss, self.var95, self.cvar, self.max_loss]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub name: String,
    pub premium: Metric,
    pub rating: Metric,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Decision {
    pub insurance_recommendation: Option<String>,
    pub safe_window: Option<String>,
    pub providers: Vec<Provider>,
    pub trace: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Narrative {
    pub summary_text: String,
    pub insights: Vec<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFactor {
    pub name: String,
    /// Percentage, 0-100.
    pub impact: Metric,
    /// Percentage, 0-100.
    pub probability: Metric,
    pub description: Option<String>,
}

/// Canonical engine result handed to the presentation layer.
///
/// Layer names are unique after normalization (case and whitespace
/// insensitive).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSummary {
    pub shipment: ShipmentInfo,
    pub overall: Overall,
    pub layers: Vec<RiskLayer>,
    pub financial: Financials,
    pub decision: Decision,
    pub narrative: Narrative,
    pub factors: Vec<RiskFactor>,
}
