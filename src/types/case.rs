use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{CaseId, RunId};

/// Current schema version stamped on cases that do not carry one.
pub const CASE_SCHEMA_VERSION: &str = "2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    Air,
    Sea,
    Road,
    Rail,
    Multimodal,
}

impl TransportMode {
    /// Classify free text by case-insensitive substring match.
    ///
    /// Returns `None` only for blank text; unmatched text falls back to `Air`.
    pub fn classify(text: &str) -> Option<Self> {
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        let mode = if ["multimodal", "multi-modal", "intermodal", "combined"]
            .iter()
            .any(|k| lower.contains(k))
        {
            TransportMode::Multimodal
        } else if ["sea", "ocean", "vessel", "maritime", "fcl", "lcl"]
            .iter()
            .any(|k| lower.contains(k))
        {
            TransportMode::Sea
        } else if ["rail", "train"].iter().any(|k| lower.contains(k)) {
            TransportMode::Rail
        } else if ["road", "truck", "ftl", "ltl"]
            .iter()
            .any(|k| lower.contains(k))
        {
            TransportMode::Road
        } else {
            if !["air", "flight", "plane"].iter().any(|k| lower.contains(k)) {
                log::debug!("transport mode text {text:?} unmatched, defaulting to AIR");
            }
            TransportMode::Air
        };

        Some(mode)
    }

    /// Transit days assumed when neither an explicit value nor both dates exist.
    pub fn default_transit_days(self) -> u32 {
        match self {
            TransportMode::Air => 3,
            _ => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Air => "AIR",
            TransportMode::Sea => "SEA",
            TransportMode::Road => "ROAD",
            TransportMode::Rail => "RAIL",
            TransportMode::Multimodal => "MULTIMODAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Express,
    Urgent,
}

impl Priority {
    /// `urgent` wins over `express`; anything else is normal.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("urgent") {
            Priority::Urgent
        } else if lower.contains("express") {
            Priority::Express
        } else {
            Priority::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Express => "express",
            Priority::Urgent => "urgent",
        }
    }
}

/// A trading party. Required fields are empty strings when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Party {
    pub company: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

impl Party {
    /// Company, email, phone and country are all non-blank.
    pub fn is_complete(&self) -> bool {
        [&self.company, &self.email, &self.phone, &self.country]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        [&self.company, &self.email, &self.phone, &self.country]
            .iter()
            .all(|f| f.trim().is_empty())
            && self.city.is_none()
            && self.address.is_none()
            && self.tax_id.is_none()
    }
}

/// Risk modules the engine may run for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleToggles {
    pub esg: bool,
    pub weather: bool,
    pub port_congestion: bool,
    pub carrier_performance: bool,
    pub market_scanner: bool,
    pub insurance: bool,
}

impl Default for ModuleToggles {
    fn default() -> Self {
        Self {
            esg: true,
            weather: true,
            port_congestion: true,
            carrier_performance: true,
            market_scanner: true,
            insurance: true,
        }
    }
}

impl ModuleToggles {
    pub fn all_enabled(&self) -> bool {
        self.esg
            && self.weather
            && self.port_congestion
            && self.carrier_performance
            && self.market_scanner
            && self.insurance
    }
}

/// Canonical, fully defaulted representation of one shipment case.
///
/// Dates stay as the strings the user entered so that malformed values
/// survive normalization and can be reported by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCase {
    pub case_id: CaseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,

    pub pol: String,
    pub pod: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pol_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
    pub transport_mode: TransportMode,
    pub container_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    pub etd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    pub transit_time_days: u32,

    pub cargo_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    pub packages: u32,
    pub gross_weight_kg: Option<f64>,
    pub net_weight_kg: Option<f64>,
    pub volume_cbm: Option<f64>,
    pub cargo_value: Option<f64>,
    pub currency: String,
    pub dangerous_goods: bool,
    pub temperature_controlled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoterm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoterm_location: Option<String>,
    pub priority: Priority,

    pub seller: Party,
    pub buyer: Party,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarder: Option<Party>,

    pub modules: ModuleToggles,
}

/// A partially filled case: aliases resolved, nothing defaulted.
///
/// This is what validation and the completeness score look at, so that a
/// field the user never filled stays distinguishable from a defaulted one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseDraft {
    pub case_id: Option<String>,
    pub run_id: Option<String>,
    pub version: Option<String>,
    pub created_at: Option<String>,

    pub pol: Option<String>,
    pub pod: Option<String>,
    pub pol_name: Option<String>,
    pub pod_name: Option<String>,
    pub transport_mode: Option<TransportMode>,
    pub container_type: Option<String>,
    pub service_route: Option<String>,
    pub carrier: Option<String>,

    pub etd: Option<String>,
    pub eta: Option<String>,
    pub transit_time_days: Option<f64>,

    pub cargo_type: Option<String>,
    pub cargo_category: Option<String>,
    pub hs_code: Option<String>,
    pub packaging: Option<String>,
    pub packages: Option<f64>,
    pub gross_weight_kg: Option<f64>,
    pub net_weight_kg: Option<f64>,
    pub volume_cbm: Option<f64>,
    pub cargo_value: Option<f64>,
    pub currency: Option<String>,
    pub dangerous_goods: bool,
    pub temperature_controlled: bool,

    pub incoterm: Option<String>,
    pub incoterm_location: Option<String>,
    pub priority: Option<Priority>,

    pub seller: Party,
    pub buyer: Party,
    pub forwarder: Party,

    pub modules: ModuleToggles,
}

impl From<&DomainCase> for CaseDraft {
    fn from(case: &DomainCase) -> Self {
        CaseDraft {
            case_id: Some(case.case_id.as_str().to_string()),
            run_id: case.run_id.as_ref().map(|r| r.as_str().to_string()),
            version: Some(case.version.clone()),
            created_at: Some(case.created_at.to_rfc3339()),
            pol: Some(case.pol.clone()),
            pod: Some(case.pod.clone()),
            pol_name: case.pol_name.clone(),
            pod_name: case.pod_name.clone(),
            transport_mode: Some(case.transport_mode),
            container_type: Some(case.container_type.clone()),
            service_route: case.service_route.clone(),
            carrier: case.carrier.clone(),
            etd: Some(case.etd.clone()),
            eta: case.eta.clone(),
            transit_time_days: Some(f64::from(case.transit_time_days)),
            cargo_type: Some(case.cargo_type.clone()),
            cargo_category: case.cargo_category.clone(),
            hs_code: case.hs_code.clone(),
            packaging: case.packaging.clone(),
            packages: Some(f64::from(case.packages)),
            gross_weight_kg: case.gross_weight_kg,
            net_weight_kg: case.net_weight_kg,
            volume_cbm: case.volume_cbm,
            cargo_value: case.cargo_value,
            currency: Some(case.currency.clone()),
            dangerous_goods: case.dangerous_goods,
            temperature_controlled: case.temperature_controlled,
            incoterm: case.incoterm.clone(),
            incoterm_location: case.incoterm_location.clone(),
            priority: Some(case.priority),
            seller: case.seller.clone(),
            buyer: case.buyer.clone(),
            forwarder: case.forwarder.clone().unwrap_or_default(),
            modules: case.modules,
        }
    }
}

impl From<DomainCase> for CaseDraft {
    fn from(case: DomainCase) -> Self {
        CaseDraft::from(&case)
    }
}
