use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::case::dates::{days_between, parse_timestamp};
use crate::fields::aliases;
use crate::fields::FieldResolver;
use crate::types::case::{
    CaseDraft, DomainCase, ModuleToggles, Party, Priority, TransportMode, CASE_SCHEMA_VERSION,
};
use crate::types::identifiers::{CaseId, RunId};

const DEFAULT_CURRENCY: &str = "USD";

impl CaseDraft {
    /// Resolve every canonical field from a raw form/state object.
    ///
    /// No defaults are applied. Any JSON value is accepted; non-objects
    /// simply resolve nothing.
    pub fn from_raw(raw: &Value) -> Self {
        let f = FieldResolver::new(raw);

        CaseDraft {
            case_id: f.string(aliases::CASE_ID),
            run_id: f.string(aliases::RUN_ID),
            version: f.string(aliases::VERSION),
            created_at: f.string(aliases::CREATED_AT),

            pol: f.string(aliases::POL).map(|s| s.to_uppercase()),
            pod: f.string(aliases::POD).map(|s| s.to_uppercase()),
            pol_name: f.string(aliases::POL_NAME),
            pod_name: f.string(aliases::POD_NAME),
            transport_mode: f
                .string(aliases::TRANSPORT_MODE)
                .and_then(|text| TransportMode::classify(&text)),
            container_type: f.string(aliases::CONTAINER_TYPE),
            service_route: f.string(aliases::SERVICE_ROUTE),
            carrier: f.string(aliases::CARRIER),

            etd: f.string(aliases::ETD),
            eta: f.string(aliases::ETA),
            transit_time_days: f.number(aliases::TRANSIT_TIME_DAYS),

            cargo_type: f.string(aliases::CARGO_TYPE),
            cargo_category: f.string(aliases::CARGO_CATEGORY),
            hs_code: f.string(aliases::HS_CODE),
            packaging: f.string(aliases::PACKAGING),
            packages: f.number(aliases::PACKAGES),
            gross_weight_kg: f.number(aliases::GROSS_WEIGHT_KG),
            net_weight_kg: f.number(aliases::NET_WEIGHT_KG),
            volume_cbm: f.number(aliases::VOLUME_CBM),
            cargo_value: f.number(aliases::CARGO_VALUE),
            currency: f.string(aliases::CURRENCY).map(|s| s.to_uppercase()),
            dangerous_goods: f.boolean(aliases::DANGEROUS_GOODS).unwrap_or(false),
            temperature_controlled: f.boolean(aliases::TEMPERATURE_CONTROLLED).unwrap_or(false),

            incoterm: f.string(aliases::INCOTERM).map(|s| s.to_uppercase()),
            incoterm_location: f.string(aliases::INCOTERM_LOCATION),
            priority: f.string(aliases::PRIORITY).map(|text| Priority::classify(&text)),

            seller: party_from(&f, aliases::SELLER),
            buyer: party_from(&f, aliases::BUYER),
            forwarder: party_from(&f, aliases::FORWARDER),

            modules: modules_from(&f),
        }
    }
}

fn party_from(f: &FieldResolver<'_>, prefixes: &[&str]) -> Party {
    let field = |keys: &[&str]| f.string(&aliases::party_paths(prefixes, keys));

    Party {
        // A bare string in place of the party object is the company name.
        company: field(aliases::PARTY_COMPANY)
            .or_else(|| f.string(prefixes))
            .unwrap_or_default(),
        email: field(aliases::PARTY_EMAIL).unwrap_or_default(),
        phone: field(aliases::PARTY_PHONE).unwrap_or_default(),
        country: field(aliases::PARTY_COUNTRY).unwrap_or_default(),
        city: field(aliases::PARTY_CITY),
        address: field(aliases::PARTY_ADDRESS),
        tax_id: field(aliases::PARTY_TAX_ID),
    }
}

fn modules_from(f: &FieldResolver<'_>) -> ModuleToggles {
    let toggle = |keys: &[&str]| {
        f.boolean(&aliases::party_paths(aliases::MODULE_CONTAINERS, keys))
            .unwrap_or(true)
    };

    ModuleToggles {
        esg: toggle(aliases::MODULE_ESG),
        weather: toggle(aliases::MODULE_WEATHER),
        port_congestion: toggle(aliases::MODULE_PORT_CONGESTION),
        carrier_performance: toggle(aliases::MODULE_CARRIER_PERFORMANCE),
        market_scanner: toggle(aliases::MODULE_MARKET_SCANNER),
        insurance: toggle(aliases::MODULE_INSURANCE),
    }
}

/// Explicit positive value first, then the ETD→ETA span, then the mode default.
pub fn derive_transit_days(
    explicit: Option<f64>,
    etd: &str,
    eta: Option<&str>,
    mode: TransportMode,
) -> u32 {
    if let Some(days) = explicit.filter(|d| *d > 0.0) {
        return (days.ceil() as u32).max(1);
    }
    if let Some(span) = eta.and_then(|eta| days_between(etd, eta)) {
        return span.ceil().max(1.0) as u32;
    }
    mode.default_transit_days()
}

impl DomainCase {
    /// Apply defaulting and derivation rules to a draft.
    pub fn from_draft(draft: CaseDraft, now: DateTime<Utc>) -> Self {
        let transport_mode = draft.transport_mode.unwrap_or(TransportMode::Air);
        let etd = draft.etd.unwrap_or_default();
        let transit_time_days = derive_transit_days(
            draft.transit_time_days,
            &etd,
            draft.eta.as_deref(),
            transport_mode,
        );

        let packages = draft
            .packages
            .filter(|p| *p >= 1.0)
            .map(|p| p.floor() as u32)
            .unwrap_or(1);

        let forwarder = Some(draft.forwarder).filter(|p| !p.is_empty());

        DomainCase {
            case_id: draft
                .case_id
                .map(CaseId::new)
                .unwrap_or_else(|| CaseId::generate(now)),
            run_id: draft.run_id.map(RunId::new),
            version: draft
                .version
                .unwrap_or_else(|| CASE_SCHEMA_VERSION.to_string()),
            created_at: draft
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(now),
            last_modified: now,

            pol: draft.pol.unwrap_or_default(),
            pod: draft.pod.unwrap_or_default(),
            pol_name: draft.pol_name,
            pod_name: draft.pod_name,
            transport_mode,
            container_type: draft.container_type.unwrap_or_default(),
            service_route: draft.service_route,
            carrier: draft.carrier,

            etd,
            eta: draft.eta,
            transit_time_days,

            cargo_type: draft.cargo_type.unwrap_or_default(),
            cargo_category: draft.cargo_category,
            hs_code: draft.hs_code,
            packaging: draft.packaging,
            packages,
            gross_weight_kg: draft.gross_weight_kg,
            net_weight_kg: draft.net_weight_kg,
            volume_cbm: draft.volume_cbm,
            cargo_value: draft.cargo_value,
            currency: draft
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            dangerous_goods: draft.dangerous_goods,
            temperature_controlled: draft.temperature_controlled,

            incoterm: draft.incoterm,
            incoterm_location: draft.incoterm_location,
            priority: draft.priority.unwrap_or_default(),

            seller: draft.seller,
            buyer: draft.buyer,
            forwarder,

            modules: draft.modules,
        }
    }
}

/// Build a canonical case from raw input, stamped with the current time.
pub fn normalize(raw: &Value) -> DomainCase {
    normalize_at(raw, Utc::now())
}

/// Build a canonical case from raw input with an injected clock.
///
/// Total over every JSON value, including `null` and `{}`. The input is
/// only borrowed.
pub fn normalize_at(raw: &Value, now: DateTime<Utc>) -> DomainCase {
    DomainCase::from_draft(CaseDraft::from_raw(raw), now)
}
