use serde_json::{json, Value};

use crate::types::case::{DomainCase, Party};

/// Project a case back onto the legacy form keys.
///
/// `normalize(&to_raw(&case))` reproduces the case's identity, route, cargo
/// and party fields; only `last_modified` is restamped.
pub fn to_raw(case: &DomainCase) -> Value {
    json!({
        "case_id": case.case_id.as_str(),
        "run_id": case.run_id.as_ref().map(|r| r.as_str()),
        "version": case.version,
        "created_at": case.created_at.to_rfc3339(),

        "pol_code": case.pol,
        "pod_code": case.pod,
        "pol_name": case.pol_name,
        "pod_name": case.pod_name,
        "transport_mode": case.transport_mode.as_str(),
        "container_type": case.container_type,
        "service_route": case.service_route,
        "carrier": case.carrier,

        "etd": case.etd,
        "eta": case.eta,
        "transit_time_days": case.transit_time_days,

        "cargo_type": case.cargo_type,
        "cargo_category": case.cargo_category,
        "hs_code": case.hs_code,
        "packaging": case.packaging,
        "packages": case.packages,
        "gross_weight_kg": case.gross_weight_kg,
        "net_weight_kg": case.net_weight_kg,
        "volume_cbm": case.volume_cbm,
        "cargo_value": case.cargo_value,
        "currency": case.currency,
        "dangerous_goods": case.dangerous_goods,
        "temperature_controlled": case.temperature_controlled,

        "incoterm": case.incoterm,
        "incoterm_location": case.incoterm_location,
        "priority": case.priority.as_str(),

        "seller": party_to_raw(&case.seller),
        "buyer": party_to_raw(&case.buyer),
        "forwarder": case.forwarder.as_ref().map(party_to_raw),

        "modules": {
            "esg": case.modules.esg,
            "weather": case.modules.weather,
            "port_congestion": case.modules.port_congestion,
            "carrier_performance": case.modules.carrier_performance,
            "market_scanner": case.modules.market_scanner,
            "insurance": case.modules.insurance,
        },
    })
}

fn party_to_raw(party: &Party) -> Value {
    json!({
        "company": party.company,
        "email": party.email,
        "phone": party.phone,
        "country": party.country,
        "city": party.city,
        "address": party.address,
        "tax_id": party.tax_id,
    })
}
