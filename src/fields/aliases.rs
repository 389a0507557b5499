//! Canonical alias-priority tables.
//!
//! One list per canonical field, earliest entry wins. Both the case
//! normalizer and the summary normalizer read from here so that a legacy
//! key is never honoured in one place and ignored in another.

// ---- case identity ----
pub const CASE_ID: &[&str] = &["case_id", "caseId", "case.id", "id"];
pub const RUN_ID: &[&str] = &["run_id", "runId"];
pub const VERSION: &[&str] = &["version", "schema_version", "schemaVersion"];
pub const CREATED_AT: &[&str] = &["created_at", "createdAt"];

// ---- route and transport ----
pub const POL: &[&str] = &[
    "pol_code",
    "polCode",
    "pol",
    "route.pol",
    "route.pol_code",
    "origin_code",
    "origin_port",
    "origin.code",
    "origin",
];
pub const POD: &[&str] = &[
    "pod_code",
    "podCode",
    "pod",
    "route.pod",
    "route.pod_code",
    "destination_code",
    "destination_port",
    "destination.code",
    "destination",
];
pub const POL_NAME: &[&str] = &["pol_name", "polName", "route.pol_name", "origin_name", "origin.name"];
pub const POD_NAME: &[&str] = &[
    "pod_name",
    "podName",
    "route.pod_name",
    "destination_name",
    "destination.name",
];
pub const TRANSPORT_MODE: &[&str] = &[
    "transport_mode",
    "transportMode",
    "transport.mode",
    "mode_of_transport",
    "mode",
];
pub const CONTAINER_TYPE: &[&str] = &[
    "container_type",
    "containerType",
    "transport.container_type",
    "equipment_type",
    "container",
];
pub const SERVICE_ROUTE: &[&str] = &["service_route", "serviceRoute", "route_type", "service"];
pub const CARRIER: &[&str] = &["carrier", "carrier_name", "carrierName", "transport.carrier"];
pub const ETD: &[&str] = &["etd", "etd_date", "departure_date", "departureDate", "transport.etd"];
pub const ETA: &[&str] = &["eta", "eta_date", "arrival_date", "arrivalDate", "transport.eta"];
pub const TRANSIT_TIME_DAYS: &[&str] = &[
    "transit_time_days",
    "transitTimeDays",
    "transit_days",
    "transit_time",
    "transport.transit_time",
];

// ---- cargo ----
pub const CARGO_TYPE: &[&str] = &["cargo_type", "cargoType", "cargo.type", "commodity", "goods_type"];
pub const CARGO_CATEGORY: &[&str] = &["cargo_category", "cargoCategory", "cargo.category", "category"];
pub const HS_CODE: &[&str] = &["hs_code", "hsCode", "cargo.hs_code", "hs"];
pub const PACKAGING: &[&str] = &["packaging", "packaging_type", "cargo.packaging"];
pub const PACKAGES: &[&str] = &[
    "packages",
    "package_count",
    "packageCount",
    "num_packages",
    "cargo.packages",
    "quantity",
];
pub const GROSS_WEIGHT_KG: &[&str] = &[
    "gross_weight_kg",
    "grossWeightKg",
    "gross_weight",
    "cargo.gross_weight",
    "weight_kg",
    "weight",
];
pub const NET_WEIGHT_KG: &[&str] = &["net_weight_kg", "netWeightKg", "net_weight", "cargo.net_weight"];
pub const VOLUME_CBM: &[&str] = &["volume_cbm", "volumeCbm", "cargo.volume", "cbm", "volume"];
/// Legacy chain for the declared cargo value.
pub const CARGO_VALUE: &[&str] = &[
    "cargo_value",
    "cargoValue",
    "cargo.value",
    "shipment_value",
    "declared_value",
    "invoice_value",
    "goods_value",
    "value",
];
pub const CURRENCY: &[&str] = &["currency", "cargo.currency", "value_currency"];
pub const DANGEROUS_GOODS: &[&str] = &[
    "dangerous_goods",
    "dangerousGoods",
    "cargo.dangerous_goods",
    "is_dg",
    "is_dangerous",
    "hazmat",
    "dg",
];
pub const TEMPERATURE_CONTROLLED: &[&str] = &[
    "temperature_controlled",
    "temperatureControlled",
    "cargo.temperature_controlled",
    "temp_control",
    "cold_chain",
    "reefer",
];

// ---- terms ----
pub const INCOTERM: &[&str] = &["incoterm", "incoterms", "trade_terms"];
pub const INCOTERM_LOCATION: &[&str] = &[
    "incoterm_location",
    "incotermLocation",
    "incoterm_place",
    "named_place",
];
pub const PRIORITY: &[&str] = &["priority", "urgency", "service_level"];

// ---- parties ----
pub const SELLER: &[&str] = &["seller", "shipper", "exporter"];
pub const BUYER: &[&str] = &["buyer", "consignee", "importer"];
pub const FORWARDER: &[&str] = &["forwarder", "freight_forwarder"];

pub const PARTY_COMPANY: &[&str] = &["company", "company_name", "name"];
pub const PARTY_EMAIL: &[&str] = &["email", "contact_email"];
pub const PARTY_PHONE: &[&str] = &["phone", "phone_number", "tel"];
pub const PARTY_COUNTRY: &[&str] = &["country"];
pub const PARTY_CITY: &[&str] = &["city"];
pub const PARTY_ADDRESS: &[&str] = &["address"];
pub const PARTY_TAX_ID: &[&str] = &["tax_id", "taxId", "vat_number"];

/// Expand party prefixes and field keys into `prefix.key` then `prefix_key`
/// paths, prefix-major.
pub fn party_paths(prefixes: &[&str], keys: &[&str]) -> Vec<String> {
    let mut paths = Vec::with_capacity(prefixes.len() * keys.len() * 2);
    for prefix in prefixes {
        for key in keys {
            paths.push(format!("{prefix}.{key}"));
        }
        for key in keys {
            paths.push(format!("{prefix}_{key}"));
        }
    }
    paths
}

// ---- risk modules ----
pub const MODULE_CONTAINERS: &[&str] = &["modules", "risk_modules", "riskModules"];
pub const MODULE_ESG: &[&str] = &["esg"];
pub const MODULE_WEATHER: &[&str] = &["weather"];
pub const MODULE_PORT_CONGESTION: &[&str] = &["port_congestion", "portCongestion", "port"];
pub const MODULE_CARRIER_PERFORMANCE: &[&str] = &["carrier_performance", "carrierPerformance", "carrier"];
pub const MODULE_MARKET_SCANNER: &[&str] = &["market_scanner", "marketScanner", "market"];
pub const MODULE_INSURANCE: &[&str] = &["insurance"];

// ---- results: overall ----
pub const RISK_SCORE: &[&str] = &[
    "overall.risk_score",
    "overall.riskScore",
    "overall.score",
    "risk_score",
    "riskScore",
    "overall_score",
    "overallScore",
    "profile.score",
    "score",
];
pub const RISK_LEVEL: &[&str] = &[
    "overall.risk_level",
    "overall.riskLevel",
    "overall.level",
    "risk_level",
    "riskLevel",
    "profile.level",
];
pub const CONFIDENCE: &[&str] = &[
    "overall.confidence",
    "confidence",
    "confidence_score",
    "profile.confidence",
];
pub const METHOD: &[&str] = &["overall.method", "method", "engine.method", "aggregation_method"];

// ---- results: financial ----
pub const EXPECTED_LOSS: &[&str] = &[
    "financial.expected_loss",
    "financial.expectedLoss",
    "expected_loss",
    "expectedLoss",
    "loss.expected_loss",
    "loss.mean",
    "financial.mean_loss",
    "mean_loss",
    "meanLoss",
];
pub const VAR95: &[&str] = &[
    "financial.var95",
    "financial.var_95",
    "financial.VaR95",
    "var95",
    "var_95",
    "VaR95",
    "loss.var95",
    "loss.p95",
    "financial.p95",
    "p95",
];
pub const CVAR: &[&str] = &[
    "financial.cvar",
    "financial.cvar95",
    "financial.cvar_95",
    "cvar",
    "cvar95",
    "cvar_95",
    "CVaR",
    "loss.cvar",
];
pub const MAX_LOSS: &[&str] = &[
    "financial.max_loss",
    "financial.maxLoss",
    "max_loss",
    "maxLoss",
    "loss.max",
    "financial.p99",
    "p99",
];
pub const STD_DEV: &[&str] = &[
    "financial.std_dev",
    "financial.stdDev",
    "std_dev",
    "stdDev",
    "loss.std",
    "financial.std",
];
/// Result-side cargo value keys, tried before [`CARGO_VALUE`].
pub const FINANCIAL_CARGO_VALUE: &[&str] = &[
    "financial.cargo_value",
    "financial.cargoValue",
    "shipment.cargo_value",
    "shipment.cargoValue",
];

// ---- results: shipment ----
pub const SHIPMENT_ID: &[&str] = &[
    "shipment.id",
    "shipment_id",
    "shipmentId",
    "case_id",
    "caseId",
    "run_id",
    "id",
];
pub const ROUTE_TEXT: &[&str] = &["shipment.route", "route_text", "routeText", "route"];
pub const ROUTE_COMBINED: &[&str] = &["route_code", "routeCode", "lane", "trade_lane"];
pub const ORIGIN: &[&str] = &[
    "shipment.origin",
    "origin.code",
    "origin",
    "route.pol",
    "pol_code",
    "pol",
    "origin_port",
];
pub const DESTINATION: &[&str] = &[
    "shipment.destination",
    "destination.code",
    "destination",
    "route.pod",
    "pod_code",
    "pod",
    "destination_port",
];
pub const SHIPMENT_MODE: &[&str] = &["shipment.transport_mode", "shipment.mode"];
pub const SHIPMENT_CARRIER: &[&str] = &["shipment.carrier"];
pub const SHIPMENT_CARGO_TYPE: &[&str] = &["shipment.cargo_type", "shipment.cargoType"];
pub const SHIPMENT_ETD: &[&str] = &["shipment.etd"];
pub const SHIPMENT_ETA: &[&str] = &["shipment.eta"];

// ---- results: layers and factors ----
pub const LAYERS: &[&str] = &[
    "layers",
    "risk_layers",
    "riskLayers",
    "layer_scores",
    "layerScores",
    "breakdown.layers",
];
pub const LAYER_NAME: &[&str] = &["name", "layer", "label", "title", "id"];
pub const LAYER_SCORE: &[&str] = &["score", "risk_score", "riskScore", "value"];
pub const LAYER_CONTRIBUTION: &[&str] = &[
    "contribution_pct",
    "contributionPct",
    "contribution",
    "weight",
    "share",
];
pub const LAYER_STATUS: &[&str] = &["status", "level", "risk_level"];

pub const FACTORS: &[&str] = &["factors", "risk_factors", "riskFactors", "top_factors", "drivers"];
pub const FACTOR_NAME: &[&str] = &["name", "factor", "label", "title"];
pub const FACTOR_IMPACT: &[&str] = &["impact", "contribution", "weight"];
pub const FACTOR_PROBABILITY: &[&str] = &["probability", "likelihood"];
pub const FACTOR_DESCRIPTION: &[&str] = &["description", "detail", "explanation"];

// ---- results: decision and narrative ----
pub const INSURANCE_RECOMMENDATION: &[&str] = &[
    "decision.insurance_recommendation",
    "decision.insuranceRecommendation",
    "insurance.recommendation",
    "insurance_recommendation",
    "recommendations.insurance",
];
pub const SAFE_WINDOW: &[&str] = &[
    "decision.safe_window",
    "decision.safeWindow",
    "timing.safe_window",
    "safe_window",
    "safeWindow",
    "optimal_window",
];
pub const PROVIDERS: &[&str] = &["decision.providers", "insurance.providers", "providers"];
pub const PROVIDER_NAME: &[&str] = &["name", "provider", "insurer"];
pub const PROVIDER_PREMIUM: &[&str] = &["premium", "price", "cost"];
pub const PROVIDER_RATING: &[&str] = &["rating", "score"];
pub const TRACE: &[&str] = &["decision.trace", "decision_trace", "reasoning_trace", "trace"];

pub const SUMMARY_TEXT: &[&str] = &[
    "narrative.summary_text",
    "narrative.summaryText",
    "narrative.summary",
    "summary_text",
    "summaryText",
    "executive_summary",
    "summary",
];
pub const INSIGHTS: &[&str] = &["narrative.insights", "insights", "key_insights"];
pub const ACTIONS: &[&str] = &[
    "narrative.actions",
    "actions",
    "recommended_actions",
    "recommendations",
];
/// Keys holding the display text of an object-shaped list item.
pub const ITEM_TEXT: &[&str] = &["text", "title", "action", "insight", "step", "message", "description"];
