use crate::types::case::CaseDraft;

/// Fields counted by the completeness score, in display order.
pub const TRACKED_FIELDS: [&str; 10] = [
    "pol",
    "pod",
    "transport_mode",
    "container_type",
    "etd",
    "cargo_type",
    "packages",
    "cargo_value",
    "seller",
    "buyer",
];

fn filled_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn is_filled(case: &CaseDraft, field: &str) -> bool {
    match field {
        "pol" => filled_text(case.pol.as_deref()),
        "pod" => filled_text(case.pod.as_deref()),
        "transport_mode" => case.transport_mode.is_some(),
        "container_type" => filled_text(case.container_type.as_deref()),
        "etd" => filled_text(case.etd.as_deref()),
        "cargo_type" => filled_text(case.cargo_type.as_deref()),
        "packages" => case.packages.is_some_and(|p| p >= 1.0),
        "cargo_value" => case.cargo_value.is_some_and(|v| v >= 0.0),
        "seller" => case.seller.is_complete(),
        "buyer" => case.buyer.is_complete(),
        _ => false,
    }
}

/// Tracked fields that are not filled yet.
pub fn missing_fields(case: &CaseDraft) -> Vec<&'static str> {
    TRACKED_FIELDS
        .iter()
        .copied()
        .filter(|f| !is_filled(case, f))
        .collect()
}

/// `round(100 * filled / tracked)`, always within `0..=100`.
pub fn completeness_score(case: &CaseDraft) -> u8 {
    let filled = TRACKED_FIELDS
        .iter()
        .filter(|f| is_filled(case, f))
        .count();
    let score = (100.0 * filled as f64 / TRACKED_FIELDS.len() as f64).round() as u8;
    debug_assert!(score <= 100, "completeness {score} out of range");
    score
}
