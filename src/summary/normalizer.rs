use serde_json::Value;
use thiserror::Error;

use crate::fields::aliases;
use crate::fields::{is_present, lookup, FieldResolver};
use crate::summary::layers::normalize_layers_in;
use crate::summary::percent::PercentScale;
use crate::summary::scenario::normalized_score;
use crate::types::summary::{
    Decision, Financials, Metric, Narrative, Overall, Provider, ResultsSummary, RiskFactor,
    ShipmentInfo, ROUTE_NOT_SPECIFIED,
};

const ENVELOPE_KEYS: &[&str] = &["result", "data"];
const ROUTE_SEPARATORS: &[&str] = &["→", "->", "_"];

/// Why a payload cannot be turned into a summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadDefect {
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("payload is empty")]
    Empty,
    #[error("payload reports an error: {0}")]
    ErrorShaped(String),
    #[error("payload has no recognizable result fields")]
    NoResultFields,
}

fn has_layers(f: &FieldResolver<'_>) -> bool {
    match f.value(aliases::LAYERS) {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        _ => false,
    }
}

fn has_result_fields(raw: &Value) -> bool {
    let f = FieldResolver::new(raw);
    f.number(aliases::RISK_SCORE).is_some()
        || has_layers(&f)
        || [
            aliases::EXPECTED_LOSS,
            aliases::VAR95,
            aliases::CVAR,
            aliases::MAX_LOSS,
        ]
        .into_iter()
        .any(|paths| f.number(paths).is_some())
}

fn error_message(raw: &Value) -> Option<String> {
    if let Some(err) = lookup(raw, "error").filter(|e| is_present(e) && **e != Value::Bool(false)) {
        let message = match err {
            Value::String(s) => s.clone(),
            Value::Object(_) => FieldResolver::new(err).string_or(&["message", "detail"], "error"),
            other => other.to_string(),
        };
        return Some(message);
    }
    let status = lookup(raw, "status").and_then(Value::as_str)?;
    matches!(status.to_lowercase().as_str(), "error" | "failed" | "failure").then(|| {
        FieldResolver::new(raw).string_or(&["message", "detail"], status)
    })
}

/// Unwrap a one-level `{"result": ..}` / `{"data": ..}` envelope when the
/// outer object carries no result fields itself.
pub fn unwrap_envelope(raw: &Value) -> &Value {
    if has_result_fields(raw) {
        return raw;
    }
    ENVELOPE_KEYS
        .iter()
        .filter_map(|key| lookup(raw, key))
        .find(|inner| inner.as_object().is_some_and(|m| !m.is_empty()))
        .unwrap_or(raw)
}

/// Check that a payload is structurally usable and return its result body.
pub fn usable_payload(raw: &Value) -> Result<&Value, PayloadDefect> {
    let map = raw.as_object().ok_or(PayloadDefect::NotAnObject)?;
    if map.is_empty() {
        return Err(PayloadDefect::Empty);
    }
    if let Some(message) = error_message(raw) {
        return Err(PayloadDefect::ErrorShaped(message));
    }

    let body = unwrap_envelope(raw);
    if let Some(message) = error_message(body) {
        return Err(PayloadDefect::ErrorShaped(message));
    }
    if !has_result_fields(body) {
        return Err(PayloadDefect::NoResultFields);
    }
    Ok(body)
}

/// Split `A→B`, `A->B` or `A_B` into its two ends.
pub fn split_route(text: &str) -> Option<(String, String)> {
    ROUTE_SEPARATORS.iter().find_map(|sep| {
        let parts: Vec<&str> = text.split(sep).map(str::trim).collect();
        match parts.as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => Some((a.to_string(), b.to_string())),
            _ => None,
        }
    })
}

fn route_info(f: &FieldResolver<'_>) -> (String, Option<String>, Option<String>) {
    let origin = f.string(aliases::ORIGIN);
    let destination = f.string(aliases::DESTINATION);

    if let Some(text) = f.string(aliases::ROUTE_TEXT) {
        let (o, d) = match split_route(&text) {
            Some((o, d)) => (Some(o), Some(d)),
            None => (None, None),
        };
        return (text, origin.or(o), destination.or(d));
    }

    if let Some((o, d)) = f
        .string(aliases::ROUTE_COMBINED)
        .and_then(|combined| split_route(&combined))
    {
        let text = format!("{o} → {d}");
        return (text, origin.or(Some(o)), destination.or(Some(d)));
    }

    let text = match (&origin, &destination) {
        (Some(o), Some(d)) => format!("{o} → {d}"),
        _ => ROUTE_NOT_SPECIFIED.to_string(),
    };
    (text, origin, destination)
}

/// Level for an overall score after 0-100 scores are folded to 0-10.
pub fn risk_level(score: Metric) -> String {
    let level = match score.map(normalized_score) {
        None => "UNKNOWN",
        Some(s) if s >= 7.0 => "HIGH",
        Some(s) if s >= 4.0 => "MEDIUM",
        Some(s) if s > 0.0 => "LOW",
        Some(_) => "MINIMAL",
    };
    level.to_string()
}

/// Display strings from an array of strings or `{text|title|...}` objects.
fn text_items(items: Option<&Vec<Value>>) -> Vec<String> {
    items
        .into_iter()
        .flatten()
        .filter_map(|item| match item {
            Value::Object(_) => FieldResolver::new(item).string(aliases::ITEM_TEXT),
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn providers(items: Option<&Vec<Value>>) -> Vec<Provider> {
    items
        .into_iter()
        .flatten()
        .filter_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(Provider {
                name: s.trim().to_string(),
                premium: None,
                rating: None,
            }),
            Value::Object(_) => {
                let f = FieldResolver::new(item);
                Some(Provider {
                    name: f.string(aliases::PROVIDER_NAME)?,
                    premium: f.number(aliases::PROVIDER_PREMIUM),
                    rating: f.number(aliases::PROVIDER_RATING),
                })
            }
            _ => None,
        })
        .collect()
}

fn factors(items: Option<&Vec<Value>>, scale: PercentScale) -> Vec<RiskFactor> {
    items
        .into_iter()
        .flatten()
        .filter_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(RiskFactor {
                name: s.trim().to_string(),
                ..RiskFactor::default()
            }),
            Value::Object(_) => {
                let f = FieldResolver::new(item);
                Some(RiskFactor {
                    name: f.string(aliases::FACTOR_NAME)?,
                    impact: scale.read(f.number(aliases::FACTOR_IMPACT)),
                    probability: scale.read(f.number(aliases::FACTOR_PROBABILITY)),
                    description: f.string(aliases::FACTOR_DESCRIPTION),
                })
            }
            _ => None,
        })
        .collect()
}

/// A serialized [`ResultsSummary`] always carries these as strings; engine
/// payloads do not.
const CANONICAL_MARKERS: &[&str] = &[
    "shipment.route",
    "overall.risk_level",
    "narrative.summary_text",
];

/// Percentages in a stored summary were already scaled once.
fn percent_scale(body: &Value) -> PercentScale {
    let canonical = CANONICAL_MARKERS
        .iter()
        .all(|path| lookup(body, path).is_some_and(Value::is_string));
    if canonical {
        PercentScale::Percent
    } else {
        PercentScale::Mixed
    }
}

/// Map an arbitrary engine payload onto the canonical summary.
///
/// Total over any JSON value. Financial fields that no alias resolves stay
/// `None`; they are never replaced by zero.
pub fn normalize_summary(raw: &Value) -> ResultsSummary {
    let body = unwrap_envelope(raw);
    let f = FieldResolver::new(body);
    let scale = percent_scale(body);

    let (route, origin, destination) = route_info(&f);
    let shipment = ShipmentInfo {
        id: f.string(aliases::SHIPMENT_ID),
        route,
        origin,
        destination,
        transport_mode: f
            .string(aliases::SHIPMENT_MODE)
            .or_else(|| f.string(aliases::TRANSPORT_MODE))
            .map(|m| m.to_uppercase()),
        carrier: f
            .string(aliases::SHIPMENT_CARRIER)
            .or_else(|| f.string(aliases::CARRIER)),
        cargo_type: f
            .string(aliases::SHIPMENT_CARGO_TYPE)
            .or_else(|| f.string(aliases::CARGO_TYPE)),
        etd: f.string(aliases::SHIPMENT_ETD).or_else(|| f.string(aliases::ETD)),
        eta: f.string(aliases::SHIPMENT_ETA).or_else(|| f.string(aliases::ETA)),
    };

    let risk_score = f.number(aliases::RISK_SCORE);
    let overall = Overall {
        risk_score,
        risk_level: f
            .string(aliases::RISK_LEVEL)
            .map(|l| l.to_uppercase())
            .unwrap_or_else(|| risk_level(risk_score)),
        confidence: scale.read(f.number(aliases::CONFIDENCE)),
        method: f.string(aliases::METHOD),
    };

    let financial = Financials {
        expected_loss: f.number(aliases::EXPECTED_LOSS),
        var95: f.number(aliases::VAR95),
        cvar: f.number(aliases::CVAR),
        max_loss: f.number(aliases::MAX_LOSS),
        std_dev: f.number(aliases::STD_DEV),
        cargo_value: f
            .number(aliases::FINANCIAL_CARGO_VALUE)
            .or_else(|| f.number(aliases::CARGO_VALUE)),
    };

    let decision = Decision {
        insurance_recommendation: f.string(aliases::INSURANCE_RECOMMENDATION),
        safe_window: f.string(aliases::SAFE_WINDOW),
        providers: providers(f.array(aliases::PROVIDERS)),
        trace: text_items(f.array(aliases::TRACE)),
    };

    let narrative = Narrative {
        summary_text: f.string(aliases::SUMMARY_TEXT).unwrap_or_default(),
        insights: text_items(f.array(aliases::INSIGHTS)),
        actions: text_items(f.array(aliases::ACTIONS)),
    };

    ResultsSummary {
        shipment,
        overall,
        layers: normalize_layers_in(f.value(aliases::LAYERS), scale),
        financial,
        decision,
        narrative,
        factors: factors(f.array(aliases::FACTORS), scale),
    }
}
