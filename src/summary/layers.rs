use std::collections::HashSet;

use serde_json::Value;

use crate::fields::aliases;
use crate::fields::{as_number, FieldResolver};
use crate::summary::percent::PercentScale;
use crate::types::summary::{Metric, RiskLayer};

/// Dedup key: trimmed, lowercased, inner whitespace collapsed.
pub fn layer_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Status for a layer score. Scores up to 10 are read on a 0-10 scale.
pub fn layer_status(score: Metric) -> String {
    let Some(score) = score else {
        return "UNKNOWN".to_string();
    };
    let scaled = if score <= 10.0 { score * 10.0 } else { score };
    let status = if scaled >= 70.0 {
        "HIGH"
    } else if scaled >= 40.0 {
        "MEDIUM"
    } else {
        "LOW"
    };
    status.to_string()
}

fn layer_from_object(
    entry: &Value,
    fallback_name: Option<&str>,
    scale: PercentScale,
) -> (Option<String>, RiskLayer) {
    let f = FieldResolver::new(entry);
    let name = f
        .string(aliases::LAYER_NAME)
        .or_else(|| fallback_name.map(str::to_string));
    let score = f.number(aliases::LAYER_SCORE);
    let layer = RiskLayer {
        name: String::new(),
        score,
        contribution_pct: scale.read(f.number(aliases::LAYER_CONTRIBUTION)),
        status: f
            .string(aliases::LAYER_STATUS)
            .map(|s| s.to_uppercase())
            .unwrap_or_else(|| layer_status(score)),
    };
    (name, layer)
}

fn bare_layer(score: Metric) -> RiskLayer {
    RiskLayer {
        name: String::new(),
        score,
        contribution_pct: None,
        status: layer_status(score),
    }
}

/// Canonical layer list from an array of entries or a `name -> entry` map.
///
/// Entries lacking both a name and a numeric score are dropped. A score
/// without a name becomes `Layer <n>` (1-based position). Later entries whose
/// [`layer_key`] was already seen are dropped, so the first occurrence wins
/// and order is preserved.
pub fn normalize_layers(raw: Option<&Value>) -> Vec<RiskLayer> {
    normalize_layers_in(raw, PercentScale::Mixed)
}

/// [`normalize_layers`] with contributions read on `scale`.
pub fn normalize_layers_in(raw: Option<&Value>, scale: PercentScale) -> Vec<RiskLayer> {
    let candidates: Vec<(Option<String>, RiskLayer)> = match raw {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Object(_) => layer_from_object(item, None, scale),
                Value::String(s) => (Some(s.trim().to_string()), bare_layer(None)),
                other => (None, bare_layer(as_number(other))),
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| match value {
                Value::Object(_) => layer_from_object(value, Some(key.as_str()), scale),
                other => (Some(key.clone()), bare_layer(as_number(other))),
            })
            .collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut layers = Vec::with_capacity(candidates.len());

    for (index, (name, mut layer)) in candidates.into_iter().enumerate() {
        let name = name.filter(|n| !n.trim().is_empty());

        layer.name = match (name, layer.score) {
            (Some(name), _) => name.trim().to_string(),
            (None, Some(_)) => format!("Layer {}", index + 1),
            (None, None) => {
                log::debug!("dropping layer entry {index}: no name and no score");
                continue;
            }
        };

        if !seen.insert(layer_key(&layer.name)) {
            log::debug!("dropping duplicate layer {:?}", layer.name);
            continue;
        }
        layers.push(layer);
    }

    debug_assert!({
        let keys: HashSet<String> = layers.iter().map(|l| layer_key(&l.name)).collect();
        keys.len() == layers.len()
    });

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_collapses_case_and_whitespace() {
        assert_eq!(layer_key("  Weather   Risk "), "weather risk");
        assert_eq!(layer_key("weather\trisk"), "weather risk");
    }

    #[test]
    fn status_reads_both_scales() {
        assert_eq!(layer_status(Some(7.5)), "HIGH");
        assert_eq!(layer_status(Some(75.0)), "HIGH");
        assert_eq!(layer_status(Some(45.0)), "MEDIUM");
        assert_eq!(layer_status(Some(12.0)), "LOW");
        assert_eq!(layer_status(None), "UNKNOWN");
    }

    #[test]
    fn map_shaped_layers_use_keys_as_names() {
        let layers = normalize_layers(Some(&json!({"weather": 62, "port": {"score": 30}})));
        let names: Vec<&str> = layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["weather", "port"]);
        assert_eq!(layers[0].score, Some(62.0));
    }

    #[test]
    fn map_shaped_layers_keep_payload_order_and_first_occurrence() {
        let raw: Value = serde_json::from_str(
            r#"{"weather risk": 20, "Weather Risk": 80, "Carrier": 10}"#,
        )
        .unwrap();
        let layers = normalize_layers(Some(&raw));
        let named: Vec<(&str, Option<f64>)> =
            layers.iter().map(|l| (l.name.as_str(), l.score)).collect();
        assert_eq!(named, vec![("weather risk", Some(20.0)), ("Carrier", Some(10.0))]);
    }

    #[test]
    fn unnamed_scored_entry_gets_positional_name() {
        let layers = normalize_layers(Some(&json!([{"name": "Carrier"}, {"score": 40}])));
        assert_eq!(layers[1].name, "Layer 2");
    }
}
