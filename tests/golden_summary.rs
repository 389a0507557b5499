use serde_json::{json, Value};
use shipcase_core::summary::{classify, classify_summary, normalize_summary, to_percent, Scenario};
use shipcase_core::types::summary::{Financials, ROUTE_NOT_SPECIFIED};
use shipcase_core::types::ResultsSummary;

fn engine_payload() -> Value {
    json!({
        "data": {
            "shipment": {"id": "CASE-42", "route": "VNSGN → CNSHA", "transport_mode": "sea", "carrier": "Maersk"},
            "overall": {"risk_score": 6.5, "confidence": 0.5, "method": "monte_carlo"},
            "layers": [
                {"name": "Weather Risk", "score": 72, "contribution": 0.25},
                {"name": "weather   risk", "score": 10},
                {"name": "Port Congestion", "score": 3.5, "status": "medium"},
                {"contribution": 0.1}
            ],
            "financial": {"expected_loss": 1200, "var95": 0, "cargo_value": 50000},
            "decision": {
                "insurance_recommendation": "Buy ICC(A)",
                "providers": [{"name": "Allianz", "premium": 420}, "Chubb"],
                "trace": ["score > 6", {"text": "loss above threshold"}]
            },
            "narrative": {
                "summary": "Moderate risk on the lane.",
                "insights": [{"title": "Typhoon season"}],
                "actions": ["Book earlier vessel"]
            },
            "factors": [{"name": "Typhoon", "impact": 0.25, "probability": 40}]
        }
    })
}

fn expected_summary() -> Value {
    json!({
        "shipment": {
            "id": "CASE-42",
            "route": "VNSGN → CNSHA",
            "origin": "VNSGN",
            "destination": "CNSHA",
            "transport_mode": "SEA",
            "carrier": "Maersk",
            "cargo_type": null,
            "etd": null,
            "eta": null
        },
        "overall": {
            "risk_score": 6.5,
            "risk_level": "MEDIUM",
            "confidence": 50.0,
            "method": "monte_carlo"
        },
        "layers": [
            {"name": "Weather Risk", "score": 72.0, "contribution_pct": 25.0, "status": "HIGH"},
            {"name": "Port Congestion", "score": 3.5, "contribution_pct": null, "status": "MEDIUM"}
        ],
        "financial": {
            "expected_loss": 1200.0,
            "var95": 0.0,
            "cvar": null,
            "max_loss": null,
            "std_dev": null,
            "cargo_value": 50000.0
        },
        "decision": {
            "insurance_recommendation": "Buy ICC(A)",
            "safe_window": null,
            "providers": [
                {"name": "Allianz", "premium": 420.0, "rating": null},
                {"name": "Chubb", "premium": null, "rating": null}
            ],
            "trace": ["score > 6", "loss above threshold"]
        },
        "narrative": {
            "summary_text": "Moderate risk on the lane.",
            "insights": ["Typhoon season"],
            "actions": ["Book earlier vessel"]
        },
        "factors": [
            {"name": "Typhoon", "impact": 25.0, "probability": 40.0, "description": null}
        ]
    })
}

#[test]
fn golden_summary_from_enveloped_payload() {
    let summary = normalize_summary(&engine_payload());
    let actual = serde_json::to_value(&summary).unwrap();
    assert_eq!(actual, expected_summary());
}

#[test]
fn golden_summary_key_order() {
    let summary = normalize_summary(&engine_payload());
    let text = serde_json::to_string(&summary).unwrap();

    let keys = [
        "\"shipment\"",
        "\"overall\"",
        "\"layers\"",
        "\"financial\"",
        "\"decision\"",
        "\"narrative\"",
        "\"factors\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted, "{text}");
}

#[test]
fn summary_survives_persistence() {
    let summary = normalize_summary(&engine_payload());
    let stored = serde_json::to_string(&summary).unwrap();

    let restored: ResultsSummary = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, summary);

    // A stored summary is itself a valid payload and normalizes to itself.
    let renormalized = normalize_summary(&serde_json::from_str::<Value>(&stored).unwrap());
    assert_eq!(renormalized, summary);
}

#[test]
fn small_percentages_survive_renormalization() {
    let summary = normalize_summary(&json!({
        "risk_score": 2,
        "confidence": 0.005,
        "layers": [{"name": "Port", "score": 3, "contribution": 0.004}],
        "factors": [{"name": "Fog", "impact": 0.01, "probability": 0.002}]
    }));
    assert_eq!(summary.overall.confidence, Some(0.5));
    assert_eq!(summary.layers[0].contribution_pct, Some(0.4));
    assert_eq!(summary.factors[0].impact, Some(1.0));
    assert_eq!(summary.factors[0].probability, Some(0.2));

    let stored: Value = serde_json::to_value(&summary).unwrap();
    let once = normalize_summary(&stored);
    assert_eq!(once, summary);
    assert_eq!(normalize_summary(&serde_json::to_value(&once).unwrap()), summary);
}

#[test]
fn layer_names_dedup_on_case_and_whitespace() {
    let summary = normalize_summary(&json!({
        "layers": [
            {"name": "Weather Risk", "score": 62},
            {"name": "weather   risk", "score": 10},
            {"name": "  WEATHER RISK ", "score": 99}
        ]
    }));

    assert_eq!(summary.layers.len(), 1);
    assert_eq!(summary.layers[0].name, "Weather Risk");
    assert_eq!(summary.layers[0].score, Some(62.0));
}

#[test]
fn nameless_scoreless_layers_are_dropped() {
    let summary = normalize_summary(&json!({
        "risk_layers": [{"contribution": 0.3}, {"score": 40}, {"label": "Carrier"}]
    }));
    let names: Vec<&str> = summary.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Layer 2", "Carrier"]);
    assert_eq!(summary.layers[1].status, "UNKNOWN");
}

#[test]
fn absent_financials_stay_absent_and_zero_stays_zero() {
    let summary = normalize_summary(&json!({"risk_score": 4, "expected_loss": 0}));

    assert_eq!(summary.financial.expected_loss, Some(0.0));
    assert_eq!(summary.financial.var95, None);
    assert_eq!(summary.financial.cvar, None);
    assert_eq!(summary.financial.max_loss, None);

    let json = serde_json::to_value(&summary.financial).unwrap();
    assert_eq!(json["expected_loss"], json!(0.0));
    assert_eq!(json["var95"], Value::Null);
}

#[test]
fn financial_aliases_resolve_in_priority_order() {
    let summary = normalize_summary(&json!({
        "risk_score": 5,
        "financial": {"expected_loss": 100},
        "expected_loss": 999,
        "meanLoss": 5,
        "p95": 250,
        "CVaR": 300,
        "loss": {"max": 900}
    }));

    assert_eq!(summary.financial.expected_loss, Some(100.0));
    assert_eq!(summary.financial.var95, Some(250.0));
    assert_eq!(summary.financial.cvar, Some(300.0));
    assert_eq!(summary.financial.max_loss, Some(900.0));

    let legacy = normalize_summary(&json!({"score": 5, "meanLoss": 77}));
    assert_eq!(legacy.financial.expected_loss, Some(77.0));
}

#[test]
fn route_text_falls_back_in_order() {
    let explicit = normalize_summary(&json!({"route": "Saigon to Shanghai"}));
    assert_eq!(explicit.shipment.route, "Saigon to Shanghai");

    let combined = normalize_summary(&json!({"route_code": "VNSGN->CNSHA"}));
    assert_eq!(combined.shipment.route, "VNSGN → CNSHA");
    assert_eq!(combined.shipment.origin.as_deref(), Some("VNSGN"));
    assert_eq!(combined.shipment.destination.as_deref(), Some("CNSHA"));

    let underscore = normalize_summary(&json!({"lane": "VNSGN_CNSHA"}));
    assert_eq!(underscore.shipment.route, "VNSGN → CNSHA");

    let discrete = normalize_summary(&json!({"origin": "VNSGN", "destination": "CNSHA"}));
    assert_eq!(discrete.shipment.route, "VNSGN → CNSHA");

    let nothing = normalize_summary(&json!({"origin": "VNSGN"}));
    assert_eq!(nothing.shipment.route, ROUTE_NOT_SPECIFIED);
}

#[test]
fn percentages_use_one_heuristic_everywhere() {
    assert_eq!(to_percent(0.25), 25.0);
    assert_eq!(to_percent(1.0), 100.0);
    assert_eq!(to_percent(72.0), 72.0);
    assert_eq!(to_percent(-0.5), -50.0);

    let summary = normalize_summary(&json!({
        "confidence": 0.5,
        "layers": [{"name": "Port", "score": 30, "contribution_pct": 35}],
        "factors": [{"name": "Fog", "impact": 0.25, "likelihood": 80}]
    }));
    assert_eq!(summary.overall.confidence, Some(50.0));
    assert_eq!(summary.layers[0].contribution_pct, Some(35.0));
    assert_eq!(summary.factors[0].impact, Some(25.0));
    assert_eq!(summary.factors[0].probability, Some(80.0));
}

#[test]
fn normalize_summary_is_total() {
    for raw in [Value::Null, json!({}), json!([]), json!("oops"), json!({"data": []})] {
        let summary = normalize_summary(&raw);
        assert_eq!(summary.overall.risk_score, None);
        assert_eq!(summary.overall.risk_level, "UNKNOWN");
        assert_eq!(summary.shipment.route, ROUTE_NOT_SPECIFIED);
        assert!(summary.layers.is_empty());
    }
}

#[test]
fn scenario_table() {
    let none = Financials::default();
    let loss = Financials {
        expected_loss: Some(1200.0),
        ..Financials::default()
    };
    let zeros = Financials {
        expected_loss: Some(0.0),
        var95: Some(0.0),
        cvar: Some(0.0),
        max_loss: Some(0.0),
        ..Financials::default()
    };

    assert_eq!(classify(Some(0.0), &loss), Scenario::NoRiskDetected);
    assert_eq!(classify(None, &loss), Scenario::NoRiskDetected);
    assert_eq!(classify(Some(45.0), &loss), Scenario::FullRiskAndLoss);
    assert_eq!(classify(Some(45.0), &none), Scenario::OperationalRiskOnly);
    assert_eq!(classify(Some(45.0), &zeros), Scenario::OperationalRiskOnly);
    assert_eq!(classify(Some(4.5), &zeros), Scenario::OperationalRiskOnly);

    let nan = Financials {
        var95: Some(f64::NAN),
        ..Financials::default()
    };
    assert_eq!(classify(Some(45.0), &nan), Scenario::OperationalRiskOnly);
}

#[test]
fn scenario_from_summary_and_serialized_tag() {
    let summary = normalize_summary(&engine_payload());
    assert_eq!(classify_summary(&summary), Scenario::FullRiskAndLoss);

    let legacy = normalize_summary(&json!({"riskScore": 45, "meanLoss": 1200}));
    assert_eq!(classify_summary(&legacy), Scenario::FullRiskAndLoss);

    let quiet = normalize_summary(&json!({"score": 0, "expected_loss": 500}));
    assert_eq!(classify_summary(&quiet), Scenario::NoRiskDetected);

    assert_eq!(
        serde_json::to_string(&Scenario::OperationalRiskOnly).unwrap(),
        "\"OPERATIONAL_RISK_ONLY\""
    );
    assert_eq!(Scenario::FullRiskAndLoss.as_str(), "FULL_RISK_AND_LOSS");
}

#[test]
fn classification_never_touches_numbers() {
    let summary = normalize_summary(&engine_payload());
    let before = summary.clone();
    let _ = classify_summary(&summary);
    assert_eq!(summary, before);
}
