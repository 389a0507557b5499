use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use shipcase_core::case::normalize_at;
use shipcase_core::types::{CaseDraft, Severity, ValidationReport};
use shipcase_core::validation::{
    completeness_score, missing_fields, RuleContext, ValidationEngine, TRACKED_FIELDS,
};

fn ctx() -> RuleContext {
    RuleContext::new(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
}

fn valid_raw() -> Value {
    json!({
        "pol_code": "VNSGN",
        "pod_code": "CNSHA",
        "pol_name": "Cat Lai Terminal",
        "pod_name": "Yangshan Deep Water",
        "transport_mode": "sea",
        "container_type": "40HC",
        "etd": "2026-04-01",
        "eta": "2026-04-19",
        "transit_time_days": 18,
        "cargo_type": "Garments",
        "hs_code": "6109.10",
        "packages": 120,
        "gross_weight_kg": 8200,
        "net_weight_kg": 7600,
        "volume_cbm": 58,
        "cargo_value": 85000,
        "currency": "USD",
        "incoterm": "FOB",
        "incoterm_location": "Cat Lai",
        "seller": {
            "company": "Saigon Textiles",
            "email": "ops@sgtextiles.vn",
            "phone": "+84 28 1234 5678",
            "country": "Vietnam"
        },
        "buyer": {
            "company": "Shanghai Apparel Co",
            "email": "import@shapparel.cn",
            "phone": "+86 21 8765 4321",
            "country": "China"
        }
    })
}

fn with(patch: Value) -> Value {
    let mut raw = valid_raw();
    let target = raw.as_object_mut().unwrap();
    for (key, value) in patch.as_object().unwrap() {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
    raw
}

fn check(raw: &Value) -> ValidationReport {
    ValidationEngine::standard().validate_raw(raw, &ctx())
}

fn ids(report: &ValidationReport) -> Vec<&str> {
    report.issues.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn valid_case_raises_nothing() {
    let report = check(&valid_raw());
    assert!(report.valid);
    assert!(report.issues.is_empty(), "{:?}", ids(&report));
}

#[test]
fn empty_pol_yields_exactly_one_pol_issue() {
    let report = check(&with(json!({"pol_code": ""})));

    let pol_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.affected_fields.iter().any(|f| f == "pol"))
        .collect();
    assert_eq!(pol_issues.len(), 1);
    assert_eq!(pol_issues[0].id, "required.pol");
    assert_eq!(pol_issues[0].severity, Severity::Critical);
    assert_eq!(ids(&report), vec!["required.pol"]);
    assert!(!report.valid);
}

#[test]
fn rules_do_not_short_circuit() {
    let report = check(&json!({}));
    let critical: Vec<&str> = report.critical().map(|i| i.id.as_str()).collect();

    assert_eq!(
        critical,
        vec![
            "required.pol",
            "required.pod",
            "required.transport_mode",
            "required.container_type",
            "required.etd",
            "required.cargo_type",
            "cargo_value.invalid",
            "party.seller",
            "party.buyer",
        ]
    );
    assert!(report.find("transit.missing").is_some());
    assert!(report.find("packages.missing").is_some());
    assert!(!report.valid);
}

#[test]
fn single_defect_fires_single_rule() {
    let cases = [
        (json!({"etd": "2026-02-01", "eta": "2026-02-19"}), "etd.invalid"),
        (json!({"etd": "soon"}), "etd.invalid"),
        (json!({"eta": "2026-03-25"}), "eta.before_etd"),
        (json!({"net_weight_kg": 9000}), "weight.net_exceeds_gross"),
        (json!({"pol_name": "Tan Son Nhat Airport"}), "route.mode_port_mismatch"),
        (json!({"hs_code": "2933.19"}), "hs.dangerous_goods_undeclared"),
        (json!({"packages": 0}), "packages.invalid"),
        (json!({"cargo_value": -5}), "cargo_value.invalid"),
        (json!({"cargo_value": null}), "cargo_value.invalid"),
        (json!({"container_type": "  "}), "required.container_type"),
        (json!({"cargo_type": null}), "required.cargo_type"),
        (
            json!({"seller": {"company": "Saigon Textiles", "email": "ops@example", "phone": "1", "country": "VN"}}),
            "party.seller.email",
        ),
        (
            json!({"buyer": {"company": "Shanghai Apparel Co", "phone": "1", "country": "CN"}}),
            "party.buyer",
        ),
        (json!({"transit_time_days": null}), "transit.missing"),
        (json!({"transit_time_days": 0}), "transit.missing"),
        (json!({"transit_time_days": 120}), "transit.outlier"),
        (json!({"incoterm": "CIF", "incoterm_location": null}), "incoterm.location_missing"),
        (json!({"hs_code": "0303.89"}), "hs.perishable_uncontrolled"),
        (json!({"volume_cbm": 2}), "cargo.density_outlier"),
        (json!({"packages": null}), "packages.missing"),
    ];

    for (patch, expected) in cases {
        let report = check(&with(patch.clone()));
        assert_eq!(ids(&report), vec![expected], "patch {patch}");
    }
}

#[test]
fn air_transit_outlier_starts_at_fifteen_days() {
    let air = json!({"transport_mode": "air", "pol_name": null, "pod_name": null});

    let report = check(&with(air.clone()));
    assert_eq!(ids(&report), vec!["transit.outlier"]);

    let mut fast = air;
    fast["transit_time_days"] = json!(14);
    fast["eta"] = json!("2026-04-15");
    let report = check(&with(fast));
    assert!(report.issues.is_empty(), "{:?}", ids(&report));
}

#[test]
fn sea_mode_through_airport_names_the_offending_port() {
    let report = check(&with(json!({"pod_name": "Pudong International Airport"})));
    let issue = report.find("route.mode_port_mismatch").unwrap();

    assert_eq!(issue.affected_fields, vec!["transport_mode", "pod"]);
    assert_eq!(issue.severity, Severity::Critical);
}

#[test]
fn port_name_in_code_field_still_trips_mode_mismatch() {
    let report = check(&with(json!({"pod_code": "Noi Bai Airport", "pod_name": null})));
    assert_eq!(ids(&report), vec!["route.mode_port_mismatch"]);
    assert_eq!(
        report.find("route.mode_port_mismatch").unwrap().affected_fields,
        vec!["transport_mode", "pod"]
    );

    // An explicit port name wins over the code text.
    let named = check(&with(json!({"pod_code": "Noi Bai Airport"})));
    assert!(named.find("route.mode_port_mismatch").is_none());
}

#[test]
fn warnings_keep_the_case_valid() {
    let report = check(&with(json!({"hs_code": "0303.89", "volume_cbm": 2})));
    assert!(report.valid);
    assert_eq!(report.count(Severity::Warning), 2);
    assert_eq!(report.count(Severity::Critical), 0);
}

#[test]
fn suggestions_cover_long_transit_and_insurance() {
    let long = with(json!({
        "transit_time_days": 45,
        "eta": "2026-05-16",
        "modules": {"weather": false}
    }));
    assert_eq!(ids(&check(&long)), vec!["modules.long_transit_coverage"]);

    let high_value = with(json!({"cargo_value": 250000, "modules": {"insurance": false}}));
    let report = check(&high_value);
    assert_eq!(ids(&report), vec!["modules.insurance_recommended"]);
    assert_eq!(report.suggestions().count(), 1);

    let dangerous = with(json!({"dangerous_goods": true, "modules": {"insurance": false}}));
    assert_eq!(ids(&check(&dangerous)), vec!["modules.insurance_recommended"]);
}

#[test]
fn issues_follow_catalog_order() {
    let engine = ValidationEngine::standard();
    let catalog = engine.rule_ids();
    let report = check(&json!({"packages": 0, "etd": "2020-01-01", "hs_code": "29"}));

    let positions: Vec<usize> = report
        .issues
        .iter()
        .map(|i| catalog.iter().position(|id| *id == i.id).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn defaulted_case_still_reports_semantic_problems() {
    let case = normalize_at(
        &with(json!({"net_weight_kg": 9000})),
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
    );
    let report = ValidationEngine::standard().validate_case(&case, &ctx());
    assert_eq!(ids(&report), vec!["weight.net_exceeds_gross"]);
}

#[test]
fn completeness_of_empty_is_zero_and_full_is_hundred() {
    assert_eq!(completeness_score(&CaseDraft::default()), 0);
    assert_eq!(completeness_score(&CaseDraft::from_raw(&json!({}))), 0);
    assert_eq!(completeness_score(&CaseDraft::from_raw(&valid_raw())), 100);
    assert!(missing_fields(&CaseDraft::from_raw(&valid_raw())).is_empty());
}

#[test]
fn completeness_never_decreases_as_fields_are_added() {
    let steps = [
        ("pol_code", json!("VNSGN")),
        ("pod_code", json!("CNSHA")),
        ("transport_mode", json!("sea")),
        ("container_type", json!("40HC")),
        ("etd", json!("2026-04-01")),
        ("cargo_type", json!("Garments")),
        ("packages", json!(120)),
        ("cargo_value", json!(85000)),
        ("seller", valid_raw()["seller"].clone()),
        ("buyer", valid_raw()["buyer"].clone()),
    ];
    assert_eq!(steps.len(), TRACKED_FIELDS.len());

    let mut raw = json!({});
    let mut last = completeness_score(&CaseDraft::from_raw(&raw));
    for (key, value) in steps {
        raw[key] = value;
        let score = completeness_score(&CaseDraft::from_raw(&raw));
        assert!(score >= last, "{key}: {score} < {last}");
        last = score;
    }
    assert_eq!(last, 100);
}

#[test]
fn party_counts_only_when_all_contact_fields_present() {
    let partial = json!({"seller": {"company": "Saigon Textiles", "email": "ops@sgtextiles.vn"}});
    let draft = CaseDraft::from_raw(&partial);
    assert!(missing_fields(&draft).contains(&"seller"));
}

#[test]
fn end_to_end_sparse_record() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
    let raw = json!({"pol_code": "VNSGN", "cargo_value": 50000});

    let case = normalize_at(&raw, now);
    assert_eq!(case.pol, "VNSGN");
    assert_eq!(case.cargo_value, Some(50_000.0));
    assert_eq!(case.transport_mode.as_str(), "AIR");
    assert_eq!(case.priority.as_str(), "normal");

    let report = check(&raw);
    for id in ["required.pod", "required.etd", "required.container_type", "required.cargo_type"] {
        assert!(report.find(id).is_some(), "missing {id}");
    }
    assert!(report.find("required.pol").is_none());
    assert!(completeness_score(&CaseDraft::from_raw(&raw)) < 50);
}
