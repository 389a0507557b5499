use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::case::dates::{days_between, parse_date, parse_datetime};
use crate::types::case::{CaseDraft, Party, TransportMode};
use crate::types::issue::{Severity, ValidationIssue};

/// Everything a rule may depend on besides the case itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    pub today: NaiveDate,
}

impl RuleContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today() -> Self {
        Self {
            today: Utc::now().date_naive(),
        }
    }
}

pub trait ValidationRule: Send + Sync {
    fn id(&self) -> &'static str;

    /// Emit at most one issue. Rules never see each other's output.
    fn check(&self, case: &CaseDraft, ctx: &RuleContext) -> Option<ValidationIssue>;
}

type CheckFn = fn(&'static str, &CaseDraft, &RuleContext) -> Option<ValidationIssue>;

/// A rule backed by a plain function.
pub struct FnRule {
    id: &'static str,
    check: CheckFn,
}

impl FnRule {
    pub const fn new(id: &'static str, check: CheckFn) -> Self {
        Self { id, check }
    }
}

impl ValidationRule for FnRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn check(&self, case: &CaseDraft, ctx: &RuleContext) -> Option<ValidationIssue> {
        (self.check)(self.id, case, ctx)
    }
}

pub const SEA_TRANSIT_RANGE: (f64, f64) = (3.0, 90.0);
pub const AIR_TRANSIT_MAX: f64 = 15.0;
pub const DENSITY_RANGE_KG_PER_CBM: (f64, f64) = (50.0, 1500.0);
pub const HIGH_VALUE_THRESHOLD: f64 = 100_000.0;
pub const LONG_TRANSIT_DAYS: f64 = 30.0;
pub const LOCATION_INCOTERMS: &[&str] = &["FOB", "CIF", "CFR", "DAP", "DPU", "DDP"];
pub const CHEMICAL_HS_CHAPTERS: &[u32] = &[28, 29];
pub const PERISHABLE_HS_CHAPTERS: &[u32] = &[2, 3, 7, 8];

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}

fn blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn required(id: &'static str, field: &str, label: &str, missing: bool) -> Option<ValidationIssue> {
    missing.then(|| {
        ValidationIssue::new(
            id,
            Severity::Critical,
            format!("{label} is required"),
            format!("The {} field is empty; the risk engine cannot run without it.", label.to_lowercase()),
            &[field],
        )
        .with_action(format!("Enter {}", label.to_lowercase()))
    })
}

/// Two-digit HS chapter from a code such as `0303.89` or `851712`.
pub fn hs_chapter(hs_code: &str) -> Option<u32> {
    let digits: String = hs_code.chars().filter(|c| c.is_ascii_digit()).take(2).collect();
    if digits.len() < 2 {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    Airport,
    Seaport,
}

/// What a free-text port name implies about the port type.
pub fn port_kind(name: &str) -> Option<PortKind> {
    let lower = name.to_lowercase();
    if ["airport", "air cargo", "aeroport", "air terminal"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Some(PortKind::Airport)
    } else if ["seaport", "sea port", "harbour", "harbor", "port of", "container terminal"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Some(PortKind::Seaport)
    } else {
        None
    }
}

/// Transit days the case implies: explicit positive value, else the date span.
pub fn effective_transit_days(case: &CaseDraft) -> Option<f64> {
    if let Some(days) = case.transit_time_days.filter(|d| *d > 0.0) {
        return Some(days);
    }
    let etd = case.etd.as_deref()?;
    let eta = case.eta.as_deref()?;
    days_between(etd, eta).map(|d| d.ceil().max(1.0))
}

// ---- critical ----

fn check_pol(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    required(id, "pol", "Port of loading", blank(c.pol.as_deref()))
}

fn check_pod(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    required(id, "pod", "Port of discharge", blank(c.pod.as_deref()))
}

fn check_transport_mode(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    required(id, "transport_mode", "Transport mode", c.transport_mode.is_none())
}

fn check_container_type(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    required(id, "container_type", "Container type", blank(c.container_type.as_deref()))
}

fn check_etd(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    required(id, "etd", "Departure date (ETD)", blank(c.etd.as_deref()))
}

fn check_cargo_type(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    required(id, "cargo_type", "Cargo type", blank(c.cargo_type.as_deref()))
}

fn check_packages(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let packages = c.packages?;
    (packages < 1.0).then(|| {
        ValidationIssue::new(
            id,
            Severity::Critical,
            "Package count must be at least 1",
            format!("Got {packages}."),
            &["packages"],
        )
        .with_action("Fix package count")
    })
}

fn check_cargo_value(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let (message, detail) = match c.cargo_value {
        None => (
            "Cargo value is required".to_string(),
            "Loss estimates are expressed against the declared cargo value.".to_string(),
        ),
        Some(v) if v < 0.0 => (
            "Cargo value cannot be negative".to_string(),
            format!("Got {v}."),
        ),
        Some(_) => return None,
    };
    Some(
        ValidationIssue::new(id, Severity::Critical, message, detail, &["cargo_value"])
            .with_action("Enter cargo value"),
    )
}

fn party_required(id: &'static str, role: &str, party: &Party) -> Option<ValidationIssue> {
    let mut missing = Vec::new();
    if party.company.trim().is_empty() {
        missing.push(format!("{role}.company"));
    }
    if party.email.trim().is_empty() {
        missing.push(format!("{role}.email"));
    }
    if missing.is_empty() {
        return None;
    }

    let fields: Vec<&str> = missing.iter().map(String::as_str).collect();
    Some(
        ValidationIssue::new(
            id,
            Severity::Critical,
            format!("{} company and email are required", capitalize(role)),
            format!("Missing: {}.", fields.join(", ")),
            &fields,
        )
        .with_action(format!("Complete {role} details")),
    )
}

fn party_email(id: &'static str, role: &str, party: &Party) -> Option<ValidationIssue> {
    let email = party.email.trim();
    if email.is_empty() || is_valid_email(email) {
        return None;
    }
    let field = format!("{role}.email");
    Some(
        ValidationIssue::new(
            id,
            Severity::Critical,
            format!("{} email is not a valid address", capitalize(role)),
            format!("{email:?} does not look like name@domain.tld."),
            &[field.as_str()],
        )
        .with_action(format!("Fix {role} email")),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_seller(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    party_required(id, "seller", &c.seller)
}

fn check_buyer(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    party_required(id, "buyer", &c.buyer)
}

fn check_seller_email(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    party_email(id, "seller", &c.seller)
}

fn check_buyer_email(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    party_email(id, "buyer", &c.buyer)
}

fn check_etd_date(id: &'static str, c: &CaseDraft, ctx: &RuleContext) -> Option<ValidationIssue> {
    let etd = c.etd.as_deref().filter(|s| !s.trim().is_empty())?;
    let (message, detail) = match parse_date(etd) {
        None => (
            "Departure date (ETD) is not a valid date".to_string(),
            format!("Could not read {etd:?}; use YYYY-MM-DD."),
        ),
        Some(date) if date < ctx.today => (
            "Departure date (ETD) is in the past".to_string(),
            format!("{date} is before {}.", ctx.today),
        ),
        Some(_) => return None,
    };
    Some(
        ValidationIssue::new(id, Severity::Critical, message, detail, &["etd"])
            .with_action("Fix departure date"),
    )
}

fn check_eta_after_etd(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let etd = parse_datetime(c.etd.as_deref()?)?;
    let eta = parse_datetime(c.eta.as_deref()?)?;
    (eta <= etd).then(|| {
        ValidationIssue::new(
            id,
            Severity::Critical,
            "Arrival date (ETA) must be after departure (ETD)",
            format!("ETA {eta} is not after ETD {etd}."),
            &["etd", "eta"],
        )
        .with_action("Fix arrival date")
    })
}

fn check_net_weight(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let (net, gross) = (c.net_weight_kg?, c.gross_weight_kg?);
    (net > gross).then(|| {
        ValidationIssue::new(
            id,
            Severity::Critical,
            "Net weight exceeds gross weight",
            format!("Net {net} kg > gross {gross} kg."),
            &["net_weight_kg", "gross_weight_kg"],
        )
        .with_action("Fix cargo weights")
    })
}

fn check_mode_port(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let mode = c.transport_mode?;
    let conflicting = match mode {
        TransportMode::Sea => PortKind::Airport,
        TransportMode::Air => PortKind::Seaport,
        _ => return None,
    };

    // Forms often put the port name itself in the code field.
    let offending: Vec<&str> = [
        ("pol", c.pol_name.as_deref().or(c.pol.as_deref())),
        ("pod", c.pod_name.as_deref().or(c.pod.as_deref())),
    ]
    .into_iter()
    .filter(|(_, name)| name.and_then(port_kind) == Some(conflicting))
    .map(|(field, _)| field)
    .collect();

    if offending.is_empty() {
        return None;
    }

    let port_word = match conflicting {
        PortKind::Airport => "an airport",
        PortKind::Seaport => "a seaport",
    };
    let mut fields = vec!["transport_mode"];
    fields.extend(offending.iter().copied());

    Some(
        ValidationIssue::new(
            id,
            Severity::Critical,
            format!("{} shipment routed through {port_word}", mode.as_str()),
            format!("Port names for {} imply {port_word}.", offending.join(", ")),
            &fields,
        )
        .with_action("Check transport mode and ports"),
    )
}

fn check_hs_dangerous(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let chapter = hs_chapter(c.hs_code.as_deref()?)?;
    (CHEMICAL_HS_CHAPTERS.contains(&chapter) && !c.dangerous_goods).then(|| {
        ValidationIssue::new(
            id,
            Severity::Critical,
            "Chemical HS chapter without dangerous goods declaration",
            format!("HS chapter {chapter:02} covers chemicals that usually ship as dangerous goods."),
            &["hs_code", "dangerous_goods"],
        )
        .with_action("Declare dangerous goods")
    })
}

// ---- warning ----

fn check_transit_present(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    c.transit_time_days
        .map_or(true, |d| d <= 0.0)
        .then(|| {
            ValidationIssue::new(
                id,
                Severity::Warning,
                "Transit time is missing",
                "A mode-based default will be assumed.",
                &["transit_time_days"],
            )
            .with_action("Enter transit time")
        })
}

fn check_transit_outlier(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let days = effective_transit_days(c)?;
    let (lo, hi) = SEA_TRANSIT_RANGE;
    let expected = match c.transport_mode? {
        TransportMode::Sea if days < lo || days > hi => format!("{lo}-{hi} days"),
        TransportMode::Air if days >= AIR_TRANSIT_MAX => format!("under {AIR_TRANSIT_MAX} days"),
        _ => return None,
    };
    Some(ValidationIssue::new(
        id,
        Severity::Warning,
        "Transit time is unusual for the transport mode",
        format!("{days} days; typical is {expected}."),
        &["transit_time_days", "transport_mode"],
    ))
}

fn check_incoterm_location(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let incoterm = c.incoterm.as_deref()?.trim().to_uppercase();
    (LOCATION_INCOTERMS.contains(&incoterm.as_str()) && blank(c.incoterm_location.as_deref())).then(|| {
        ValidationIssue::new(
            id,
            Severity::Warning,
            format!("{incoterm} requires a named place"),
            "Risk transfer point is undefined without the incoterm location.",
            &["incoterm_location"],
        )
        .with_action("Enter incoterm location")
    })
}

fn check_hs_perishable(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let chapter = hs_chapter(c.hs_code.as_deref()?)?;
    (PERISHABLE_HS_CHAPTERS.contains(&chapter) && !c.temperature_controlled).then(|| {
        ValidationIssue::new(
            id,
            Severity::Warning,
            "Perishable goods without temperature control",
            format!("HS chapter {chapter:02} is perishable."),
            &["hs_code", "temperature_controlled"],
        )
    })
}

fn check_density(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let gross = c.gross_weight_kg.filter(|w| *w > 0.0)?;
    let volume = c.volume_cbm.filter(|v| *v > 0.0)?;
    let density = gross / volume;
    let (lo, hi) = DENSITY_RANGE_KG_PER_CBM;
    (density < lo || density > hi).then(|| {
        ValidationIssue::new(
            id,
            Severity::Warning,
            "Weight and volume look inconsistent",
            format!("Density {density:.0} kg/m³ is outside {lo}-{hi} kg/m³."),
            &["gross_weight_kg", "volume_cbm"],
        )
    })
}

fn check_packages_present(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    c.packages.is_none().then(|| {
        ValidationIssue::new(
            id,
            Severity::Warning,
            "Package count is missing",
            "One package will be assumed.",
            &["packages"],
        )
        .with_action("Enter package count")
    })
}

// ---- suggestion ----

fn check_long_transit_modules(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let days = effective_transit_days(c)?;
    (days > LONG_TRANSIT_DAYS && !c.modules.all_enabled()).then(|| {
        ValidationIssue::new(
            id,
            Severity::Suggestion,
            "Enable all risk modules for long transits",
            format!("{days} days in transit; some modules are switched off."),
            &["modules"],
        )
        .with_action("Enable all modules")
    })
}

fn check_insurance_module(id: &'static str, c: &CaseDraft, _: &RuleContext) -> Option<ValidationIssue> {
    let high_value = c.cargo_value.is_some_and(|v| v > HIGH_VALUE_THRESHOLD);
    ((high_value || c.dangerous_goods) && !c.modules.insurance).then(|| {
        let reason = if high_value {
            "High-value cargo"
        } else {
            "Dangerous goods"
        };
        ValidationIssue::new(
            id,
            Severity::Suggestion,
            "Consider enabling the insurance module",
            format!("{reason} with insurance analysis disabled."),
            &["modules.insurance"],
        )
        .with_action("Enable insurance module")
    })
}

/// The standard catalog, in report order.
pub fn standard_rules() -> Vec<Box<dyn ValidationRule>> {
    let rules = [
        FnRule::new("required.pol", check_pol),
        FnRule::new("required.pod", check_pod),
        FnRule::new("required.transport_mode", check_transport_mode),
        FnRule::new("required.container_type", check_container_type),
        FnRule::new("required.etd", check_etd),
        FnRule::new("required.cargo_type", check_cargo_type),
        FnRule::new("packages.invalid", check_packages),
        FnRule::new("cargo_value.invalid", check_cargo_value),
        FnRule::new("party.seller", check_seller),
        FnRule::new("party.buyer", check_buyer),
        FnRule::new("party.seller.email", check_seller_email),
        FnRule::new("party.buyer.email", check_buyer_email),
        FnRule::new("etd.invalid", check_etd_date),
        FnRule::new("eta.before_etd", check_eta_after_etd),
        FnRule::new("weight.net_exceeds_gross", check_net_weight),
        FnRule::new("route.mode_port_mismatch", check_mode_port),
        FnRule::new("hs.dangerous_goods_undeclared", check_hs_dangerous),
        FnRule::new("transit.missing", check_transit_present),
        FnRule::new("transit.outlier", check_transit_outlier),
        FnRule::new("incoterm.location_missing", check_incoterm_location),
        FnRule::new("hs.perishable_uncontrolled", check_hs_perishable),
        FnRule::new("cargo.density_outlier", check_density),
        FnRule::new("packages.missing", check_packages_present),
        FnRule::new("modules.long_transit_coverage", check_long_transit_modules),
        FnRule::new("modules.insurance_recommended", check_insurance_module),
    ];

    rules
        .into_iter()
        .map(|r| Box::new(r) as Box<dyn ValidationRule>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_matches_reference_shape() {
        assert!(is_valid_email("ops@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("ops@example"));
        assert!(!is_valid_email("ops example@x.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn hs_chapter_reads_leading_digits() {
        assert_eq!(hs_chapter("0303.89"), Some(3));
        assert_eq!(hs_chapter("2933.19"), Some(29));
        assert_eq!(hs_chapter("8"), None);
        assert_eq!(hs_chapter("n/a"), None);
    }

    #[test]
    fn airport_is_checked_before_port_of() {
        assert_eq!(port_kind("Airport of Tan Son Nhat"), Some(PortKind::Airport));
        assert_eq!(port_kind("Port of Shanghai"), Some(PortKind::Seaport));
        assert_eq!(port_kind("Hai Phong"), None);
    }
}
