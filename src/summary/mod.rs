pub mod layers;
pub mod normalizer;
pub mod percent;
pub mod scenario;

pub use layers::{layer_key, layer_status, normalize_layers, normalize_layers_in};
pub use normalizer::{
    normalize_summary, risk_level, split_route, unwrap_envelope, usable_payload, PayloadDefect,
};
pub use percent::{percent_metric, to_percent, PercentScale};
pub use scenario::{classify, classify_summary, normalized_score, Scenario};
